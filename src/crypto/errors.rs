use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaheError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Out of memory: could not reserve {requested} elements")]
    OutOfMemory { requested: usize },

    #[error("Key generation failed for a {bits}-bit prime: {reason}")]
    KeyGenerationFailed { bits: u32, reason: String },

    #[error("Arithmetic failure in {operation}")]
    ArithmeticFailure { operation: &'static str },

    #[error("I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Malformed number at position {index}: {token:?}")]
    Parse { index: usize, token: String },
}

impl FaheError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FaheError::InvalidParameter {
            message: message.into(),
        }
    }
}

pub type FaheResult<T> = Result<T, FaheError>;
