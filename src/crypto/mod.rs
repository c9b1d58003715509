//! User-facing FAHE operations.
//!
//! [`FaheEngine`] owns a key and exposes encryption, decryption, batch
//! variants and homomorphic addition. The free functions in [`operations`]
//! and [`parallel`] work directly on a [`crate::keys::SecretKey`].

pub mod builder;
pub mod engine;
pub mod errors;
pub mod operations;
pub mod parallel;
pub mod types;

pub use builder::FaheEngineBuilder;
pub use engine::FaheEngine;
pub use errors::{FaheError, FaheResult};
pub use operations::{decrypt, decrypt_list, encrypt, encrypt_list};
pub use parallel::par_encrypt_list;
pub use types::Ciphertext;
