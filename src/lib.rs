//! Fast Additive Homomorphic Encryption (FAHE).
//!
//! Symmetric encryption over big integers in two variants. Ciphertexts can be
//! added together, up to `2^(alpha-1)` terms, and the sum decrypts to the sum
//! of the plaintexts modulo `2^m_max`.
//!
//! ```no_run
//! use fahe::{FaheEngine, FaheResult};
//! use num_bigint::BigUint;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! fn main() -> FaheResult<()> {
//!     let mut rng = ChaCha20Rng::from_os_rng();
//!     let engine = FaheEngine::builder().build_fahe1(&mut rng)?;
//!
//!     let a = engine.encrypt(&BigUint::from(20u32), &mut rng)?;
//!     let b = engine.encrypt(&BigUint::from(22u32), &mut rng)?;
//!     assert_eq!(engine.decrypt(&(&a + &b))?, BigUint::from(42u32));
//!     Ok(())
//! }
//! ```
pub mod batch_io;
pub mod crypto;
pub mod keys;
pub mod math;
pub mod params;

pub use crypto::{
    Ciphertext, FaheEngine, FaheEngineBuilder, FaheError, FaheResult, decrypt,
    decrypt_list, encrypt, encrypt_list, par_encrypt_list,
};
pub use keys::{Fahe1Key, Fahe2Key, SecretKey};
pub use math::PrimeConfig;
pub use params::{FaheParams, NoiseLayout, Preset, Scheme};
