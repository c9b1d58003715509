use super::builder::FaheEngineBuilder;
use super::{Ciphertext, FaheResult, operations, parallel};
use crate::keys::SecretKey;
use crate::math::sampling;
use crate::params::{FaheParams, Scheme};
use num_bigint::BigUint;
use rand::Rng;
use std::fmt;
use tracing::warn;

/// A keyed FAHE instance.
///
/// Owns exactly one [`SecretKey`]; the prime and ratio bound are released
/// when the engine is dropped.
#[derive(Debug)]
pub struct FaheEngine {
    key: SecretKey,
    num_additions: BigUint,
}

impl FaheEngine {
    pub fn builder() -> FaheEngineBuilder {
        FaheEngineBuilder::new()
    }

    pub fn new(key: SecretKey) -> Self {
        let num_additions = key.params().num_additions();
        Self { key, num_additions }
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    pub fn params(&self) -> &FaheParams {
        self.key.params()
    }

    pub fn scheme(&self) -> Scheme {
        self.key.scheme()
    }

    /// Advisory addition budget `2^(alpha-1)`.
    pub fn num_additions(&self) -> &BigUint {
        &self.num_additions
    }

    /// Whether a sum of `terms` ciphertexts is guaranteed to decrypt correctly.
    pub fn within_addition_budget(&self, terms: usize) -> bool {
        BigUint::from(terms) <= self.num_additions
    }

    pub fn encrypt<R: Rng + ?Sized>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> FaheResult<Ciphertext> {
        operations::encrypt(&self.key, message, rng)
    }

    pub fn decrypt(&self, ciphertext: &Ciphertext) -> FaheResult<BigUint> {
        operations::decrypt(&self.key, ciphertext)
    }

    pub fn encrypt_list<R: Rng + ?Sized>(
        &self,
        messages: &[BigUint],
        rng: &mut R,
    ) -> FaheResult<Vec<Ciphertext>> {
        operations::encrypt_list(&self.key, messages, rng)
    }

    pub fn decrypt_list(&self, ciphertexts: &[Ciphertext]) -> FaheResult<Vec<BigUint>> {
        operations::decrypt_list(&self.key, ciphertexts)
    }

    pub fn par_encrypt_list<R: Rng + ?Sized>(
        &self,
        messages: &[BigUint],
        workers: usize,
        rng: &mut R,
    ) -> FaheResult<Vec<Ciphertext>> {
        parallel::par_encrypt_list(&self.key, messages, workers, rng)
    }

    /// Homomorphic addition of two ciphertexts.
    pub fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        a + b
    }

    /// Sums `ciphertexts`, warning when the count exceeds the addition budget.
    ///
    /// The result is still returned past the budget; decrypting it may then
    /// yield an incorrect value.
    pub fn sum(&self, ciphertexts: &[Ciphertext]) -> Ciphertext {
        if !self.within_addition_budget(ciphertexts.len()) {
            warn!(
                terms = ciphertexts.len(),
                budget = %self.num_additions,
                "ciphertext sum exceeds addition budget"
            );
        }
        ciphertexts.iter().sum()
    }

    /// A random message below `2^msg_size`.
    pub fn generate_message<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        sampling::generate_message(self.params().msg_size, rng)
    }

    pub fn generate_messages<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> FaheResult<Vec<BigUint>> {
        sampling::generate_message_list(self.params().msg_size, count, rng)
    }
}

impl fmt::Display for FaheEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params();
        write!(
            f,
            "{} (lambda={}, m_max={}, alpha={}, msg_size={}, num_additions={})",
            self.scheme(),
            params.lambda,
            params.m_max,
            params.alpha,
            params.msg_size,
            self.num_additions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn engine(scheme: Scheme, seed: u64) -> FaheEngine {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        FaheEngine::builder()
            .lambda(64)
            .m_max(16)
            .alpha(6)
            .msg_size(10)
            .safe_prime(false)
            .build(scheme, &mut rng)
            .unwrap()
    }

    #[test]
    fn budget_follows_alpha() {
        let engine = engine(Scheme::Fahe1, 0);
        assert_eq!(engine.num_additions(), &BigUint::from(32u32));
        assert!(engine.within_addition_budget(0));
        assert!(engine.within_addition_budget(32));
        assert!(!engine.within_addition_budget(33));
    }

    #[test]
    fn sum_decrypts_to_plaintext_sum() {
        for scheme in [Scheme::Fahe1, Scheme::Fahe2] {
            let engine = engine(scheme, 1);
            let mut rng = ChaCha20Rng::seed_from_u64(2);
            let messages = engine.generate_messages(32, &mut rng).unwrap();
            let cts = engine.encrypt_list(&messages, &mut rng).unwrap();
            let expected: BigUint = messages.iter().sum();
            assert_eq!(engine.decrypt(&engine.sum(&cts)).unwrap(), expected);
        }
    }

    #[test]
    fn add_matches_plaintext_addition() {
        let engine = engine(Scheme::Fahe2, 3);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let a = engine.encrypt(&BigUint::from(1000u32), &mut rng).unwrap();
        let b = engine.encrypt(&BigUint::from(2345u32), &mut rng).unwrap();
        assert_eq!(
            engine.decrypt(&engine.add(&a, &b)).unwrap(),
            BigUint::from(3345u32)
        );
    }

    #[test]
    fn generated_messages_respect_msg_size() {
        let engine = engine(Scheme::Fahe1, 5);
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let bound = BigUint::one() << 10u32;
        for _ in 0..100 {
            assert!(engine.generate_message(&mut rng) < bound);
        }
    }

    #[test]
    fn display_shows_parameters_only() {
        let engine = engine(Scheme::Fahe2, 7);
        let summary = engine.to_string();
        assert_eq!(
            summary,
            "FAHE2 (lambda=64, m_max=16, alpha=6, msg_size=10, num_additions=32)"
        );
        assert!(!summary.contains(&engine.key().p().to_string()));
    }
}
