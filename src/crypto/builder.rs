use super::{FaheEngine, FaheError, FaheResult};
use crate::keys::SecretKey;
use crate::math::primes::{DEFAULT_MR_ROUNDS, PrimeConfig};
use crate::params::{FaheParams, Preset, Scheme};
use rand::Rng;

/// Collects parameters and runs key generation for a [`FaheEngine`].
///
/// Unset values fall back to [`FaheParams::default`], safe primes and
/// [`DEFAULT_MR_ROUNDS`] Miller-Rabin rounds.
#[derive(Debug, Clone, Default)]
pub struct FaheEngineBuilder {
    lambda: Option<u32>,
    m_max: Option<u32>,
    alpha: Option<u32>,
    msg_size: Option<u32>,
    safe_prime: Option<bool>,
    primality_rounds: Option<u32>,
}

impl FaheEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lambda(mut self, lambda: u32) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn m_max(mut self, m_max: u32) -> Self {
        self.m_max = Some(m_max);
        self
    }

    pub fn alpha(mut self, alpha: u32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn msg_size(mut self, msg_size: u32) -> Self {
        self.msg_size = Some(msg_size);
        self
    }

    /// Whether `p` must be a safe prime (`(p-1)/2` also prime).
    pub fn safe_prime(mut self, safe: bool) -> Self {
        self.safe_prime = Some(safe);
        self
    }

    pub fn primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = Some(rounds);
        self
    }

    /// Sets all four scheme parameters at once.
    pub fn params(mut self, params: FaheParams) -> Self {
        self.lambda = Some(params.lambda);
        self.m_max = Some(params.m_max);
        self.alpha = Some(params.alpha);
        self.msg_size = Some(params.msg_size);
        self
    }

    /// Sets the parameters of a named preset. The scheme is still chosen at build time.
    pub fn preset(self, preset: Preset) -> Self {
        self.params(preset.params())
    }

    fn resolve(&self) -> FaheResult<(FaheParams, PrimeConfig)> {
        let defaults = FaheParams::default();
        let params = FaheParams {
            lambda: self.lambda.unwrap_or(defaults.lambda),
            m_max: self.m_max.unwrap_or(defaults.m_max),
            alpha: self.alpha.unwrap_or(defaults.alpha),
            msg_size: self.msg_size.unwrap_or(defaults.msg_size),
        };
        params.validate()?;

        let prime = PrimeConfig {
            safe: self.safe_prime.unwrap_or(true),
            rounds: self.primality_rounds.unwrap_or(DEFAULT_MR_ROUNDS),
        };
        if prime.rounds == 0 {
            return Err(FaheError::invalid("primality_rounds must be at least 1"));
        }
        Ok((params, prime))
    }

    pub fn build<R: Rng + ?Sized>(self, scheme: Scheme, rng: &mut R) -> FaheResult<FaheEngine> {
        let (params, prime) = self.resolve()?;
        let key = SecretKey::generate(scheme, &params, &prime, rng)?;
        Ok(FaheEngine::new(key))
    }

    pub fn build_fahe1<R: Rng + ?Sized>(self, rng: &mut R) -> FaheResult<FaheEngine> {
        self.build(Scheme::Fahe1, rng)
    }

    pub fn build_fahe2<R: Rng + ?Sized>(self, rng: &mut R) -> FaheResult<FaheEngine> {
        self.build(Scheme::Fahe2, rng)
    }
}
