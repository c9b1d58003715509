pub mod common;
pub mod fahe1;
pub mod fahe2;

pub use common::KeyMaterial;
pub use fahe1::Fahe1Key;
pub use fahe2::Fahe2Key;

use crate::crypto::FaheResult;
use crate::math::primes::PrimeConfig;
use crate::params::{FaheParams, NoiseLayout, Scheme};
use num_bigint::BigUint;
use rand::Rng;
use tracing::{info, instrument};

/// A key of either FAHE variant.
#[derive(Debug)]
pub enum SecretKey {
    Fahe1(Fahe1Key),
    Fahe2(Fahe2Key),
}

impl SecretKey {
    /// Runs key generation for `scheme`.
    #[instrument(skip(params, prime, rng), fields(lambda = params.lambda, m_max = params.m_max, alpha = params.alpha))]
    pub fn generate<R: Rng + ?Sized>(
        scheme: Scheme,
        params: &FaheParams,
        prime: &PrimeConfig,
        rng: &mut R,
    ) -> FaheResult<Self> {
        let key = match scheme {
            Scheme::Fahe1 => SecretKey::Fahe1(Fahe1Key::generate(params, prime, rng)?),
            Scheme::Fahe2 => SecretKey::Fahe2(Fahe2Key::generate(params, prime, rng)?),
        };
        let layout = key.layout();
        info!(
            rho = layout.rho,
            eta = layout.eta,
            gamma = layout.gamma,
            "{scheme} key generated"
        );
        Ok(key)
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            SecretKey::Fahe1(_) => Scheme::Fahe1,
            SecretKey::Fahe2(_) => Scheme::Fahe2,
        }
    }

    pub fn params(&self) -> &FaheParams {
        match self {
            SecretKey::Fahe1(key) => key.params(),
            SecretKey::Fahe2(key) => key.params(),
        }
    }

    pub fn layout(&self) -> &NoiseLayout {
        match self {
            SecretKey::Fahe1(key) => key.layout(),
            SecretKey::Fahe2(key) => key.layout(),
        }
    }

    pub fn p(&self) -> &BigUint {
        match self {
            SecretKey::Fahe1(key) => key.p(),
            SecretKey::Fahe2(key) => key.p(),
        }
    }

    pub fn x(&self) -> &BigUint {
        match self {
            SecretKey::Fahe1(key) => key.x(),
            SecretKey::Fahe2(key) => key.x(),
        }
    }

    /// Right shift applied after reduction mod `p` during decryption.
    pub fn message_offset(&self) -> FaheResult<u32> {
        match self {
            SecretKey::Fahe1(key) => key.message_offset(),
            SecretKey::Fahe2(key) => key.message_offset(),
        }
    }

    /// Packs `message` with fresh noise into the value that gets blinded.
    pub(crate) fn pack<R: Rng + ?Sized>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> FaheResult<BigUint> {
        match self {
            SecretKey::Fahe1(key) => key.pack(message, rng),
            SecretKey::Fahe2(key) => key.pack(message, rng),
        }
    }
}

impl From<Fahe1Key> for SecretKey {
    fn from(key: Fahe1Key) -> Self {
        SecretKey::Fahe1(key)
    }
}

impl From<Fahe2Key> for SecretKey {
    fn from(key: Fahe2Key) -> Self {
        SecretKey::Fahe2(key)
    }
}
