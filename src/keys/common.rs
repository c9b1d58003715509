use crate::crypto::FaheResult;
use crate::math::primes::{PrimeConfig, generate_prime};
use crate::math::utils::floor_div_pow2;
use crate::params::NoiseLayout;
use num_bigint::BigUint;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// The secret modulus `p` and the blinding bound `X = floor(2^gamma / p)`.
///
/// Both variants own exactly one of each; dropping the key releases them.
pub struct KeyMaterial {
    pub(crate) p: BigUint,
    pub(crate) x: BigUint,
}

impl KeyMaterial {
    /// Draws an `eta`-bit prime and derives `X` by exact integer division.
    pub fn generate<R: Rng + ?Sized>(
        layout: &NoiseLayout,
        prime: &PrimeConfig,
        rng: &mut R,
    ) -> FaheResult<Self> {
        let p = generate_prime(layout.eta, prime, rng)?;
        let x = floor_div_pow2(layout.gamma, &p)?;
        debug!(
            p_bits = p.bits(),
            x_bits = x.bits(),
            gamma = layout.gamma,
            "key material derived"
        );
        Ok(Self { p, x })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("p_bits", &self.p.bits())
            .field("x_bits", &self.x.bits())
            .finish_non_exhaustive()
    }
}
