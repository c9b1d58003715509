//! FAHE1 key: the message sits directly above a single `rho`-bit noise band.
//!
//! Packed layout before blinding, from the least significant bit:
//! `[ noise: rho | headroom: alpha | message: m_max ]`
use super::common::KeyMaterial;
use crate::crypto::FaheResult;
use crate::math::primes::PrimeConfig;
use crate::math::sampling::random_bits;
use crate::math::utils::shift_amount;
use crate::params::{FaheParams, NoiseLayout, Scheme};
use num_bigint::BigUint;
use rand::Rng;

#[derive(Debug)]
pub struct Fahe1Key {
    params: FaheParams,
    layout: NoiseLayout,
    material: KeyMaterial,
}

impl Fahe1Key {
    pub fn generate<R: Rng + ?Sized>(
        params: &FaheParams,
        prime: &PrimeConfig,
        rng: &mut R,
    ) -> FaheResult<Self> {
        let layout = NoiseLayout::derive(Scheme::Fahe1, params)?;
        let material = KeyMaterial::generate(&layout, prime, rng)?;
        Ok(Self {
            params: *params,
            layout,
            material,
        })
    }

    pub fn params(&self) -> &FaheParams {
        &self.params
    }

    pub fn layout(&self) -> &NoiseLayout {
        &self.layout
    }

    pub fn p(&self) -> &BigUint {
        self.material.p()
    }

    pub fn x(&self) -> &BigUint {
        self.material.x()
    }

    /// Bit offset of the message inside the packed value: `rho + alpha`.
    pub fn message_offset(&self) -> FaheResult<u32> {
        shift_amount(&[self.layout.rho, self.params.alpha], "fahe1 message offset")
    }

    /// `M = (message << (rho + alpha)) + noise`, with `noise < 2^rho`.
    pub(crate) fn pack<R: Rng + ?Sized>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> FaheResult<BigUint> {
        let noise = random_bits(u64::from(self.layout.rho), rng);
        Ok((message << self.message_offset()?) + noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::mask_bits;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn key(seed: u64) -> Fahe1Key {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let prime = PrimeConfig {
            safe: false,
            rounds: 20,
        };
        Fahe1Key::generate(&FaheParams::new(128, 32, 6, 32), &prime, &mut rng).unwrap()
    }

    #[test]
    fn key_shape_follows_parameters() {
        let key = key(0);
        assert_eq!(key.layout().rho, 128);
        assert_eq!(key.layout().eta, 172);
        assert_eq!(key.p().bits(), 172);
        assert_eq!(key.message_offset().unwrap(), 134);
    }

    #[test]
    fn packed_value_keeps_message_band_intact() {
        let key = key(1);
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let message = BigUint::from(0xdead_beefu32);
        for _ in 0..20 {
            let packed = key.pack(&message, &mut rng).unwrap();
            assert!(&packed < key.p());
            let recovered = mask_bits(packed >> 134u32, 32);
            assert_eq!(recovered, message);
        }
    }

    #[test]
    fn packing_draws_fresh_noise() {
        let key = key(3);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let message = BigUint::from(7u32);
        let a = key.pack(&message, &mut rng).unwrap();
        let b = key.pack(&message, &mut rng).unwrap();
        assert_ne!(a, b);
    }
}
