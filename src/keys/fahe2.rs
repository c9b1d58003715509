//! FAHE2 key: the message sits between two noise bands at a secret offset.
//!
//! Packed layout before blinding, from the least significant bit:
//! `[ low noise: pos | headroom: alpha | message: m_max | high noise: lambda - pos ]`
//!
//! `pos` is drawn once per key from `[0, lambda)`. Moving the message around
//! costs one extra noise draw per encryption.
use super::common::KeyMaterial;
use crate::crypto::FaheResult;
use crate::math::primes::PrimeConfig;
use crate::math::sampling::{random_bits, random_index_below};
use crate::math::utils::shift_amount;
use crate::params::{FaheParams, NoiseLayout, Scheme};
use num_bigint::BigUint;
use rand::Rng;
use std::fmt;

pub struct Fahe2Key {
    params: FaheParams,
    layout: NoiseLayout,
    material: KeyMaterial,
    pos: u32,
}

impl Fahe2Key {
    pub fn generate<R: Rng + ?Sized>(
        params: &FaheParams,
        prime: &PrimeConfig,
        rng: &mut R,
    ) -> FaheResult<Self> {
        let layout = NoiseLayout::derive(Scheme::Fahe2, params)?;
        let material = KeyMaterial::generate(&layout, prime, rng)?;
        let pos = random_index_below(params.lambda, rng)?;
        Ok(Self {
            params: *params,
            layout,
            material,
            pos,
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

    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Bit offset of the message inside the packed value: `pos + alpha`.
    pub fn message_offset(&self) -> FaheResult<u32> {
        shift_amount(&[self.pos, self.params.alpha], "fahe2 message offset")
    }

    /// `M = (high << (pos + m_max + alpha)) + (message << (pos + alpha)) + low`
    /// with `high < 2^(lambda - pos)` and `low < 2^pos`.
    pub(crate) fn pack<R: Rng + ?Sized>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> FaheResult<BigUint> {
        let offset = self.message_offset()?;
        let high_offset = shift_amount(&[offset, self.params.m_max], "fahe2 noise offset")?;

        let high = random_bits(u64::from(self.params.lambda - self.pos), rng);
        let low = random_bits(u64::from(self.pos), rng);
        Ok((high << high_offset) + (message << offset) + low)
    }
}

impl fmt::Debug for Fahe2Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pos` is secret: it locates the message inside the noise.
        f.debug_struct("Fahe2Key")
            .field("params", &self.params)
            .field("layout", &self.layout)
            .field("material", &self.material)
            .finish_non_exhaustive()
    }
}
