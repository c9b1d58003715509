//! FAHE encryption and decryption.
//!
//! Both variants share the same outer shape:
//! - encryption packs the message with fresh noise into `M < p`, then blinds
//!   it with a random multiple of the secret prime: `c = p*q + M`
//! - decryption reduces `c mod p`, shifts the message band down and masks it
//!   to `m_max` bits
//!
//! The variants differ only in how `M` is laid out, see [`crate::keys`].
use super::{Ciphertext, FaheError, FaheResult};
use crate::keys::SecretKey;
use crate::math::sampling::random_below;
use crate::math::utils::mask_bits;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;
use tracing::{info, instrument, trace};

/// Per-key values reused across encryptions of a batch.
pub(crate) struct EncryptionContext<'a> {
    key: &'a SecretKey,
    // q is drawn from [0, X + 1)
    q_bound: BigUint,
}

impl<'a> EncryptionContext<'a> {
    pub(crate) fn new(key: &'a SecretKey) -> Self {
        Self {
            key,
            q_bound: key.x() + BigUint::one(),
        }
    }

    pub(crate) fn encrypt<R: Rng + ?Sized>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> FaheResult<Ciphertext> {
        let q = random_below(&self.q_bound, rng)?;
        let packed = self.key.pack(message, rng)?;
        Ok(Ciphertext(self.key.p() * q + packed))
    }
}

/// Encrypts one message under `key`.
///
/// Messages wider than `m_max` bits are not rejected; only their low
/// `m_max` bits survive decryption.
pub fn encrypt<R: Rng + ?Sized>(
    key: &SecretKey,
    message: &BigUint,
    rng: &mut R,
) -> FaheResult<Ciphertext> {
    EncryptionContext::new(key).encrypt(message, rng)
}

/// Recovers the low `m_max` bits of the message (or of a sum of messages).
pub fn decrypt(key: &SecretKey, ciphertext: &Ciphertext) -> FaheResult<BigUint> {
    let p = key.p();
    if p.is_zero() {
        return Err(FaheError::ArithmeticFailure {
            operation: "reduction by zero modulus",
        });
    }
    let reduced = &ciphertext.0 % p;
    let shifted = reduced >> key.message_offset()?;
    Ok(mask_bits(shifted, key.params().m_max))
}

/// Encrypts `messages` in order, drawing fresh randomness for each element.
#[instrument(skip_all, fields(scheme = %key.scheme(), count = messages.len()))]
pub fn encrypt_list<R: Rng + ?Sized>(
    key: &SecretKey,
    messages: &[BigUint],
    rng: &mut R,
) -> FaheResult<Vec<Ciphertext>> {
    let mut out = Vec::new();
    out.try_reserve_exact(messages.len())
        .map_err(|_| FaheError::OutOfMemory {
            requested: messages.len(),
        })?;

    let ctx = EncryptionContext::new(key);
    for message in messages {
        out.push(ctx.encrypt(message, rng)?);
    }
    info!("batch encrypted");
    Ok(out)
}

/// Decrypts `ciphertexts` in order.
#[instrument(skip_all, fields(scheme = %key.scheme(), count = ciphertexts.len()))]
pub fn decrypt_list(key: &SecretKey, ciphertexts: &[Ciphertext]) -> FaheResult<Vec<BigUint>> {
    let mut out = Vec::new();
    out.try_reserve_exact(ciphertexts.len())
        .map_err(|_| FaheError::OutOfMemory {
            requested: ciphertexts.len(),
        })?;

    for ct in ciphertexts {
        out.push(decrypt(key, ct)?);
    }
    trace!("batch decrypted");
    Ok(out)
}
