use crate::crypto::{FaheError, FaheResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;

/// Samples a uniform integer below `2^bits` (the top bit may or may not be set).
pub fn random_bits<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }
    let byte_len = bits.div_ceil(8) as usize;
    let mut bytes = vec![0u8; byte_len];
    rng.fill_bytes(&mut bytes);

    // Clear the excess bits of the most significant byte.
    let excess = (byte_len as u64 * 8 - bits) as u32;
    if let Some(last) = bytes.last_mut() {
        *last &= 0xffu8 >> excess;
    }
    BigUint::from_bytes_le(&bytes)
}

/// Samples a uniform integer of exactly `bits` bits (top bit set).
pub fn random_exact_bits<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }
    random_bits(bits, rng) | (BigUint::one() << (bits - 1))
}

/// Samples uniformly from `[0, bound)` by rejection over `bound.bits()` bits.
///
/// Each draw is accepted with probability above one half, so the expected
/// number of draws is below two.
///
/// # Errors
///
/// Returns [`FaheError::InvalidParameter`] if `bound` is zero.
pub fn random_below<R: Rng + ?Sized>(
    bound: &BigUint,
    rng: &mut R,
) -> FaheResult<BigUint> {
    if bound.is_zero() {
        return Err(FaheError::invalid("random_below: bound must be positive"));
    }
    let bits = bound.bits();
    loop {
        let candidate = random_bits(bits, rng);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Samples a small integer uniformly from `[0, bound)`.
pub fn random_index_below<R: Rng + ?Sized>(
    bound: u32,
    rng: &mut R,
) -> FaheResult<u32> {
    if bound == 0 {
        return Err(FaheError::invalid(
            "random_index_below: bound must be positive",
        ));
    }
    Ok(rng.random_range(0..bound))
}

/// Generates a test message below `2^msg_size`.
pub fn generate_message<R: Rng + ?Sized>(msg_size: u32, rng: &mut R) -> BigUint {
    random_bits(u64::from(msg_size), rng)
}

/// Generates `count` independent test messages below `2^msg_size`.
pub fn generate_message_list<R: Rng + ?Sized>(
    msg_size: u32,
    count: usize,
    rng: &mut R,
) -> FaheResult<Vec<BigUint>> {
    let mut messages = Vec::new();
    messages
        .try_reserve_exact(count)
        .map_err(|_| FaheError::OutOfMemory { requested: count })?;
    for _ in 0..count {
        messages.push(generate_message(msg_size, rng));
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::pow2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn random_bits_stays_below_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for bits in [1u64, 7, 8, 9, 63, 64, 65, 129, 1000] {
            for _ in 0..50 {
                let value = random_bits(bits, &mut rng);
                assert!(value.bits() <= bits, "{bits}-bit sample too wide");
            }
        }
    }

    #[test]
    fn random_bits_zero_width_is_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert!(random_bits(0, &mut rng).is_zero());
        assert!(random_exact_bits(0, &mut rng).is_zero());
    }

    #[test]
    fn random_bits_top_bit_is_not_forced() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let narrower = (0..200)
            .filter(|_| random_bits(64, &mut rng).bits() < 64)
            .count();
        // About half of the samples leave the top bit clear.
        assert!(narrower > 50 && narrower < 150, "got {narrower}");
    }

    #[test]
    fn random_exact_bits_sets_top_bit() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        for bits in [1u64, 2, 17, 172, 344] {
            assert_eq!(random_exact_bits(bits, &mut rng).bits(), bits);
        }
    }

    #[test]
    fn random_below_stays_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let bound = pow2(130) + 12345u32;
        for _ in 0..200 {
            assert!(random_below(&bound, &mut rng).unwrap() < bound);
        }
        let one = BigUint::from(1u32);
        assert!(random_below(&one, &mut rng).unwrap().is_zero());
    }

    #[test]
    fn random_below_covers_small_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(19);
        let bound = BigUint::from(5u32);
        let mut seen = [0usize; 5];
        for _ in 0..5000 {
            let v = random_below(&bound, &mut rng).unwrap();
            seen[v.to_u32_digits().first().copied().unwrap_or(0) as usize] += 1;
        }
        for &count in &seen {
            assert!(
                (count as f64 - 1000.0).abs() < 150.0,
                "bucket count {count} too far from 1000"
            );
        }
    }

    #[test]
    fn random_below_rejects_zero_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(23);
        assert!(matches!(
            random_below(&BigUint::zero(), &mut rng),
            Err(FaheError::InvalidParameter { .. })
        ));
        assert!(random_index_below(0, &mut rng).is_err());
    }

    #[test]
    fn random_index_below_stays_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(29);
        for _ in 0..1000 {
            assert!(random_index_below(128, &mut rng).unwrap() < 128);
        }
    }

    #[test]
    fn message_list_has_requested_shape() {
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        let messages = generate_message_list(28, 64, &mut rng).unwrap();
        assert_eq!(messages.len(), 64);
        assert!(messages.iter().all(|m| m.bits() <= 28));
    }

    #[test]
    fn same_seed_same_messages() {
        let mut rng1 = ChaCha20Rng::seed_from_u64(42);
        let mut rng2 = ChaCha20Rng::seed_from_u64(42);
        assert_eq!(
            generate_message_list(32, 10, &mut rng1).unwrap(),
            generate_message_list(32, 10, &mut rng2).unwrap()
        );
    }
}
