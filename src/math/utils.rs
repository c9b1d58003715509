use crate::crypto::{FaheError, FaheResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Returns `2^exp`.
pub fn pow2(exp: u32) -> BigUint {
    BigUint::one() << exp
}

/// Clears every bit at position `>= bits`.
pub fn mask_bits(value: BigUint, bits: u32) -> BigUint {
    if value.bits() <= u64::from(bits) {
        return value;
    }
    value & (pow2(bits) - 1u32)
}

/// Exact `floor(2^exp / divisor)`.
pub fn floor_div_pow2(exp: u32, divisor: &BigUint) -> FaheResult<BigUint> {
    if divisor.is_zero() {
        return Err(FaheError::ArithmeticFailure {
            operation: "division by zero modulus",
        });
    }
    Ok(pow2(exp) / divisor)
}

/// Sums bit offsets, reporting overflow instead of wrapping.
pub fn shift_amount(parts: &[u32], operation: &'static str) -> FaheResult<u32> {
    parts
        .iter()
        .try_fold(0u32, |acc, &part| acc.checked_add(part))
        .ok_or(FaheError::ArithmeticFailure { operation })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow2_has_expected_width() {
        assert_eq!(pow2(0), BigUint::one());
        assert_eq!(pow2(10), BigUint::from(1024u32));
        assert_eq!(pow2(300).bits(), 301);
    }

    #[test]
    fn mask_bits_clears_high_bits() {
        let value = BigUint::from(0b1011_0110u32);
        assert_eq!(mask_bits(value.clone(), 4), BigUint::from(0b0110u32));
        assert_eq!(mask_bits(value.clone(), 8), value);
        assert_eq!(mask_bits(value.clone(), 64), value);
        assert_eq!(mask_bits(value, 0), BigUint::zero());
    }

    #[test]
    fn mask_bits_handles_wide_values() {
        let value = (pow2(500) - 1u32) << 3;
        let masked = mask_bits(value, 32);
        assert_eq!(masked, BigUint::from(u32::MAX - 7));
    }

    #[test]
    fn floor_div_pow2_is_exact() {
        assert_eq!(
            floor_div_pow2(10, &BigUint::from(7u32)).unwrap(),
            BigUint::from(146u32)
        );
        let divisor = pow2(100) + 1u32;
        let quotient = floor_div_pow2(4000, &divisor).unwrap();
        assert!(&quotient * &divisor <= pow2(4000));
        assert!((&quotient + 1u32) * &divisor > pow2(4000));
    }

    #[test]
    fn floor_div_pow2_rejects_zero_divisor() {
        assert!(matches!(
            floor_div_pow2(10, &BigUint::zero()),
            Err(FaheError::ArithmeticFailure { .. })
        ));
    }

    #[test]
    fn shift_amount_detects_overflow() {
        assert_eq!(shift_amount(&[3, 4, 5], "test").unwrap(), 12);
        assert!(shift_amount(&[u32::MAX, 1], "test").is_err());
    }
}
