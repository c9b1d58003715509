use super::FaheError;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// FAHE ciphertext: a single non-negative integer `c = p*q + M`.
///
/// Homomorphic addition is plain integer addition, so the `Add` family is
/// implemented directly. Decrypting a sum of `k` ciphertexts is only correct
/// while `k` stays within the key's addition budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Ciphertext(pub(crate) BigUint);

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// Bit length of the underlying integer.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<Ciphertext> for BigUint {
    fn from(ct: Ciphertext) -> Self {
        ct.0
    }
}

impl Add for Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: Ciphertext) -> Ciphertext {
        Ciphertext(self.0 + rhs.0)
    }
}

impl Add<&Ciphertext> for &Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        Ciphertext(&self.0 + &rhs.0)
    }
}

impl Add<&Ciphertext> for Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        Ciphertext(self.0 + &rhs.0)
    }
}

impl AddAssign<&Ciphertext> for Ciphertext {
    fn add_assign(&mut self, rhs: &Ciphertext) {
        self.0 += &rhs.0;
    }
}

impl AddAssign for Ciphertext {
    fn add_assign(&mut self, rhs: Ciphertext) {
        self.0 += rhs.0;
    }
}

impl Sum for Ciphertext {
    fn sum<I: Iterator<Item = Ciphertext>>(iter: I) -> Self {
        iter.fold(Ciphertext::default(), |acc, ct| acc + ct)
    }
}

impl<'a> Sum<&'a Ciphertext> for Ciphertext {
    fn sum<I: Iterator<Item = &'a Ciphertext>>(iter: I) -> Self {
        iter.fold(Ciphertext::default(), |acc, ct| acc + ct)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ciphertext {
    type Err = FaheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        BigUint::from_str(token)
            .map(Ciphertext)
            .map_err(|_| FaheError::Parse {
                index: 0,
                token: token.to_string(),
            })
    }
}
