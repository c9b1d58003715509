//! Probable-prime generation for the secret modulus `p`.
//!
//! Candidates are drawn at the requested width with the top bit set, then
//! walked upward through a sieve of small odd primes (residues are updated
//! incrementally, so the walk only touches machine words). Survivors go
//! through Miller-Rabin with uniformly random bases: each round lets a
//! composite pass with probability at most 1/4, so 40 rounds bound the error
//! by 2^-80.
//!
//! For safe primes `p = 2q + 1` the walk keeps `p = 3 (mod 4)` and also sieves
//! out `p = 1 (mod s)`, since then `s` divides `q`.
//!
//! Values below 2^64 use a deterministic Miller-Rabin with a fixed base set.
//! Reference:
//! https://en.wikipedia.org/wiki/Miller%E2%80%93Rabin_primality_test
use crate::crypto::{FaheError, FaheResult};
use crate::math::sampling::{random_bits, random_exact_bits};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand::Rng;
use tracing::{debug, instrument};

// These bases are deterministic for all n < 318,665,857,834,031,151,167,461,
// which covers all u64 values.
// Source: https://miller-rabin.appspot.com/
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Number of small odd primes in the candidate sieve.
const SIEVE_SIZE: usize = 2048;

/// Largest offset walked from one random starting point before redrawing.
const MAX_DELTA: u64 = 1 << 24;

/// Widths up to this use the u64 path and skip the sieve, which would
/// otherwise reject the small primes it is made of.
const SMALL_PRIME_BITS: u32 = 32;

/// Default Miller-Rabin rounds: error probability at most 4^-40 = 2^-80.
pub const DEFAULT_MR_ROUNDS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeConfig {
    /// Require `(p - 1) / 2` to be prime as well.
    pub safe: bool,
    /// Miller-Rabin rounds for each large candidate.
    pub rounds: u32,
}

impl Default for PrimeConfig {
    fn default() -> Self {
        Self {
            safe: true,
            rounds: DEFAULT_MR_ROUNDS,
        }
    }
}

/// Computes `(a * b) mod modulus` using `u128` intermediate arithmetic.
fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Computes `base^exp mod modulus` via binary exponentiation.
fn mod_pow(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut acc = 1 % modulus;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    acc
}

/// Returns `(odd_part, power_of_two)` such that `n = odd_part * 2^power_of_two`.
fn decompose(n: u64) -> (u64, u32) {
    let r = n.trailing_zeros();
    (n >> r, r)
}

/// Returns `true` if `n` is prime using deterministic Miller-Rabin on `u64`.
pub fn is_prime(n: u64) -> bool {
    match n {
        0 | 1 => return false,
        2 | 3 => return true,
        _ if n & 1 == 0 => return false,
        _ => {}
    }

    let (d, r) = decompose(n - 1);
    'bases: for &a in MILLER_RABIN_BASES.iter() {
        if a >= n {
            continue;
        }
        let mut x = mod_pow(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..r {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'bases;
            }
        }
        return false;
    }
    true
}

/// Probabilistic primality test for arbitrary-precision integers.
///
/// Values that fit a `u64` are decided exactly; larger values run `rounds`
/// Miller-Rabin rounds with bases drawn uniformly from `[2, n - 2]`.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    if let Some(small) = n.to_u64() {
        return is_prime(small);
    }
    if n.is_even() {
        return false;
    }

    let n_minus_one = n - 1u32;
    let n_minus_two = n - 2u32;
    let two = BigUint::from(2u32);
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;

    'rounds: for _ in 0..rounds {
        let a = loop {
            let candidate = random_bits(n.bits(), rng);
            if candidate >= two && candidate <= n_minus_two {
                break candidate;
            }
        };
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'rounds;
            }
        }
        return false;
    }
    true
}

/// Returns the first `count` odd primes.
fn small_odd_primes(count: usize) -> Vec<u32> {
    (3u32..)
        .step_by(2)
        .filter(|&n| is_prime(u64::from(n)))
        .take(count)
        .collect()
}

/// Generates a probable prime of exactly `bits` bits.
///
/// With `config.safe`, the result is a safe prime `p = 2q + 1` with `q`
/// prime as well. The search redraws internally until it succeeds; it only
/// fails for widths that admit no such prime.
///
/// # Errors
///
/// Returns [`FaheError::KeyGenerationFailed`] if `bits < 2` (or `bits < 3`
/// for safe primes).
#[instrument(skip(config, rng), fields(safe = config.safe))]
pub fn generate_prime<R: Rng + ?Sized>(
    bits: u32,
    config: &PrimeConfig,
    rng: &mut R,
) -> FaheResult<BigUint> {
    let min_bits = if config.safe { 3 } else { 2 };
    if bits < min_bits {
        return Err(FaheError::KeyGenerationFailed {
            bits,
            reason: format!("no prime of this kind has fewer than {min_bits} bits"),
        });
    }
    if bits <= SMALL_PRIME_BITS {
        return Ok(generate_small_prime(bits, config.safe, rng));
    }

    let sieve = small_odd_primes(SIEVE_SIZE);
    let step = if config.safe { 4 } else { 2 };
    let mut tested = 0usize;

    loop {
        // Odd, and for safe primes 3 mod 4 so that q = (p - 1) / 2 stays odd.
        let mut base = random_exact_bits(u64::from(bits), rng) | BigUint::one();
        if config.safe {
            base |= BigUint::from(2u32);
        }
        let residues: Vec<u64> = sieve
            .iter()
            .map(|&s| (&base % s).to_u64().unwrap_or(0))
            .collect();

        let mut delta = 0u64;
        while delta <= MAX_DELTA {
            let sieved = sieve.iter().zip(&residues).any(|(&s, &r)| {
                let rem = (r + delta) % u64::from(s);
                rem == 0 || (config.safe && rem == 1)
            });
            if !sieved {
                let candidate = &base + delta;
                if candidate.bits() != u64::from(bits) {
                    break;
                }
                tested += 1;
                if passes(&candidate, config, rng) {
                    debug!(tested, "prime found");
                    return Ok(candidate);
                }
            }
            delta += step;
        }
    }
}

/// Runs a single cheap round on both `p` and `q` before the full rounds.
fn passes<R: Rng + ?Sized>(candidate: &BigUint, config: &PrimeConfig, rng: &mut R) -> bool {
    if !config.safe {
        return is_probable_prime(candidate, config.rounds, rng);
    }
    let half = candidate >> 1u32;
    is_probable_prime(candidate, 1, rng)
        && is_probable_prime(&half, 1, rng)
        && is_probable_prime(candidate, config.rounds, rng)
        && is_probable_prime(&half, config.rounds, rng)
}

fn generate_small_prime<R: Rng + ?Sized>(bits: u32, safe: bool, rng: &mut R) -> BigUint {
    loop {
        let candidate = random_exact_bits(u64::from(bits), rng)
            .to_u64()
            .unwrap_or(0);
        if is_prime(candidate) && (!safe || is_prime(candidate >> 1)) {
            return BigUint::from(candidate);
        }
    }
}
