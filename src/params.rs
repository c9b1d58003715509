//! Scheme parameters and the noise layout derived from them.
//!
//! Both FAHE variants are driven by the same four inputs:
//! - `lambda`: security parameter, governs the noise width
//! - `m_max`: maximum plaintext width in bits
//! - `alpha`: noise headroom, allows `2^(alpha-1)` homomorphic additions
//! - `msg_size`: width of generated test messages
//!
//! From these, each variant derives `rho` (noise width), `eta` (prime width)
//! and `gamma` (exponent of the blinding bound `X = floor(2^gamma / p)`).
use crate::crypto::{FaheError, FaheResult};
use num_bigint::BigUint;
use num_traits::One;
use std::fmt;

/// Which of the two FAHE variants a key or engine implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Message sits directly above a single `rho`-bit noise band.
    Fahe1,
    /// Message sits between two noise bands at a random offset `pos`.
    Fahe2,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Fahe1 => write!(f, "FAHE1"),
            Scheme::Fahe2 => write!(f, "FAHE2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaheParams {
    pub lambda: u32,
    pub m_max: u32,
    pub alpha: u32,
    pub msg_size: u32,
}

impl FaheParams {
    pub fn new(lambda: u32, m_max: u32, alpha: u32, msg_size: u32) -> Self {
        Self {
            lambda,
            m_max,
            alpha,
            msg_size,
        }
    }

    pub fn validate(&self) -> FaheResult<()> {
        if self.lambda <= 1 {
            return Err(FaheError::invalid(format!(
                "lambda must be greater than 1, got {}",
                self.lambda
            )));
        }
        if self.alpha < 1 {
            return Err(FaheError::invalid("alpha must be at least 1"));
        }
        if self.m_max < 1 {
            return Err(FaheError::invalid("m_max must be at least 1"));
        }
        if self.msg_size > self.m_max {
            return Err(FaheError::invalid(format!(
                "msg_size {} exceeds m_max {}",
                self.msg_size, self.m_max
            )));
        }
        Ok(())
    }

    /// Advisory bound on homomorphic additions: `2^(alpha-1)`.
    pub fn num_additions(&self) -> BigUint {
        BigUint::one() << self.alpha.saturating_sub(1)
    }
}

impl Default for FaheParams {
    fn default() -> Self {
        Preset::Fahe1Minimum.params()
    }
}

/// Bit widths derived from [`FaheParams`] for one scheme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseLayout {
    pub rho: u32,
    pub eta: u32,
    pub gamma: u32,
}

impl NoiseLayout {
    /// Derives `rho`, `eta` and `gamma` for `scheme`.
    ///
    /// `gamma = floor(rho / log2(rho) * (eta - rho)^2)` is evaluated in
    /// double precision and truncated, so that keys are reproducible against
    /// other implementations of the scheme.
    pub fn derive(scheme: Scheme, params: &FaheParams) -> FaheResult<Self> {
        params.validate()?;
        let overflow = || FaheError::invalid("derived bit width overflows u32");

        let (rho, eta) = match scheme {
            Scheme::Fahe1 => {
                let rho = params.lambda;
                let eta = params
                    .alpha
                    .checked_mul(2)
                    .and_then(|a| a.checked_add(rho))
                    .and_then(|e| e.checked_add(params.m_max))
                    .ok_or_else(overflow)?;
                (rho, eta)
            }
            Scheme::Fahe2 => {
                let rho = params
                    .lambda
                    .checked_add(params.alpha)
                    .and_then(|r| r.checked_add(params.m_max))
                    .ok_or_else(overflow)?;
                let eta = rho.checked_add(params.alpha).ok_or_else(overflow)?;
                (rho, eta)
            }
        };

        let rho_f = rho as f64;
        let spread = (eta - rho) as f64;
        let gamma_f = rho_f / rho_f.log2() * (spread * spread);
        if !gamma_f.is_finite() || gamma_f < 0.0 || gamma_f > u32::MAX as f64 {
            return Err(FaheError::invalid(format!(
                "gamma {gamma_f} is not representable"
            )));
        }

        Ok(Self {
            rho,
            eta,
            gamma: gamma_f as u32,
        })
    }
}

/// Named parameter sets exercised by the reference additivity suite.
///
/// "Classical" sets use `lambda = 128`, "quantum" sets `lambda = 256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Fahe1Minimum,
    Fahe2Minimum,
    Fahe1QuantumSmallMsgSmallAlpha,
    Fahe2QuantumSmallMsgSmallAlpha,
    Fahe1ClassicalLongMsgSmallAlpha,
    Fahe2ClassicalLongMsgSmallAlpha,
    Fahe1QuantumLongMsgSmallAlpha,
    Fahe2QuantumLongMsgSmallAlpha,
    Fahe1ClassicalSmallMsgHighAlpha,
    Fahe2ClassicalSmallMsgHighAlpha,
    Fahe1QuantumSmallMsgHighAlpha,
    Fahe2QuantumSmallMsgHighAlpha,
    Fahe1ClassicalLongMsgHighAlpha,
    Fahe2ClassicalLongMsgHighAlpha,
    Fahe1QuantumLongMsgHighAlpha,
    Fahe2QuantumLongMsgHighAlpha,
}

impl Preset {
    pub const ALL: [Preset; 16] = [
        Preset::Fahe1Minimum,
        Preset::Fahe2Minimum,
        Preset::Fahe1QuantumSmallMsgSmallAlpha,
        Preset::Fahe2QuantumSmallMsgSmallAlpha,
        Preset::Fahe1ClassicalLongMsgSmallAlpha,
        Preset::Fahe2ClassicalLongMsgSmallAlpha,
        Preset::Fahe1QuantumLongMsgSmallAlpha,
        Preset::Fahe2QuantumLongMsgSmallAlpha,
        Preset::Fahe1ClassicalSmallMsgHighAlpha,
        Preset::Fahe2ClassicalSmallMsgHighAlpha,
        Preset::Fahe1QuantumSmallMsgHighAlpha,
        Preset::Fahe2QuantumSmallMsgHighAlpha,
        Preset::Fahe1ClassicalLongMsgHighAlpha,
        Preset::Fahe2ClassicalLongMsgHighAlpha,
        Preset::Fahe1QuantumLongMsgHighAlpha,
        Preset::Fahe2QuantumLongMsgHighAlpha,
    ];

    // Generated messages stay a few bits under m_max so that sums of
    // several of them keep fitting the message band.
    const MSG_SIZE: u32 = 28;

    pub fn scheme(&self) -> Scheme {
        use Preset::*;
        match self {
            Fahe1Minimum
            | Fahe1QuantumSmallMsgSmallAlpha
            | Fahe1ClassicalLongMsgSmallAlpha
            | Fahe1QuantumLongMsgSmallAlpha
            | Fahe1ClassicalSmallMsgHighAlpha
            | Fahe1QuantumSmallMsgHighAlpha
            | Fahe1ClassicalLongMsgHighAlpha
            | Fahe1QuantumLongMsgHighAlpha => Scheme::Fahe1,
            _ => Scheme::Fahe2,
        }
    }

    pub fn params(&self) -> FaheParams {
        use Preset::*;
        let (lambda, m_max, alpha) = match self {
            Fahe1Minimum => (128, 32, 6),
            Fahe2Minimum => (128, 32, 29),
            Fahe1QuantumSmallMsgSmallAlpha => (256, 32, 6),
            Fahe2QuantumSmallMsgSmallAlpha => (256, 32, 22),
            Fahe1ClassicalLongMsgSmallAlpha => (128, 64, 6),
            Fahe2ClassicalLongMsgSmallAlpha => (128, 64, 29),
            Fahe1QuantumLongMsgSmallAlpha => (256, 64, 6),
            Fahe2QuantumLongMsgSmallAlpha => (256, 64, 21),
            Fahe1ClassicalSmallMsgHighAlpha | Fahe2ClassicalSmallMsgHighAlpha => {
                (128, 32, 33)
            }
            Fahe1QuantumSmallMsgHighAlpha | Fahe2QuantumSmallMsgHighAlpha => {
                (256, 32, 33)
            }
            Fahe1ClassicalLongMsgHighAlpha | Fahe2ClassicalLongMsgHighAlpha => {
                (128, 64, 33)
            }
            Fahe1QuantumLongMsgHighAlpha | Fahe2QuantumLongMsgHighAlpha => {
                (256, 64, 33)
            }
        };
        FaheParams::new(lambda, m_max, alpha, Self::MSG_SIZE)
    }
}
