//! Balanced quinary quantization.
//!
//! Continuous readings are folded onto five signed levels {-2,-1,0,1,2}
//! relative to a unit scale. Anything at or beyond `2 * unit` saturates.

use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// One of the five balanced quinary levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum QuinarySymbol {
    NegTwo = -2,
    NegOne = -1,
    #[default]
    Zero = 0,
    One = 1,
    Two = 2,
}

/// Largest magnitude a symbol can carry.
pub const MAX_LEVEL: i8 = 2;

impl QuinarySymbol {
    pub const ALL: [QuinarySymbol; 5] = [
        Self::NegTwo,
        Self::NegOne,
        Self::Zero,
        Self::One,
        Self::Two,
    ];

    #[inline]
    pub fn level(self) -> i8 {
        self as i8
    }

    /// Reconstructed value: `level * unit`.
    #[inline]
    pub fn scaled(self, unit: f64) -> f64 {
        f64::from(self.level()) * unit
    }

    pub fn is_saturated(self) -> bool {
        self.level().abs() == MAX_LEVEL
    }
}

impl TryFrom<i8> for QuinarySymbol {
    type Error = String;

    fn try_from(level: i8) -> Result<Self, Self::Error> {
        match level {
            -2 => Ok(Self::NegTwo),
            -1 => Ok(Self::NegOne),
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("{other} is outside the balanced quinary range")),
        }
    }
}

impl From<QuinarySymbol> for i8 {
    fn from(symbol: QuinarySymbol) -> i8 {
        symbol.level()
    }
}

impl Neg for QuinarySymbol {
    type Output = QuinarySymbol;

    fn neg(self) -> QuinarySymbol {
        match self {
            Self::NegTwo => Self::Two,
            Self::NegOne => Self::One,
            Self::Zero => Self::Zero,
            Self::One => Self::NegOne,
            Self::Two => Self::NegTwo,
        }
    }
}

impl fmt::Display for QuinarySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.level())
    }
}

// ---------------------------------------------------------------------------
// Rounding policy
// ---------------------------------------------------------------------------

/// Tie-breaking rule applied to `|value / unit|` before saturation.
///
/// Only exact half-unit ties differ: at `0.5 * unit` away-from-zero gives
/// level 1 while half-to-even gives 0. At `1.5 * unit` both give 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    #[default]
    HalfAwayFromZero,
    HalfToEven,
}

impl RoundingMode {
    #[inline]
    fn round(self, x: f64) -> f64 {
        match self {
            Self::HalfAwayFromZero => x.round(),
            Self::HalfToEven => x.round_ties_even(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quantizer
// ---------------------------------------------------------------------------

/// Quantize `value` against `unit` with half-away-from-zero rounding.
///
/// `unit` must be positive; callers validate it through
/// [`EstimatorConfig`](crate::config::EstimatorConfig).
#[inline]
pub fn quantize(value: f64, unit: f64) -> QuinarySymbol {
    quantize_with(value, unit, RoundingMode::HalfAwayFromZero)
}

/// Quantize with an explicit rounding policy.
///
/// `sign(raw) * min(2, round(|raw|))` where `raw = value / unit`.
/// NaN maps to `Zero`.
pub fn quantize_with(value: f64, unit: f64, mode: RoundingMode) -> QuinarySymbol {
    let raw = value / unit;
    if raw.is_nan() {
        return QuinarySymbol::Zero;
    }

    let magnitude = mode.round(raw.abs()).min(f64::from(MAX_LEVEL));
    let symbol = match magnitude as i8 {
        0 => QuinarySymbol::Zero,
        1 => QuinarySymbol::One,
        _ => QuinarySymbol::Two,
    };

    if raw < 0.0 {
        -symbol
    } else {
        symbol
    }
}
