//! Decimal numbers for conversion arithmetic
//!
//! Backed by dashu-float's DBig. Conversion factors are stored exactly
//! (e.g. "0.3048", "5/9") and decimal-valued quantities are converted
//! without going through binary floating point.

use dashu_float::DBig;
use dashu_int::IBig;
use dashu_int::ops::BitTest;
use serde::{Deserialize, Serialize, Serializer, Deserializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Not a finite number: {0}")]
    NonFinite(f64),

    #[error("Overflow: {0} does not fit in f64")]
    Overflow(String),
}

/// Default working precision (decimal digits)
pub const DEFAULT_PRECISION: usize = 50;

/// Arbitrary precision decimal number
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(DEFAULT_PRECISION).value()
    }

    /// Parse an invariant-culture decimal string.
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Exact ratios like "5/9" or "1/3600"
        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = Self::from_str(num_str)?;
            let den = Self::from_str(den_str)?;
            return num.checked_div(&den);
        }

        // Scientific notation with an integer mantissa: "602214076e15"
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let s_lower = s.to_lowercase();
            if let Some((mantissa, exp)) = s_lower.split_once('e') {
                let mantissa: IBig = mantissa.trim_start_matches('+').parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = exp.trim_start_matches('+').parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let result = DBig::from_parts(mantissa, exp);
                return Ok(Self { inner: Self::with_work_precision(result) });
            }
        }

        let inner: DBig = s.trim_start_matches('+').parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create from f64. NaN and infinities are rejected.
    ///
    /// Goes through the shortest round-trip decimal rendering of the float,
    /// so `0.1` becomes exactly `0.1` rather than its binary expansion.
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite(f));
        }
        if f == 0.0 {
            return Ok(Self::from_i64(0));
        }
        Self::from_str(&format!("{}", f))
    }

    /// Re-round to the given number of significant decimal digits
    pub fn with_precision(&self, digits: usize) -> Self {
        Self { inner: self.inner.clone().with_precision(digits.max(1)).value() }
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.inner == DBig::ONE
    }

    // ========== Arithmetic ==========

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Absolute difference relative to the larger magnitude, for tolerance checks
    pub fn relative_difference(&self, other: &Self) -> Option<f64> {
        let a = self.to_f64()?;
        let b = other.to_f64()?;
        let scale = a.abs().max(b.abs());
        if scale == 0.0 {
            return Some(0.0);
        }
        Some((a - b).abs() / scale)
    }

    // ========== Conversion ==========

    /// Convert to f64 (may lose precision). None when out of f64 range.
    pub fn to_f64(&self) -> Option<f64> {
        // DBig is significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            match TryInto::<i64>::try_into(significand.clone()) {
                Ok(i) => i as f64,
                Err(_) => return None,
            }
        } else {
            // Shift into 53 bits and scale back up by the dropped bits
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            shifted_i64 as f64 * 2_f64.powi(extra_bits as i32)
        };

        let result = match exponent {
            0 => sig_f64,
            1..=308 => sig_f64 * 10_f64.powi(exponent as i32),
            -308..=-1 => sig_f64 / 10_f64.powi((-exponent) as i32),
            // Long significands can push tiny values past -308; split the scaling
            -616..=-309 => sig_f64 / 10_f64.powi(308) / 10_f64.powi((-exponent - 308) as i32),
            _ => return None,
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    /// Like `to_f64`, but reports an overflow instead of returning None
    pub fn try_to_f64(&self) -> Result<f64, NumberError> {
        self.to_f64().ok_or_else(|| NumberError::Overflow(self.inner.to_string()))
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
