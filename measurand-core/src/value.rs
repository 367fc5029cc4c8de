//! Numeric payload of a quantity
//!
//! Most kinds carry an `f64`. Kinds where exactness matters (e.g. data sizes)
//! carry a decimal `Number` instead; conversions then stay in decimal.

use crate::{Number, NumberError, QuantityError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which representation a kind stores its values in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Double,
    Decimal,
}

/// The numeric value of a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum QuantityValue {
    Double(f64),
    Decimal(Number),
}

impl QuantityValue {
    /// Zero in the given representation
    pub fn zero(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Double => QuantityValue::Double(0.0),
            ValueType::Decimal => QuantityValue::Decimal(Number::from_i64(0)),
        }
    }

    /// Parse an invariant-culture numeric string into the given representation
    pub fn parse_as(value_type: ValueType, text: &str) -> Result<Self, QuantityError> {
        match value_type {
            ValueType::Double => {
                let f: f64 = text.parse().map_err(|_| QuantityError::MalformedNumber {
                    text: text.to_string(),
                    culture: String::new(),
                })?;
                QuantityValue::Double(f).ensure_finite()
            }
            ValueType::Decimal => Number::from_str(text)
                .map(QuantityValue::Decimal)
                .map_err(|_| QuantityError::MalformedNumber {
                    text: text.to_string(),
                    culture: String::new(),
                }),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            QuantityValue::Double(_) => ValueType::Double,
            QuantityValue::Decimal(_) => ValueType::Decimal,
        }
    }

    /// Fails with `NonFiniteValue` for NaN and infinities
    pub fn ensure_finite(self) -> Result<Self, QuantityError> {
        match self {
            QuantityValue::Double(f) if !f.is_finite() => Err(QuantityError::NonFiniteValue(f)),
            other => Ok(other),
        }
    }

    /// Value as f64. None if a decimal does not fit.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QuantityValue::Double(f) => Some(*f),
            QuantityValue::Decimal(n) => n.to_f64(),
        }
    }

    /// Value as a decimal Number
    pub fn to_number(&self) -> Result<Number, NumberError> {
        match self {
            QuantityValue::Double(f) => Number::from_f64(*f),
            QuantityValue::Decimal(n) => Ok(n.clone()),
        }
    }

    /// Convert into another representation
    pub fn coerce(self, value_type: ValueType) -> Result<Self, QuantityError> {
        match (self, value_type) {
            (QuantityValue::Double(f), ValueType::Decimal) => {
                if !f.is_finite() {
                    return Err(QuantityError::NonFiniteValue(f));
                }
                Ok(QuantityValue::Decimal(Number::from_f64(f)?))
            }
            (QuantityValue::Decimal(n), ValueType::Double) => {
                let f = n.try_to_f64()?;
                Ok(QuantityValue::Double(f))
            }
            (same, _) => same.ensure_finite(),
        }
    }
}

impl From<f64> for QuantityValue {
    fn from(f: f64) -> Self {
        QuantityValue::Double(f)
    }
}

impl From<i32> for QuantityValue {
    fn from(i: i32) -> Self {
        QuantityValue::Double(f64::from(i))
    }
}

impl From<Number> for QuantityValue {
    fn from(n: Number) -> Self {
        QuantityValue::Decimal(n)
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Double(v) => write!(f, "{}", v),
            QuantityValue::Decimal(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(QuantityValue::zero(ValueType::Double), QuantityValue::Double(0.0));
        assert_eq!(
            QuantityValue::zero(ValueType::Decimal),
            QuantityValue::Decimal(Number::from_i64(0))
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert!(QuantityValue::Double(1.5).ensure_finite().is_ok());
        assert!(matches!(
            QuantityValue::Double(f64::NAN).ensure_finite(),
            Err(QuantityError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn test_coerce_double_to_decimal() {
        let v = QuantityValue::Double(2.5).coerce(ValueType::Decimal).unwrap();
        assert_eq!(v, QuantityValue::Decimal(Number::from_str("2.5").unwrap()));

        let err = QuantityValue::Double(f64::INFINITY).coerce(ValueType::Decimal);
        assert!(matches!(err, Err(QuantityError::NonFiniteValue(_))));
    }

    #[test]
    fn test_coerce_decimal_to_double() {
        let v = QuantityValue::Decimal(Number::from_i64(8)).coerce(ValueType::Double).unwrap();
        assert_eq!(v, QuantityValue::Double(8.0));
    }

    #[test]
    fn test_parse_as() {
        assert_eq!(
            QuantityValue::parse_as(ValueType::Double, "1.5").unwrap(),
            QuantityValue::Double(1.5)
        );
        assert!(matches!(
            QuantityValue::parse_as(ValueType::Double, "1e999"),
            Err(QuantityError::NonFiniteValue(_))
        ));
        assert_eq!(
            QuantityValue::parse_as(ValueType::Decimal, "1024").unwrap(),
            QuantityValue::Decimal(Number::from_i64(1024))
        );
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let json = serde_json::to_string(&QuantityValue::Double(1.5)).unwrap();
        assert_eq!(json, r#"{"type":"Double","value":1.5}"#);
    }
}
