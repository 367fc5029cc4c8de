//! Errors raised by quantity construction, conversion and parsing
//!
//! Every variant carries the input that caused it. `code()` gives a stable
//! machine-readable identifier for callers that log or serialize errors.

use crate::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const UNREGISTERED_UNIT_TYPE: &str = "UNREGISTERED_UNIT_TYPE";
    pub const UNSUPPORTED_CONVERSION: &str = "UNSUPPORTED_CONVERSION";
    pub const MALFORMED_NUMBER: &str = "MALFORMED_NUMBER";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const AMBIGUOUS_UNIT: &str = "AMBIGUOUS_UNIT";
    pub const NON_FINITE_VALUE: &str = "NON_FINITE_VALUE";
    pub const UNKNOWN_KIND: &str = "UNKNOWN_KIND";
    pub const INVALID_KIND: &str = "INVALID_KIND";
    pub const INVALID_SETTINGS: &str = "INVALID_SETTINGS";
    pub const NUMBER_ERROR: &str = "NUMBER_ERROR";
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    /// The unit tag's type is unknown, or the tag is outside its kind's declared set
    #[error("invalid unit {unit} of type {unit_type}")]
    InvalidUnit { unit_type: String, unit: String },

    /// The unit tag's type belongs to no registered kind
    #[error("unit type {0} is not registered with any quantity kind")]
    UnregisteredUnitType(String),

    /// The unit is not declared for the kind being converted
    #[error("{kind} does not declare unit {unit}")]
    UnsupportedConversion { kind: String, unit: String },

    #[error("malformed number {text:?} for culture {culture:?}")]
    MalformedNumber { text: String, culture: String },

    #[error("no unit matches {text:?}{}", .kind.as_ref().map(|k| format!(" in {}", k)).unwrap_or_default())]
    UnknownUnit { text: String, kind: Option<String> },

    #[error("ambiguous unit {text:?}: matches {}; pass a quantity kind to disambiguate", .candidates.join(", "))]
    AmbiguousUnit { text: String, candidates: Vec<String> },

    #[error("value must be finite, got {0}")]
    NonFiniteValue(f64),

    #[error("no quantity kind named {0:?}")]
    UnknownKind(String),

    #[error("invalid quantity kind {kind}: {reason}")]
    InvalidKind { kind: String, reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}

impl QuantityError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            QuantityError::InvalidUnit { .. } => codes::INVALID_UNIT,
            QuantityError::UnregisteredUnitType(_) => codes::UNREGISTERED_UNIT_TYPE,
            QuantityError::UnsupportedConversion { .. } => codes::UNSUPPORTED_CONVERSION,
            QuantityError::MalformedNumber { .. } => codes::MALFORMED_NUMBER,
            QuantityError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            QuantityError::AmbiguousUnit { .. } => codes::AMBIGUOUS_UNIT,
            QuantityError::NonFiniteValue(_) => codes::NON_FINITE_VALUE,
            QuantityError::UnknownKind(_) => codes::UNKNOWN_KIND,
            QuantityError::InvalidKind { .. } => codes::INVALID_KIND,
            QuantityError::InvalidSettings(_) => codes::INVALID_SETTINGS,
            QuantityError::Number(_) => codes::NUMBER_ERROR,
        }
    }

    pub fn unknown_unit(text: &str, kind: Option<&str>) -> Self {
        QuantityError::UnknownUnit {
            text: text.to_string(),
            kind: kind.map(str::to_string),
        }
    }

    pub fn unsupported(kind: &str, unit: &str) -> Self {
        QuantityError::UnsupportedConversion {
            kind: kind.to_string(),
            unit: unit.to_string(),
        }
    }

    pub fn invalid_kind(kind: &str, reason: impl Into<String>) -> Self {
        QuantityError::InvalidKind {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}
