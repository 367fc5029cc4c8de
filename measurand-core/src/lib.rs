//! Measurand Core - Fundamental types
//!
//! This crate provides the core types used throughout measurand:
//! - `Number`: Arbitrary precision decimal numbers
//! - `QuantityValue`: The numeric payload of a quantity (f64 or decimal)
//! - `Culture`: Locale conventions for parsing numbers and scoping abbreviations
//! - `QuantityError`: Errors with machine-readable codes

mod number;
mod value;
mod culture;
mod error;

pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use value::{QuantityValue, ValueType};
pub use culture::Culture;
pub use error::{QuantityError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Culture, Number, QuantityError, QuantityValue, ValueType};
    pub use crate::error::codes;
}
