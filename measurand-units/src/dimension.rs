//! Base-dimension vectors
//!
//! Each quantity kind has a fixed signature of exponents over the 7 SI base
//! dimensions: [length, mass, time, current, temperature, amount, luminosity].
//! Kinds are grouped by equality of this vector; no algebra is done on it.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Exponents of the 7 SI base dimensions for one quantity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseDimensions {
    /// [length, mass, time, current, temperature, amount, luminosity]
    pub exponents: [i8; 7],
}

impl BaseDimensions {
    /// Dimensionless (angles, ratios, counts)
    pub const NONE: BaseDimensions = BaseDimensions::new([0, 0, 0, 0, 0, 0, 0]);

    /// [L]
    pub const LENGTH: BaseDimensions = BaseDimensions::new([1, 0, 0, 0, 0, 0, 0]);

    /// [M]
    pub const MASS: BaseDimensions = BaseDimensions::new([0, 1, 0, 0, 0, 0, 0]);

    /// [T]
    pub const TIME: BaseDimensions = BaseDimensions::new([0, 0, 1, 0, 0, 0, 0]);

    /// [Θ]
    pub const TEMPERATURE: BaseDimensions = BaseDimensions::new([0, 0, 0, 0, 1, 0, 0]);

    /// [L T^-1]
    pub const VELOCITY: BaseDimensions = BaseDimensions::new([1, 0, -1, 0, 0, 0, 0]);

    pub const fn new(exponents: [i8; 7]) -> Self {
        BaseDimensions { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    pub fn length(&self) -> i8 {
        self.exponents[0]
    }

    pub fn mass(&self) -> i8 {
        self.exponents[1]
    }

    pub fn time(&self) -> i8 {
        self.exponents[2]
    }

    pub fn current(&self) -> i8 {
        self.exponents[3]
    }

    pub fn temperature(&self) -> i8 {
        self.exponents[4]
    }

    pub fn amount(&self) -> i8 {
        self.exponents[5]
    }

    pub fn luminosity(&self) -> i8 {
        self.exponents[6]
    }
}

impl fmt::Display for BaseDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["L", "M", "T", "I", "Θ", "N", "J"];
        let parts: Vec<String> = self.exponents.iter()
            .zip(names)
            .filter(|(exp, _)| **exp != 0)
            .map(|(&exp, name)| if exp == 1 { name.to_string() } else { format!("{}^{}", name, exp) })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for BaseDimensions {
    fn default() -> Self {
        Self::NONE
    }
}
