//! Registry settings

use serde::{Deserialize, Serialize};
use measurand_core::{Culture, QuantityError, DEFAULT_PRECISION};

/// Settings shared by every catalog generation of one registry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Culture used when a parse call does not name one
    pub culture: Culture,
    /// Culture searched after the requested one, before invariant
    pub fallback_culture: Culture,
    /// Significant digits for decimal-valued conversions
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            culture: Culture::EN_US,
            fallback_culture: Culture::INVARIANT,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, QuantityError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| QuantityError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), QuantityError> {
        if self.precision == 0 {
            return Err(QuantityError::InvalidSettings("precision must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn with_fallback_culture(mut self, culture: Culture) -> Self {
        self.fallback_culture = culture;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}
