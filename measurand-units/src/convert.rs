//! Unit conversion engine
//!
//! Every declared unit of a kind has exactly one conversion entry relative to
//! the kind's base unit: a linear factor, or a custom function pair for units
//! that are not a pure scale of the base (offset temperatures, log scales).
//! A conversion goes `from -> base -> to`, each leg using its unit's entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use measurand_core::{Culture, Number, NumberError, QuantityError, QuantityValue};
use tracing::debug;
use crate::{Catalog, KindInfo, UnitKey, UnitType};

/// One leg of a custom conversion
pub type ConversionFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// How one unit relates to its kind's base unit
#[derive(Clone)]
pub enum Conversion {
    /// value_in_base = value * factor
    Linear { factor: Number, factor_f64: f64 },
    Custom { to_base: ConversionFn, from_base: ConversionFn },
}

impl Conversion {
    pub fn is_custom(&self) -> bool {
        matches!(self, Conversion::Custom { .. })
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Linear { factor, .. } => write!(f, "Linear({})", factor),
            Conversion::Custom { .. } => write!(f, "Custom"),
        }
    }
}

/// Conversion entries for one kind
#[derive(Debug, Clone)]
pub struct KindConversions {
    kind: &'static str,
    unit_type: UnitType,
    base_unit: UnitKey,
    entries: HashMap<&'static str, Conversion>,
}

impl KindConversions {
    /// Seed a linear entry for every declared unit
    pub(crate) fn for_kind(kind: &KindInfo) -> Result<Self, QuantityError> {
        let mut entries = HashMap::with_capacity(kind.units().len());
        for unit in kind.units() {
            let factor = unit.factor().clone();
            let factor_f64 = factor.try_to_f64()?;
            entries.insert(unit.name(), Conversion::Linear { factor, factor_f64 });
        }
        Ok(KindConversions {
            kind: kind.name(),
            unit_type: kind.unit_type(),
            base_unit: kind.base_unit(),
            entries,
        })
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn base_unit(&self) -> UnitKey {
        self.base_unit
    }

    /// The entry for a unit, or `UnsupportedConversion` if the kind does not declare it
    pub fn conversion(&self, unit: UnitKey) -> Result<&Conversion, QuantityError> {
        if unit.unit_type() != self.unit_type {
            return Err(QuantityError::unsupported(self.kind, &unit.to_string()));
        }
        self.entries
            .get(unit.name())
            .ok_or_else(|| QuantityError::unsupported(self.kind, unit.name()))
    }

    /// Replace a unit's entry with a custom function pair
    pub fn set_conversion_functions<F, G>(
        &mut self,
        unit: impl Into<UnitKey>,
        to_base: F,
        from_base: G,
    ) -> Result<(), QuantityError>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.set_custom(unit.into(), Arc::new(to_base), Arc::new(from_base))
    }

    pub(crate) fn set_custom(
        &mut self,
        unit: UnitKey,
        to_base: ConversionFn,
        from_base: ConversionFn,
    ) -> Result<(), QuantityError> {
        self.conversion(unit)?;
        debug!(kind = self.kind, unit = unit.name(), "custom conversion installed");
        self.entries.insert(unit.name(), Conversion::Custom { to_base, from_base });
        Ok(())
    }

    fn convert(
        &self,
        value: &QuantityValue,
        from: UnitKey,
        to: UnitKey,
        precision: usize,
    ) -> Result<QuantityValue, QuantityError> {
        let from_conv = self.conversion(from)?;
        let to_conv = self.conversion(to)?;
        if from == to {
            return Ok(value.clone());
        }

        match value {
            QuantityValue::Double(v) => {
                let base = match from_conv {
                    Conversion::Linear { factor_f64, .. } => v * factor_f64,
                    Conversion::Custom { to_base, .. } => to_base(*v),
                };
                let out = match to_conv {
                    Conversion::Linear { factor_f64, .. } => base / factor_f64,
                    Conversion::Custom { from_base, .. } => from_base(base),
                };
                QuantityValue::Double(out).ensure_finite()
            }
            QuantityValue::Decimal(n) => {
                let n = n.with_precision(precision);
                let base = match from_conv {
                    Conversion::Linear { factor, .. } => n.mul(factor),
                    Conversion::Custom { to_base, .. } => decimal_from_f64(to_base(n.try_to_f64()?))?,
                };
                let out = match to_conv {
                    Conversion::Linear { factor, .. } => base.checked_div(factor)?,
                    Conversion::Custom { from_base, .. } => decimal_from_f64(from_base(base.try_to_f64()?))?,
                };
                Ok(QuantityValue::Decimal(out))
            }
        }
    }
}

fn decimal_from_f64(f: f64) -> Result<Number, QuantityError> {
    Number::from_f64(f).map_err(|e| match e {
        NumberError::NonFinite(f) => QuantityError::NonFiniteValue(f),
        other => QuantityError::Number(other),
    })
}

/// Conversion tables for every kind of one catalog generation
#[derive(Clone)]
pub struct UnitConverter {
    kinds: HashMap<&'static str, KindConversions>,
    precision: usize,
}

impl UnitConverter {
    pub(crate) fn new(precision: usize) -> Self {
        UnitConverter { kinds: HashMap::new(), precision }
    }

    pub(crate) fn insert(&mut self, table: KindConversions) {
        self.kinds.insert(table.kind, table);
    }

    pub(crate) fn kind_mut(&mut self, kind: &str) -> Result<&mut KindConversions, QuantityError> {
        self.kinds.get_mut(kind).ok_or_else(|| QuantityError::UnknownKind(kind.to_string()))
    }

    /// Decimal working precision in significant digits
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The conversion table of one kind
    pub fn kind(&self, kind: &str) -> Result<&KindConversions, QuantityError> {
        self.kinds.get(kind).ok_or_else(|| QuantityError::UnknownKind(kind.to_string()))
    }

    /// Convert a value of `kind` between two of its units.
    /// Converting a unit to itself returns the value untouched.
    pub fn convert(
        &self,
        value: &QuantityValue,
        from: impl Into<UnitKey>,
        to: impl Into<UnitKey>,
        kind: &str,
    ) -> Result<QuantityValue, QuantityError> {
        self.kind(kind)?.convert(value, from.into(), to.into(), self.precision)
    }

    pub fn try_convert(
        &self,
        value: &QuantityValue,
        from: impl Into<UnitKey>,
        to: impl Into<UnitKey>,
        kind: &str,
    ) -> Option<QuantityValue> {
        self.convert(value, from, to, kind).ok()
    }

    /// f64 shorthand for `convert`
    pub fn convert_f64(
        &self,
        value: f64,
        from: impl Into<UnitKey>,
        to: impl Into<UnitKey>,
        kind: &str,
    ) -> Result<f64, QuantityError> {
        match self.convert(&QuantityValue::Double(value), from, to, kind)? {
            QuantityValue::Double(f) => Ok(f),
            QuantityValue::Decimal(n) => Ok(n.try_to_f64()?),
        }
    }

    /// Express a value in its kind's base unit
    pub fn to_base(
        &self,
        value: &QuantityValue,
        from: impl Into<UnitKey>,
        kind: &str,
    ) -> Result<QuantityValue, QuantityError> {
        let table = self.kind(kind)?;
        table.convert(value, from.into(), table.base_unit, self.precision)
    }

    pub fn base_unit(&self, kind: &str) -> Option<UnitKey> {
        self.kinds.get(kind).map(|table| table.base_unit)
    }

    /// Whether the unit's entry is a custom function pair
    pub fn is_custom(&self, kind: &str, unit: impl Into<UnitKey>) -> Result<bool, QuantityError> {
        Ok(self.kind(kind)?.conversion(unit.into())?.is_custom())
    }
}

impl fmt::Debug for UnitConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.kinds.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("UnitConverter")
            .field("kinds", &names)
            .field("precision", &self.precision)
            .finish()
    }
}

impl Catalog {
    /// Convert using case names, e.g. `("Length", "Kilometer", "Mile")`
    pub fn convert_by_name(
        &self,
        value: f64,
        kind: &str,
        from_unit: &str,
        to_unit: &str,
    ) -> Result<f64, QuantityError> {
        let info = self.require_kind(kind)?;
        let unit_type = info.unit_type();
        let from = self.lookup_unit(unit_type, from_unit)
            .ok_or_else(|| QuantityError::unsupported(kind, from_unit))?
            .key();
        let to = self.lookup_unit(unit_type, to_unit)
            .ok_or_else(|| QuantityError::unsupported(kind, to_unit))?
            .key();
        self.converter().convert_f64(value, from, to, kind)
    }

    /// Convert using abbreviations, e.g. `("Length", "km", "mi")`
    pub fn convert_by_abbreviation(
        &self,
        value: f64,
        kind: &str,
        from_abbreviation: &str,
        to_abbreviation: &str,
        culture: Option<Culture>,
    ) -> Result<f64, QuantityError> {
        let from = self.parse_unit(from_abbreviation, culture, Some(kind))?;
        let to = self.parse_unit(to_abbreviation, culture, Some(kind))?;
        self.converter().convert_f64(value, from, to, kind)
    }
}
