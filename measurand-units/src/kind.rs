//! Quantity kind descriptors
//!
//! A `KindInfo` is the complete static description of one quantity kind: its
//! units, base unit, dimensions, how to construct values, and the callbacks
//! that populate the conversion and abbreviation tables at registration.

use std::collections::HashSet;
use std::fmt;
use measurand_core::{Number, QuantityError, QuantityValue, ValueType};
use crate::{BaseDimensions, KindConversions, Quantity, UnitAbbreviations, UnitInfo, UnitKey, UnitTag, UnitType};
use crate::quantity::construct_measure;

/// Builds a quantity of this kind from a value and one of its unit tags
pub type Constructor = fn(QuantityValue, UnitKey) -> Result<Box<dyn Quantity>, QuantityError>;

/// Installs conversion overrides for a kind; runs once per registration
pub type ConfigureConversions = fn(&mut KindConversions) -> Result<(), QuantityError>;

/// Adds culture-specific abbreviations; runs once per registration
pub type ConfigureAbbreviations = fn(&mut UnitAbbreviations);

/// Static description of one quantity kind
#[derive(Clone)]
pub struct KindInfo {
    name: &'static str,
    value_type: ValueType,
    unit_type: UnitType,
    units: Vec<UnitInfo>,
    base_unit: UnitKey,
    zero: QuantityValue,
    base_dimensions: BaseDimensions,
    constructor: Constructor,
    configure_conversions: Option<ConfigureConversions>,
    configure_abbreviations: Option<ConfigureAbbreviations>,
}

impl KindInfo {
    /// Start describing the kind owning unit tag type `U`.
    /// The kind's name is `U::KIND`.
    pub fn builder<U: UnitTag>(base_unit: U, base_dimensions: BaseDimensions) -> KindBuilder<U> {
        KindBuilder {
            base_unit,
            base_dimensions,
            value_type: ValueType::Double,
            units: Vec::new(),
            constructor: construct_measure::<U>,
            configure_conversions: None,
            configure_abbreviations: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// Declared units, in declaration order
    pub fn units(&self) -> &[UnitInfo] {
        &self.units
    }

    pub fn base_unit(&self) -> UnitKey {
        self.base_unit
    }

    pub fn base_unit_info(&self) -> &UnitInfo {
        // build() guarantees the base unit is declared
        self.units.iter().find(|u| u.is_base()).unwrap_or(&self.units[0])
    }

    pub fn zero(&self) -> &QuantityValue {
        &self.zero
    }

    pub fn base_dimensions(&self) -> BaseDimensions {
        self.base_dimensions
    }

    /// Find a declared unit by case name (linear scan; the registry keeps an index)
    pub fn unit(&self, name: &str) -> Option<&UnitInfo> {
        self.units.iter().find(|u| u.name() == name)
    }

    pub fn declares(&self, unit: UnitKey) -> bool {
        unit.unit_type() == self.unit_type && self.unit(unit.name()).is_some()
    }

    /// Coerce the value to this kind's representation and run its constructor
    pub fn construct(&self, value: QuantityValue, unit: UnitKey) -> Result<Box<dyn Quantity>, QuantityError> {
        let value = value.coerce(self.value_type)?;
        (self.constructor)(value, unit)
    }

    pub(crate) fn configure_conversions(&self) -> Option<ConfigureConversions> {
        self.configure_conversions
    }

    pub(crate) fn configure_abbreviations(&self) -> Option<ConfigureAbbreviations> {
        self.configure_abbreviations
    }
}

impl fmt::Debug for KindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindInfo")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("units", &self.units.iter().map(|u| u.name()).collect::<Vec<_>>())
            .field("base_unit", &self.base_unit.name())
            .field("base_dimensions", &self.base_dimensions)
            .finish_non_exhaustive()
    }
}

/// Builder for `KindInfo`; validation happens in `build`
pub struct KindBuilder<U: UnitTag> {
    base_unit: U,
    base_dimensions: BaseDimensions,
    value_type: ValueType,
    units: Vec<(U, &'static str, &'static str, &'static [&'static str])>,
    constructor: Constructor,
    configure_conversions: Option<ConfigureConversions>,
    configure_abbreviations: Option<ConfigureAbbreviations>,
}

impl<U: UnitTag> KindBuilder<U> {
    /// Store values as exact decimals instead of f64
    pub fn decimal(mut self) -> Self {
        self.value_type = ValueType::Decimal;
        self
    }

    /// Declare a unit. `factor` is the number of base units in one of this
    /// unit, written as a decimal or ratio ("0.3048", "5/9").
    pub fn unit(
        mut self,
        unit: U,
        plural_name: &'static str,
        factor: &'static str,
        abbreviations: &'static [&'static str],
    ) -> Self {
        self.units.push((unit, plural_name, factor, abbreviations));
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = constructor;
        self
    }

    pub fn conversions(mut self, configure: ConfigureConversions) -> Self {
        self.configure_conversions = Some(configure);
        self
    }

    pub fn abbreviations(mut self, configure: ConfigureAbbreviations) -> Self {
        self.configure_abbreviations = Some(configure);
        self
    }

    pub fn build(self) -> Result<KindInfo, QuantityError> {
        let kind = U::KIND;
        if self.units.is_empty() {
            return Err(QuantityError::invalid_kind(kind, "no units declared"));
        }

        let mut seen = HashSet::new();
        let mut units = Vec::with_capacity(self.units.len());
        for (unit, plural_name, factor, abbreviations) in self.units {
            if !seen.insert(unit) {
                return Err(QuantityError::invalid_kind(kind, format!("unit {} declared twice", unit.name())));
            }
            let factor = Number::from_str(factor).map_err(|e| {
                QuantityError::invalid_kind(kind, format!("bad factor for {}: {}", unit.name(), e))
            })?;
            if factor.is_zero() || factor.is_negative() {
                return Err(QuantityError::invalid_kind(kind, format!("factor for {} must be positive", unit.name())));
            }
            let is_base = unit == self.base_unit;
            if is_base && !factor.is_one() {
                return Err(QuantityError::invalid_kind(kind, "base unit factor must be 1"));
            }
            units.push(UnitInfo::new(UnitKey::of(unit), plural_name, factor, abbreviations, is_base));
        }

        if !seen.contains(&self.base_unit) {
            return Err(QuantityError::invalid_kind(
                kind,
                format!("base unit {} is not declared", self.base_unit.name()),
            ));
        }

        Ok(KindInfo {
            name: kind,
            value_type: self.value_type,
            unit_type: UnitType::of::<U>(),
            units,
            base_unit: UnitKey::of(self.base_unit),
            zero: QuantityValue::zero(self.value_type),
            base_dimensions: self.base_dimensions,
            constructor: self.constructor,
            configure_conversions: self.configure_conversions,
            configure_abbreviations: self.configure_abbreviations,
        })
    }
}
