//! Measurand - Physical quantities with a runtime unit registry
//!
//! ```
//! use measurand::{LengthUnit, Culture};
//!
//! let feet = measurand::convert(1.0, LengthUnit::Meter, LengthUnit::Foot).unwrap();
//! assert!((feet - 3.280839895013123).abs() < 1e-12);
//!
//! let q = measurand::parse_quantity("2,5 км", Some(Culture::RU_RU), None).unwrap();
//! assert_eq!(q.kind_name(), "Length");
//! ```
//!
//! The free functions operate on a process-wide default registry holding the
//! built-in kinds. Programs that need their own set of kinds own a
//! `Registry` directly, or replace the default one with `register`.

use std::sync::{Arc, LazyLock};

pub use measurand_core::{codes, Culture, Number, NumberError, QuantityError, QuantityValue, ValueType, DEFAULT_PRECISION};
pub use measurand_units::{
    unit_enum, BaseDimensions, Catalog, Conversion, ConversionFn, KindBuilder, KindConversions, KindInfo,
    Measure, Quantity, Registry, Settings, UnitAbbreviations, UnitConverter, UnitInfo, UnitKey, UnitTag, UnitType,
};
pub use measurand_units::kinds::{
    builtin_kinds, AngleUnit, DurationUnit, InformationUnit, LengthUnit, MassUnit, TemperatureUnit,
};

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| match Registry::with_builtin_kinds() {
    Ok(registry) => registry,
    Err(e) => {
        tracing::error!(error = %e, code = e.code(), "built-in kinds failed to register");
        Registry::default()
    }
});

/// The process-wide default registry
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Snapshot of the default registry's active catalog
pub fn catalog() -> Arc<Catalog> {
    REGISTRY.catalog()
}

/// Replace the default registry's kinds
pub fn register(kinds: Vec<KindInfo>) -> Result<(), QuantityError> {
    REGISTRY.register(kinds)
}

/// Add an abbreviation to the default registry
pub fn add_abbreviation(culture: Culture, unit: impl Into<UnitKey>, text: &str) {
    REGISTRY.add_abbreviation(culture, unit, text)
}

/// Install a custom conversion pair in the default registry
pub fn set_conversion_functions<F, G>(kind: &str, unit: impl Into<UnitKey>, to_base: F, from_base: G) -> Result<(), QuantityError>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
    G: Fn(f64) -> f64 + Send + Sync + 'static,
{
    REGISTRY.set_conversion_functions(kind, unit, to_base, from_base)
}

pub fn quantity_from(value: impl Into<QuantityValue>, unit: impl Into<UnitKey>) -> Result<Box<dyn Quantity>, QuantityError> {
    catalog().quantity_from(value, unit)
}

pub fn try_quantity_from(value: impl Into<QuantityValue>, unit: impl Into<UnitKey>) -> Option<Box<dyn Quantity>> {
    catalog().try_quantity_from(value, unit)
}

pub fn quantity_from_f64(value: f64, unit: impl Into<UnitKey>) -> Result<Box<dyn Quantity>, QuantityError> {
    catalog().quantity_from_f64(value, unit)
}

pub fn parse_quantity(text: &str, culture: Option<Culture>, kind: Option<&str>) -> Result<Box<dyn Quantity>, QuantityError> {
    catalog().parse_quantity(text, culture, kind)
}

pub fn try_parse_quantity(text: &str, culture: Option<Culture>, kind: Option<&str>) -> Option<Box<dyn Quantity>> {
    catalog().try_parse_quantity(text, culture, kind)
}

pub fn parse_unit(text: &str, culture: Option<Culture>, kind: Option<&str>) -> Result<UnitKey, QuantityError> {
    catalog().parse_unit(text, culture, kind)
}

pub fn try_parse_unit(text: &str, culture: Option<Culture>, kind: Option<&str>) -> Option<UnitKey> {
    catalog().try_parse_unit(text, culture, kind)
}

pub fn parse_measure<U: UnitTag>(text: &str, culture: Option<Culture>) -> Result<Measure<U>, QuantityError> {
    catalog().parse_measure(text, culture)
}

/// Convert an f64 between two units of the same kind
pub fn convert<U: UnitTag>(value: f64, from: U, to: U) -> Result<f64, QuantityError> {
    catalog().converter().convert_f64(value, from, to, U::KIND)
}

pub fn try_convert<U: UnitTag>(value: f64, from: U, to: U) -> Option<f64> {
    convert(value, from, to).ok()
}

pub fn default_abbreviation(unit: impl Into<UnitKey>, culture: Option<Culture>) -> Option<String> {
    let catalog = catalog();
    let culture = culture.unwrap_or(catalog.settings().culture);
    catalog.abbreviations().default_abbreviation(unit, culture)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Culture, Measure, Quantity, QuantityError, QuantityValue, UnitKey, UnitTag};
    pub use crate::{AngleUnit, DurationUnit, InformationUnit, LengthUnit, MassUnit, TemperatureUnit};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_builtins() {
        let names = registry().kind_names();
        for kind in ["Length", "Mass", "Duration", "Angle", "Temperature", "Information"] {
            assert!(names.contains(&kind), "missing {}", kind);
        }
    }

    #[test]
    fn test_convert() {
        let c = convert(212.0, TemperatureUnit::DegreeFahrenheit, TemperatureUnit::DegreeCelsius).unwrap();
        assert!((c - 100.0).abs() < 1e-9);
        assert_eq!(convert(2.0, DurationUnit::Hour, DurationUnit::Minute).unwrap(), 120.0);
        assert!(try_convert(1.0, LengthUnit::Chain, LengthUnit::Meter).is_none());
    }

    #[test]
    fn test_quantity_from() {
        let q = quantity_from(4.0, AngleUnit::Revolution).unwrap();
        assert_eq!(q.kind_name(), "Angle");
        assert!(quantity_from_f64(f64::INFINITY, AngleUnit::Revolution).is_err());
        assert!(try_quantity_from(1.0, LengthUnit::Chain).is_none());
    }

    #[test]
    fn test_parse() {
        let q = parse_quantity("10 lb", None, None).unwrap();
        assert_eq!(q.unit(), UnitKey::of(MassUnit::Pound));
        assert_eq!(parse_unit("°C", None, None).unwrap(), UnitKey::of(TemperatureUnit::DegreeCelsius));
        assert!(try_parse_quantity("5 min", None, None).is_none());
        assert!(try_parse_unit("min", None, Some("Angle")).is_some());

        let m = parse_measure::<InformationUnit>("3 KiB", None).unwrap();
        assert_eq!(m.value(), &QuantityValue::Decimal(Number::from_i64(3)));
    }

    #[test]
    fn test_default_abbreviation() {
        assert_eq!(default_abbreviation(MassUnit::Kilogram, None).as_deref(), Some("kg"));
        assert_eq!(default_abbreviation(MassUnit::Kilogram, Some(Culture::RU_RU)).as_deref(), Some("кг"));
        assert_eq!(default_abbreviation(LengthUnit::Chain, None), None);
    }

    #[test]
    fn test_runtime_additions_reach_later_snapshots() {
        let before = catalog();
        add_abbreviation(Culture::EN_GB, LengthUnit::Mile, "statute mi");
        assert!(before.try_parse_unit("statute mi", Some(Culture::EN_GB), None).is_none());
        assert_eq!(
            parse_unit("statute mi", Some(Culture::EN_GB), None).unwrap(),
            UnitKey::of(LengthUnit::Mile)
        );
        assert_eq!(
            set_conversion_functions("Length", MassUnit::Gram, |x| x, |x| x).unwrap_err().code(),
            codes::UNSUPPORTED_CONVERSION
        );
    }

    #[test]
    fn test_owned_registry_is_independent() {
        let own = Registry::with_kinds(vec![], Settings::default()).unwrap();
        assert!(own.kind_names().is_empty());
        assert!(catalog().lookup_by_name("Length").is_some());
    }
}
