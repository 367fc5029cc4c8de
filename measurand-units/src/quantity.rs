//! Quantities - a value with an associated unit tag
//!
//! `Quantity` is the type-erased capability every kind implements.
//! `Measure<U>` is the statically-typed quantity used when the unit tag type
//! is known at compile time.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use measurand_core::{QuantityError, QuantityValue};
use crate::{UnitConverter, UnitKey, UnitTag};

/// Read access shared by quantities of every kind
pub trait Quantity: fmt::Debug + Send + Sync {
    fn value(&self) -> &QuantityValue;

    fn unit(&self) -> UnitKey;

    fn kind_name(&self) -> &'static str {
        self.unit().kind()
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn Quantity {
    /// Borrow as a typed measure, if this quantity is a `Measure<U>`
    pub fn downcast_ref<U: UnitTag>(&self) -> Option<&Measure<U>> {
        self.as_any().downcast_ref::<Measure<U>>()
    }

    /// Rebuild as a typed measure from value and unit, whatever the concrete type
    pub fn to_measure<U: UnitTag>(&self) -> Option<Measure<U>> {
        let unit = self.unit().downcast::<U>()?;
        Some(Measure { value: self.value().clone(), unit })
    }
}

/// A quantity whose unit tag type is known statically.
///
/// There is no `==`: two measures are equal when they agree in a common unit,
/// which needs the catalog's converter. Use `equals` or `compare`.
#[derive(Debug, Clone)]
pub struct Measure<U: UnitTag> {
    value: QuantityValue,
    unit: U,
}

impl<U: UnitTag> Measure<U> {
    /// Fails with `NonFiniteValue` for NaN and infinities
    pub fn new(value: impl Into<QuantityValue>, unit: U) -> Result<Self, QuantityError> {
        let value = value.into().ensure_finite()?;
        Ok(Measure { value, unit })
    }

    pub fn value(&self) -> &QuantityValue {
        &self.value
    }

    pub fn unit(&self) -> U {
        self.unit
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// This quantity's value expressed in another unit
    pub fn as_unit(&self, unit: U, converter: &UnitConverter) -> Result<QuantityValue, QuantityError> {
        converter.convert(&self.value, self.unit, unit, U::KIND)
    }

    /// A new quantity expressing the same amount in another unit
    pub fn to_unit(&self, unit: U, converter: &UnitConverter) -> Result<Self, QuantityError> {
        let value = self.as_unit(unit, converter)?;
        Ok(Measure { value, unit })
    }

    /// Order two measures by their values in the base unit
    pub fn compare(&self, other: &Self, converter: &UnitConverter) -> Result<Ordering, QuantityError> {
        let a = converter.to_base(&self.value, self.unit, U::KIND)?;
        let b = converter.to_base(&other.value, other.unit, U::KIND)?;
        Ok(match (&a, &b) {
            (QuantityValue::Decimal(x), QuantityValue::Decimal(y)) => x.cmp(y),
            _ => {
                let x = a.as_f64().unwrap_or(f64::MAX);
                let y = b.as_f64().unwrap_or(f64::MAX);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        })
    }

    /// Exact equality in the base unit, so 1 km equals 1000 m
    pub fn equals(&self, other: &Self, converter: &UnitConverter) -> Result<bool, QuantityError> {
        Ok(self.compare(other, converter)? == Ordering::Equal)
    }

    /// Equal within a relative tolerance, compared in the base unit
    pub fn equals_within(&self, other: &Self, tolerance: f64, converter: &UnitConverter) -> Result<bool, QuantityError> {
        let a = converter.to_base(&self.value, self.unit, U::KIND)?;
        let b = converter.to_base(&other.value, other.unit, U::KIND)?;
        let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
            return Ok(a == b);
        };
        let scale = x.abs().max(y.abs());
        Ok((x - y).abs() <= tolerance * scale)
    }
}

impl<U: UnitTag> Quantity for Measure<U> {
    fn value(&self) -> &QuantityValue {
        &self.value
    }

    fn unit(&self) -> UnitKey {
        UnitKey::of(self.unit)
    }

    fn kind_name(&self) -> &'static str {
        U::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<U: UnitTag> fmt::Display for Measure<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.name())
    }
}

/// Default constructor installed by `KindInfo::builder`
pub(crate) fn construct_measure<U: UnitTag>(
    value: QuantityValue,
    unit: UnitKey,
) -> Result<Box<dyn Quantity>, QuantityError> {
    let tag = unit.downcast::<U>().ok_or_else(|| QuantityError::InvalidUnit {
        unit_type: unit.unit_type().type_name().to_string(),
        unit: unit.name().to_string(),
    })?;
    Ok(Box::new(Measure::new(value, tag)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use measurand_core::Number;
    use crate::kinds::{InformationUnit, LengthUnit, MassUnit, TemperatureUnit};
    use crate::Registry;

    fn registry() -> Registry {
        Registry::with_builtin_kinds().unwrap()
    }

    #[test]
    fn test_measure_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Measure::new(bad, LengthUnit::Meter).unwrap_err();
            assert!(matches!(err, QuantityError::NonFiniteValue(_)));
        }
    }

    #[test]
    fn test_downcast() {
        let boxed: Box<dyn Quantity> = Box::new(Measure::new(5.0, LengthUnit::Foot).unwrap());
        assert_eq!(boxed.kind_name(), "Length");
        assert_eq!(boxed.downcast_ref::<LengthUnit>().unwrap().unit(), LengthUnit::Foot);
        assert!(boxed.downcast_ref::<MassUnit>().is_none());
        assert_eq!(boxed.to_measure::<LengthUnit>().unwrap().as_f64(), Some(5.0));
        assert!(boxed.to_measure::<MassUnit>().is_none());
    }

    #[test]
    fn test_to_unit() {
        let catalog = registry().catalog();
        let km = Measure::new(1.5, LengthUnit::Kilometer).unwrap();
        let m = km.to_unit(LengthUnit::Meter, catalog.converter()).unwrap();
        assert_eq!(m.unit(), LengthUnit::Meter);
        assert_eq!(m.as_f64(), Some(1500.0));
    }

    #[test]
    fn test_compare_through_base_unit() {
        let catalog = registry().catalog();
        let conv = catalog.converter();
        let one_km = Measure::new(1.0, LengthUnit::Kilometer).unwrap();
        let thousand_m = Measure::new(1000.0, LengthUnit::Meter).unwrap();
        let one_mile = Measure::new(1.0, LengthUnit::Mile).unwrap();

        assert_eq!(one_km.compare(&thousand_m, conv).unwrap(), Ordering::Equal);
        assert_eq!(one_km.compare(&one_mile, conv).unwrap(), Ordering::Less);
        assert!(one_km.equals_within(&thousand_m, 1e-12, conv).unwrap());
        assert!(!one_km.equals_within(&one_mile, 1e-3, conv).unwrap());
    }

    #[test]
    fn test_equality_goes_through_base_unit() {
        let catalog = registry().catalog();
        let conv = catalog.converter();
        let one_km = Measure::new(1.0, LengthUnit::Kilometer).unwrap();
        let thousand_m = Measure::new(1000.0, LengthUnit::Meter).unwrap();
        assert!(one_km.equals(&thousand_m, conv).unwrap());
        assert!(thousand_m.equals(&one_km, conv).unwrap());
        assert!(!one_km.equals(&Measure::new(999.0, LengthUnit::Meter).unwrap(), conv).unwrap());

        let kib = Measure::new(Number::from_i64(1), InformationUnit::Kibibyte).unwrap();
        let bytes = Measure::new(Number::from_i64(1024), InformationUnit::Byte).unwrap();
        assert!(kib.equals(&bytes, conv).unwrap());
    }

    #[test]
    fn test_compare_offset_units() {
        let catalog = registry().catalog();
        let conv = catalog.converter();
        let boiling = Measure::new(100.0, TemperatureUnit::DegreeCelsius).unwrap();
        let also_boiling = Measure::new(212.0, TemperatureUnit::DegreeFahrenheit).unwrap();
        assert!(boiling.equals_within(&also_boiling, 1e-9, conv).unwrap());
    }

    #[test]
    fn test_display() {
        let m = Measure::new(2.5, LengthUnit::Meter).unwrap();
        assert_eq!(m.to_string(), "2.5 Meter");
    }
}
