//! Construction of quantities from type-erased unit tags

use measurand_core::{QuantityError, QuantityValue};
use crate::{Catalog, Quantity, UnitKey};

impl Catalog {
    /// Build a quantity of whichever kind owns `unit`.
    ///
    /// The owning kind is found by the tag's concrete type. Tags of an
    /// unregistered type, and tags the kind does not declare, are rejected
    /// with `InvalidUnit`. The value is coerced to the kind's representation.
    pub fn quantity_from(
        &self,
        value: impl Into<QuantityValue>,
        unit: impl Into<UnitKey>,
    ) -> Result<Box<dyn Quantity>, QuantityError> {
        let unit = unit.into();
        let invalid = || QuantityError::InvalidUnit {
            unit_type: unit.unit_type().type_name().to_string(),
            unit: unit.name().to_string(),
        };
        let kind = self.lookup_by_unit_type(unit.unit_type()).map_err(|_| invalid())?;
        if self.lookup_unit(unit.unit_type(), unit.name()).is_none() {
            return Err(invalid());
        }
        kind.construct(value.into(), unit)
    }

    pub fn try_quantity_from(
        &self,
        value: impl Into<QuantityValue>,
        unit: impl Into<UnitKey>,
    ) -> Option<Box<dyn Quantity>> {
        self.quantity_from(value, unit).ok()
    }

    /// `quantity_from` for f64 input; NaN and infinities are rejected before any lookup
    pub fn quantity_from_f64(&self, value: f64, unit: impl Into<UnitKey>) -> Result<Box<dyn Quantity>, QuantityError> {
        if !value.is_finite() {
            return Err(QuantityError::NonFiniteValue(value));
        }
        self.quantity_from(value, unit)
    }
}
