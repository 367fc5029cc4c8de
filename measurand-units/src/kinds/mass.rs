use measurand_core::{Culture, QuantityError};
use crate::{BaseDimensions, KindInfo, UnitAbbreviations};

crate::unit_enum! {
    /// Units of mass
    pub enum MassUnit for "Mass" {
        Kilogram,
        Gram,
        Milligram,
        Tonne,
        Pound,
        Ounce,
    }
}

pub(super) fn kind() -> Result<KindInfo, QuantityError> {
    KindInfo::builder(MassUnit::Kilogram, BaseDimensions::MASS)
        .unit(MassUnit::Kilogram, "Kilograms", "1", &["kg"])
        .unit(MassUnit::Gram, "Grams", "0.001", &["g"])
        .unit(MassUnit::Milligram, "Milligrams", "0.000001", &["mg"])
        .unit(MassUnit::Tonne, "Tonnes", "1000", &["t"])
        .unit(MassUnit::Pound, "Pounds", "0.45359237", &["lb", "lbs", "lbm"])
        .unit(MassUnit::Ounce, "Ounces", "0.028349523125", &["oz"])
        .abbreviations(abbreviations)
        .build()
}

fn abbreviations(table: &mut UnitAbbreviations) {
    table.add(Culture::RU_RU, MassUnit::Kilogram, "кг");
    table.add(Culture::RU_RU, MassUnit::Gram, "г");
    table.add(Culture::RU_RU, MassUnit::Milligram, "мг");
    table.add(Culture::RU_RU, MassUnit::Tonne, "т");
}
