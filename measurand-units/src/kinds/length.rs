use measurand_core::{Culture, QuantityError};
use crate::{BaseDimensions, KindInfo, UnitAbbreviations};

crate::unit_enum! {
    /// Units of length
    pub enum LengthUnit for "Length" {
        Meter,
        Kilometer,
        Centimeter,
        Millimeter,
        Inch,
        Foot,
        Yard,
        Mile,
        NauticalMile,
        /// Surveyor's chain; not declared by the built-in kind
        Chain,
    }
}

pub(super) fn kind() -> Result<KindInfo, QuantityError> {
    KindInfo::builder(LengthUnit::Meter, BaseDimensions::LENGTH)
        .unit(LengthUnit::Meter, "Meters", "1", &["m"])
        .unit(LengthUnit::Kilometer, "Kilometers", "1000", &["km"])
        .unit(LengthUnit::Centimeter, "Centimeters", "0.01", &["cm"])
        .unit(LengthUnit::Millimeter, "Millimeters", "0.001", &["mm"])
        .unit(LengthUnit::Inch, "Inches", "0.0254", &["in", "\""])
        .unit(LengthUnit::Foot, "Feet", "0.3048", &["ft", "'"])
        .unit(LengthUnit::Yard, "Yards", "0.9144", &["yd"])
        .unit(LengthUnit::Mile, "Miles", "1609.344", &["mi"])
        .unit(LengthUnit::NauticalMile, "NauticalMiles", "1852", &["NM", "nmi"])
        .abbreviations(abbreviations)
        .build()
}

fn abbreviations(table: &mut UnitAbbreviations) {
    table.add(Culture::RU_RU, LengthUnit::Meter, "м");
    table.add(Culture::RU_RU, LengthUnit::Kilometer, "км");
    table.add(Culture::RU_RU, LengthUnit::Centimeter, "см");
    table.add(Culture::RU_RU, LengthUnit::Millimeter, "мм");
    table.add(Culture::RU_RU, LengthUnit::Mile, "миля");
    table.add(Culture::NB_NO, LengthUnit::Mile, "mil");
}
