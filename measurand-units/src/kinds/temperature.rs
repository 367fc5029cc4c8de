//! Temperature scales. Celsius and Fahrenheit are offset from absolute zero,
//! so their conversions are function pairs rather than factors.

use measurand_core::QuantityError;
use crate::{BaseDimensions, KindConversions, KindInfo};

crate::unit_enum! {
    /// Units of thermodynamic temperature
    pub enum TemperatureUnit for "Temperature" {
        Kelvin,
        DegreeCelsius,
        DegreeFahrenheit,
        DegreeRankine,
    }
}

const ZERO_CELSIUS: f64 = 273.15;
const ZERO_FAHRENHEIT_RANKINE: f64 = 459.67;

pub(super) fn kind() -> Result<KindInfo, QuantityError> {
    KindInfo::builder(TemperatureUnit::Kelvin, BaseDimensions::TEMPERATURE)
        .unit(TemperatureUnit::Kelvin, "Kelvins", "1", &["K"])
        // Degree-size factors; the offsets come from the conversion callback
        .unit(TemperatureUnit::DegreeCelsius, "DegreesCelsius", "1", &["°C"])
        .unit(TemperatureUnit::DegreeFahrenheit, "DegreesFahrenheit", "5/9", &["°F"])
        .unit(TemperatureUnit::DegreeRankine, "DegreesRankine", "5/9", &["°R"])
        .conversions(conversions)
        .build()
}

fn conversions(table: &mut KindConversions) -> Result<(), QuantityError> {
    table.set_conversion_functions(
        TemperatureUnit::DegreeCelsius,
        |c| c + ZERO_CELSIUS,
        |k| k - ZERO_CELSIUS,
    )?;
    table.set_conversion_functions(
        TemperatureUnit::DegreeFahrenheit,
        |f| (f + ZERO_FAHRENHEIT_RANKINE) * 5.0 / 9.0,
        |k| k * 9.0 / 5.0 - ZERO_FAHRENHEIT_RANKINE,
    )
}
