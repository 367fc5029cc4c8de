use measurand_core::{Culture, QuantityError};
use crate::{BaseDimensions, KindInfo, UnitAbbreviations};

crate::unit_enum! {
    /// Units of elapsed time
    pub enum DurationUnit for "Duration" {
        Second,
        Millisecond,
        Minute,
        Hour,
        Day,
        Week,
    }
}

pub(super) fn kind() -> Result<KindInfo, QuantityError> {
    KindInfo::builder(DurationUnit::Second, BaseDimensions::TIME)
        .unit(DurationUnit::Second, "Seconds", "1", &["s", "sec"])
        .unit(DurationUnit::Millisecond, "Milliseconds", "0.001", &["ms"])
        .unit(DurationUnit::Minute, "Minutes", "60", &["min"])
        .unit(DurationUnit::Hour, "Hours", "3600", &["h", "hr"])
        .unit(DurationUnit::Day, "Days", "86400", &["d"])
        .unit(DurationUnit::Week, "Weeks", "604800", &["wk"])
        .abbreviations(abbreviations)
        .build()
}

fn abbreviations(table: &mut UnitAbbreviations) {
    table.add(Culture::RU_RU, DurationUnit::Second, "с");
    table.add(Culture::RU_RU, DurationUnit::Millisecond, "мс");
    table.add(Culture::RU_RU, DurationUnit::Minute, "мин");
    table.add(Culture::RU_RU, DurationUnit::Hour, "ч");
    table.add(Culture::RU_RU, DurationUnit::Day, "сут");
    table.add(Culture::RU_RU, DurationUnit::Week, "нед");
    table.add(Culture::DE_DE, DurationUnit::Hour, "Std.");
    table.add(Culture::DE_DE, DurationUnit::Day, "T");
}
