use measurand_core::QuantityError;
use crate::{BaseDimensions, KindInfo};

crate::unit_enum! {
    /// Units of plane angle
    pub enum AngleUnit for "Angle" {
        Degree,
        Radian,
        Arcminute,
        Arcsecond,
        Gradian,
        Revolution,
    }
}

pub(super) fn kind() -> Result<KindInfo, QuantityError> {
    KindInfo::builder(AngleUnit::Degree, BaseDimensions::NONE)
        .unit(AngleUnit::Degree, "Degrees", "1", &["°", "deg"])
        .unit(AngleUnit::Radian, "Radians", "57.29577951308232087679815481410517033240547246656", &["rad"])
        .unit(AngleUnit::Arcminute, "Arcminutes", "1/60", &["'", "arcmin", "amin", "min"])
        .unit(AngleUnit::Arcsecond, "Arcseconds", "1/3600", &["″", "arcsec", "asec"])
        .unit(AngleUnit::Gradian, "Gradians", "0.9", &["grad", "gon"])
        .unit(AngleUnit::Revolution, "Revolutions", "360", &["r", "rev"])
        .build()
}
