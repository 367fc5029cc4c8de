//! Built-in quantity kinds

mod angle;
mod duration;
mod information;
mod length;
mod mass;
mod temperature;

pub use angle::AngleUnit;
pub use duration::DurationUnit;
pub use information::InformationUnit;
pub use length::LengthUnit;
pub use mass::MassUnit;
pub use temperature::TemperatureUnit;

use measurand_core::QuantityError;
use crate::KindInfo;

/// Every built-in kind, in registration order
pub fn builtin_kinds() -> Result<Vec<KindInfo>, QuantityError> {
    Ok(vec![
        length::kind()?,
        mass::kind()?,
        duration::kind()?,
        angle::kind()?,
        temperature::kind()?,
        information::kind()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kinds_build() {
        let kinds = builtin_kinds().unwrap();
        let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["Length", "Mass", "Duration", "Angle", "Temperature", "Information"]);
        for kind in &kinds {
            assert!(kind.base_unit_info().is_base());
            assert!(kind.base_unit_info().factor().is_one());
        }
    }
}
