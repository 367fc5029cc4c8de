//! Measurand Units - Quantity registry, conversion and parsing
//!
//! Quantity kinds are described once as `KindInfo` values and registered
//! together into a `Registry`. Each registration produces an immutable
//! `Catalog` holding:
//! - lookup indices by kind name, unit tag type and unit case name
//! - the conversion tables (`UnitConverter`)
//! - the per-culture abbreviation table (`UnitAbbreviations`)
//!
//! The catalog also builds quantities from type-erased unit tags and parses
//! strings such as "1.5 kg" or "2,5 км".
//!
//! Built-in kinds:
//! - Length (m, km, cm, mm, in, ft, yd, mi, NM)
//! - Mass (kg, g, mg, t, lb, oz)
//! - Duration (s, ms, min, h, d, wk)
//! - Angle (°, rad, arcmin, arcsec, grad, rev)
//! - Temperature (K, °C, °F, °R)
//! - Information (b, B, kb, kB, MB, KiB, MiB), exact decimal values

mod dimension;
mod unit;
mod kind;
mod quantity;
mod convert;
mod abbreviations;
mod registry;
mod factory;
mod parse;
mod settings;
pub mod kinds;

pub use dimension::BaseDimensions;
pub use unit::{UnitTag, UnitType, UnitKey, UnitInfo};
pub use kind::{KindInfo, KindBuilder, Constructor, ConfigureConversions, ConfigureAbbreviations};
pub use quantity::{Quantity, Measure};
pub use convert::{Conversion, ConversionFn, KindConversions, UnitConverter};
pub use abbreviations::UnitAbbreviations;
pub use registry::{Catalog, Registry};
pub use settings::Settings;
