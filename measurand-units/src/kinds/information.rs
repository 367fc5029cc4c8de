use measurand_core::QuantityError;
use crate::{BaseDimensions, KindInfo};

crate::unit_enum! {
    /// Units of digital information, counted exactly
    pub enum InformationUnit for "Information" {
        Bit,
        Byte,
        Kilobit,
        Kilobyte,
        Megabyte,
        Kibibyte,
        Mebibyte,
    }
}

pub(super) fn kind() -> Result<KindInfo, QuantityError> {
    KindInfo::builder(InformationUnit::Bit, BaseDimensions::NONE)
        .decimal()
        .unit(InformationUnit::Bit, "Bits", "1", &["b", "bit"])
        .unit(InformationUnit::Byte, "Bytes", "8", &["B"])
        .unit(InformationUnit::Kilobit, "Kilobits", "1000", &["kb", "kbit"])
        .unit(InformationUnit::Kilobyte, "Kilobytes", "8000", &["kB"])
        .unit(InformationUnit::Megabyte, "Megabytes", "8000000", &["MB"])
        .unit(InformationUnit::Kibibyte, "Kibibytes", "8192", &["KiB"])
        .unit(InformationUnit::Mebibyte, "Mebibytes", "8388608", &["MiB"])
        .build()
}
