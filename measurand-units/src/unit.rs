//! Unit tags and unit descriptors
//!
//! A unit tag is a closed enum per kind (`LengthUnit::Meter`). Metadata about
//! each case lives in `UnitInfo`, held by the kind's descriptor. `UnitKey`
//! erases the enum type so tags of any kind can flow through the registry.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use measurand_core::Number;

/// A closed set of units belonging to one quantity kind
pub trait UnitTag: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Name of the quantity kind this tag type belongs to
    const KIND: &'static str;

    /// Case name, e.g. "Kilometer"
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

/// Declare a unit tag enum for a quantity kind.
///
/// ```
/// measurand_units::unit_enum! {
///     /// Units of speed
///     pub enum SpeedUnit for "Speed" {
///         MeterPerSecond,
///         KilometerPerHour,
///     }
/// }
/// use measurand_units::UnitTag;
/// assert_eq!(SpeedUnit::KilometerPerHour.name(), "KilometerPerHour");
/// assert_eq!(SpeedUnit::from_name("MeterPerSecond"), Some(SpeedUnit::MeterPerSecond));
/// ```
#[macro_export]
macro_rules! unit_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::UnitTag for $name {
            const KIND: &'static str = $kind;

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

/// Identity of a unit tag type
#[derive(Debug, Clone, Copy)]
pub struct UnitType {
    id: TypeId,
    type_name: &'static str,
    kind: &'static str,
}

impl UnitType {
    pub fn of<U: UnitTag>() -> Self {
        UnitType {
            id: TypeId::of::<U>(),
            type_name: std::any::type_name::<U>(),
            kind: U::KIND,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Kind name the tag type claims to belong to
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl PartialEq for UnitType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UnitType {}

impl Hash for UnitType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)
    }
}

/// Type-erased unit tag: which tag type, and which case of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitKey {
    unit_type: UnitType,
    name: &'static str,
}

impl UnitKey {
    pub fn of<U: UnitTag>(unit: U) -> Self {
        UnitKey { unit_type: UnitType::of::<U>(), name: unit.name() }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// Case name of the tag
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind name claimed by the tag type
    pub fn kind(&self) -> &'static str {
        self.unit_type.kind
    }

    pub fn is<U: UnitTag>(&self) -> bool {
        self.unit_type.id == TypeId::of::<U>()
    }

    /// Recover the typed tag, if this key was made from a `U`
    pub fn downcast<U: UnitTag>(&self) -> Option<U> {
        if self.is::<U>() {
            U::from_name(self.name)
        } else {
            None
        }
    }
}

impl<U: UnitTag> From<U> for UnitKey {
    fn from(unit: U) -> Self {
        UnitKey::of(unit)
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.unit_type.kind, self.name)
    }
}

/// Descriptor of one declared unit of a kind
#[derive(Debug, Clone)]
pub struct UnitInfo {
    key: UnitKey,
    plural_name: &'static str,
    /// How many base units make one of this unit
    factor: Number,
    /// Abbreviations in the invariant culture, default first
    abbreviations: &'static [&'static str],
    is_base: bool,
}

impl UnitInfo {
    pub(crate) fn new(
        key: UnitKey,
        plural_name: &'static str,
        factor: Number,
        abbreviations: &'static [&'static str],
        is_base: bool,
    ) -> Self {
        UnitInfo { key, plural_name, factor, abbreviations, is_base }
    }

    pub fn key(&self) -> UnitKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name
    }

    pub fn plural_name(&self) -> &'static str {
        self.plural_name
    }

    pub fn factor(&self) -> &Number {
        &self.factor
    }

    pub fn default_abbreviations(&self) -> &'static [&'static str] {
        self.abbreviations
    }

    pub fn is_base(&self) -> bool {
        self.is_base
    }

    /// The typed tag, if this unit belongs to tag type `U`
    pub fn tag<U: UnitTag>(&self) -> Option<U> {
        self.key.downcast()
    }
}
