//! Quantity kind registry
//!
//! A `Catalog` is one immutable generation of registered kinds together with
//! the conversion and abbreviation tables their callbacks populated. The
//! `Registry` holds the active catalog behind an `ArcSwap`. Every change,
//! whether a new set of kinds or a runtime abbreviation or conversion override,
//! builds a complete next catalog and installs it with a compare-and-swap, so
//! readers see either the old generation or the new one and never take a lock.
//! Runtime edits are recorded on the catalog and replayed onto the next one
//! when kinds are registered again.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};
use arc_swap::ArcSwap;
use measurand_core::{Culture, QuantityError};
use tracing::{debug, info};
use crate::{
    BaseDimensions, ConversionFn, KindConversions, KindInfo, Settings, UnitAbbreviations, UnitConverter, UnitInfo,
    UnitKey, UnitType,
};

/// Lookup tables derived from a catalog's kinds
#[derive(Debug, Clone, Default)]
struct Indices {
    by_name: HashMap<&'static str, usize>,
    by_unit_type: HashMap<UnitType, usize>,
    /// unit type -> case name -> (kind index, unit index)
    units: HashMap<UnitType, HashMap<&'static str, (usize, usize)>>,
}

impl Indices {
    fn build(kinds: &[Arc<KindInfo>], generation: u64) -> Self {
        let mut indices = Indices::default();
        for (k, kind) in kinds.iter().enumerate() {
            indices.by_name.insert(kind.name(), k);
            indices.by_unit_type.insert(kind.unit_type(), k);
            let units = indices.units.entry(kind.unit_type()).or_default();
            for (u, unit) in kind.units().iter().enumerate() {
                units.insert(unit.name(), (k, u));
            }
        }
        debug!(generation, kinds = kinds.len(), "catalog indices built");
        indices
    }
}

/// A change made to a live catalog after registration
#[derive(Clone)]
enum RuntimeEdit {
    Abbreviation { culture: Culture, unit: UnitKey, text: String },
    Conversion { kind: String, unit: UnitKey, to_base: ConversionFn, from_base: ConversionFn },
}

impl RuntimeEdit {
    fn apply(&self, catalog: &mut Catalog) -> Result<(), QuantityError> {
        match self {
            RuntimeEdit::Abbreviation { culture, unit, text } => {
                catalog.abbreviations.add(*culture, *unit, text);
                Ok(())
            }
            RuntimeEdit::Conversion { kind, unit, to_base, from_base } => catalog
                .converter
                .kind_mut(kind)?
                .set_custom(*unit, Arc::clone(to_base), Arc::clone(from_base)),
        }
    }
}

impl fmt::Debug for RuntimeEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeEdit::Abbreviation { culture, unit, text } => {
                write!(f, "Abbreviation({}, {}, {:?})", culture, unit, text)
            }
            RuntimeEdit::Conversion { kind, unit, .. } => write!(f, "Conversion({}, {})", kind, unit),
        }
    }
}

/// One generation of registered quantity kinds
#[derive(Debug, Clone)]
pub struct Catalog {
    generation: u64,
    kinds: Vec<Arc<KindInfo>>,
    settings: Settings,
    converter: UnitConverter,
    abbreviations: UnitAbbreviations,
    /// Edits made since the kinds were registered, oldest first
    runtime: Vec<RuntimeEdit>,
    indices: OnceLock<Indices>,
}

impl Catalog {
    fn empty(settings: Settings) -> Self {
        Catalog {
            generation: 0,
            kinds: Vec::new(),
            settings,
            converter: UnitConverter::new(settings.precision),
            abbreviations: UnitAbbreviations::new(settings.fallback_culture),
            runtime: Vec::new(),
            indices: OnceLock::new(),
        }
    }

    /// Validate the kinds and run their configuration callbacks, once each, in order
    fn build(kinds: Vec<KindInfo>, settings: Settings) -> Result<Self, QuantityError> {
        settings.validate()?;

        let mut names = HashSet::new();
        let mut unit_types = HashSet::new();
        for kind in &kinds {
            if !names.insert(kind.name()) {
                return Err(QuantityError::invalid_kind(kind.name(), "kind registered twice"));
            }
            if !unit_types.insert(kind.unit_type()) {
                return Err(QuantityError::invalid_kind(
                    kind.name(),
                    format!("unit type {} already belongs to another kind", kind.unit_type()),
                ));
            }
        }

        let mut catalog = Catalog::empty(settings);
        for kind in &kinds {
            for unit in kind.units() {
                catalog.abbreviations.add_all(Culture::INVARIANT, unit.key(), unit.default_abbreviations());
            }

            let mut conversions = KindConversions::for_kind(kind)?;
            if let Some(configure) = kind.configure_conversions() {
                configure(&mut conversions)?;
                debug!(kind = kind.name(), "conversion callback ran");
            }
            catalog.converter.insert(conversions);

            if let Some(configure) = kind.configure_abbreviations() {
                configure(&mut catalog.abbreviations);
                debug!(kind = kind.name(), "abbreviation callback ran");
            }
        }
        catalog.kinds = kinds.into_iter().map(Arc::new).collect();
        Ok(catalog)
    }

    fn indices(&self) -> &Indices {
        self.indices.get_or_init(|| Indices::build(&self.kinds, self.generation))
    }

    /// Increases by one with every catalog a `Registry` installs
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> &[Arc<KindInfo>] {
        &self.kinds
    }

    pub fn kind_names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|k| k.name()).collect()
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&KindInfo> {
        self.indices().by_name.get(name).map(|&k| self.kinds[k].as_ref())
    }

    /// Like `lookup_by_name`, failing with `UnknownKind`
    pub fn require_kind(&self, name: &str) -> Result<&KindInfo, QuantityError> {
        self.lookup_by_name(name).ok_or_else(|| QuantityError::UnknownKind(name.to_string()))
    }

    pub fn lookup_by_unit_type(&self, unit_type: UnitType) -> Result<&KindInfo, QuantityError> {
        self.indices()
            .by_unit_type
            .get(&unit_type)
            .map(|&k| self.kinds[k].as_ref())
            .ok_or_else(|| QuantityError::UnregisteredUnitType(unit_type.type_name().to_string()))
    }

    pub fn lookup_unit(&self, unit_type: UnitType, name: &str) -> Option<&UnitInfo> {
        let &(k, u) = self.indices().units.get(&unit_type)?.get(name)?;
        Some(&self.kinds[k].units()[u])
    }

    /// Kinds sharing a base-dimension vector, in registration order
    pub fn kinds_with_dimensions(&self, dimensions: BaseDimensions) -> Vec<&KindInfo> {
        self.kinds
            .iter()
            .filter(|k| k.base_dimensions() == dimensions)
            .map(|k| k.as_ref())
            .collect()
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    pub fn abbreviations(&self) -> &UnitAbbreviations {
        &self.abbreviations
    }
}

/// Holder of the active catalog generation
pub struct Registry {
    current: ArcSwap<Catalog>,
    settings: Settings,
}

impl Registry {
    /// An empty registry
    pub fn new(settings: Settings) -> Self {
        Registry {
            current: ArcSwap::from_pointee(Catalog::empty(settings)),
            settings,
        }
    }

    pub fn with_kinds(kinds: Vec<KindInfo>, settings: Settings) -> Result<Self, QuantityError> {
        let registry = Registry::new(settings);
        registry.register(kinds)?;
        Ok(registry)
    }

    /// A registry holding every built-in kind, with default settings
    pub fn with_builtin_kinds() -> Result<Self, QuantityError> {
        Registry::with_kinds(crate::kinds::builtin_kinds()?, Settings::default())
    }

    /// Replace the active catalog with one made of `kinds`.
    ///
    /// Callbacks run once, before the swap. Runtime edits of the replaced
    /// catalog are replayed onto the new one; a conversion override whose
    /// kind or unit is gone is dropped. On error the previous catalog stays
    /// active.
    pub fn register(&self, kinds: Vec<KindInfo>) -> Result<(), QuantityError> {
        let built = Catalog::build(kinds, self.settings)?;
        loop {
            let cur = self.current.load_full();
            let mut next = built.clone();
            for edit in &cur.runtime {
                match edit.apply(&mut next) {
                    Ok(()) => next.runtime.push(edit.clone()),
                    Err(e) => debug!(?edit, error = %e, "runtime edit dropped"),
                }
            }
            next.generation = cur.generation + 1;

            let generation = next.generation;
            let names = next.kind_names();
            let prev = self.current.compare_and_swap(&cur, Arc::new(next));
            if Arc::ptr_eq(&prev, &cur) {
                info!(generation, kinds = ?names, "quantity catalog installed");
                return Ok(());
            }
        }
    }

    /// Add an abbreviation to the active catalog and every later one.
    /// Snapshots taken earlier do not see it.
    pub fn add_abbreviation(&self, culture: Culture, unit: impl Into<UnitKey>, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let edit = RuntimeEdit::Abbreviation { culture, unit: unit.into(), text: text.to_string() };
        if let Err(e) = self.apply(edit) {
            debug!(error = %e, "abbreviation not added");
        }
    }

    /// Install a custom function pair for a declared unit of `kind`, in the
    /// active catalog and every later one
    pub fn set_conversion_functions<F, G>(
        &self,
        kind: &str,
        unit: impl Into<UnitKey>,
        to_base: F,
        from_base: G,
    ) -> Result<(), QuantityError>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.apply(RuntimeEdit::Conversion {
            kind: kind.to_string(),
            unit: unit.into(),
            to_base: Arc::new(to_base),
            from_base: Arc::new(from_base),
        })
    }

    fn apply(&self, edit: RuntimeEdit) -> Result<(), QuantityError> {
        loop {
            let cur = self.current.load_full();
            let mut next = Catalog::clone(&cur);
            edit.apply(&mut next)?;
            next.runtime.push(edit.clone());
            next.generation = cur.generation + 1;

            let prev = self.current.compare_and_swap(&cur, Arc::new(next));
            if Arc::ptr_eq(&prev, &cur) {
                return Ok(());
            }
        }
    }

    /// Snapshot of the active catalog
    pub fn catalog(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn kind_names(&self) -> Vec<&'static str> {
        self.current.load().kind_names()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(Settings::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("catalog", &self.current.load_full())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::LazyLock;
    use measurand_core::codes;
    use crate::kinds::{builtin_kinds, DurationUnit, LengthUnit, MassUnit};
    use crate::UnitTag;

    crate::unit_enum! {
        enum CubitUnit for "Cubit" {
            Cubit,
            Palm,
        }
    }

    crate::unit_enum! {
        enum StoneUnit for "Stone" {
            Stone,
            Grain,
        }
    }

    static CUBIT_CONVERSIONS: AtomicUsize = AtomicUsize::new(0);
    static CUBIT_ABBREVIATIONS: AtomicUsize = AtomicUsize::new(0);

    fn cubit_kind() -> KindInfo {
        KindInfo::builder(CubitUnit::Cubit, BaseDimensions::LENGTH)
            .unit(CubitUnit::Cubit, "Cubits", "1", &["cbt"])
            .unit(CubitUnit::Palm, "Palms", "1/6", &["plm"])
            .conversions(|_| {
                CUBIT_CONVERSIONS.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .abbreviations(|_| {
                // conversions always run first for a kind
                assert_eq!(CUBIT_CONVERSIONS.load(Ordering::SeqCst), CUBIT_ABBREVIATIONS.load(Ordering::SeqCst) + 1);
                CUBIT_ABBREVIATIONS.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap()
    }

    fn stone_kind() -> KindInfo {
        KindInfo::builder(StoneUnit::Stone, BaseDimensions::MASS)
            .unit(StoneUnit::Stone, "Stones", "1", &["st"])
            .unit(StoneUnit::Grain, "Grains", "1/98000", &["gr"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_builtin_lookups() {
        let catalog = Registry::with_builtin_kinds().unwrap().catalog();
        let length = catalog.lookup_by_name("Length").unwrap();
        assert_eq!(length.unit_type(), UnitType::of::<LengthUnit>());
        assert!(catalog.lookup_by_name("length").is_none());

        let by_type = catalog.lookup_by_unit_type(UnitType::of::<MassUnit>()).unwrap();
        assert_eq!(by_type.name(), MassUnit::KIND);

        let foot = catalog.lookup_unit(UnitType::of::<LengthUnit>(), "Foot").unwrap();
        assert_eq!(foot.tag::<LengthUnit>(), Some(LengthUnit::Foot));
        assert!(catalog.lookup_unit(UnitType::of::<LengthUnit>(), "Chain").is_none());
    }

    #[test]
    fn test_unregistered_unit_type() {
        let catalog = Registry::with_builtin_kinds().unwrap().catalog();
        let err = catalog.lookup_by_unit_type(UnitType::of::<CubitUnit>()).unwrap_err();
        assert_eq!(err.code(), codes::UNREGISTERED_UNIT_TYPE);
    }

    #[test]
    fn test_callbacks_run_once_in_order() {
        let registry = Registry::with_kinds(vec![stone_kind(), cubit_kind()], Settings::default()).unwrap();
        assert_eq!(CUBIT_CONVERSIONS.load(Ordering::SeqCst), 1);
        assert_eq!(CUBIT_ABBREVIATIONS.load(Ordering::SeqCst), 1);

        // Lookups do not re-run callbacks
        let catalog = registry.catalog();
        assert!(catalog.lookup_by_name("Cubit").is_some());
        assert!(catalog.lookup_unit(UnitType::of::<CubitUnit>(), "Palm").is_some());
        assert_eq!(CUBIT_CONVERSIONS.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.kind_names(), vec!["Stone", "Cubit"]);
    }

    #[test]
    fn test_catalog_swap() {
        let registry = Registry::with_builtin_kinds().unwrap();
        let old = registry.catalog();
        assert!(old.lookup_by_name("Length").is_some());

        registry.register(vec![stone_kind()]).unwrap();
        let new = registry.catalog();
        assert_eq!(new.generation(), old.generation() + 1);
        assert!(new.lookup_by_name("Length").is_none());
        assert!(new.lookup_by_unit_type(UnitType::of::<LengthUnit>()).is_err());
        assert_eq!(registry.kind_names(), vec!["Stone"]);

        // A snapshot taken before the swap is unaffected
        assert!(old.lookup_by_name("Length").is_some());
    }

    #[test]
    fn test_rejected_register_keeps_previous() {
        let registry = Registry::with_kinds(vec![stone_kind()], Settings::default()).unwrap();
        let err = registry.register(vec![stone_kind(), stone_kind()]).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_KIND);
        assert_eq!(registry.kind_names(), vec!["Stone"]);
    }

    #[test]
    fn test_rejects_duplicate_kind() {
        let impostor = KindInfo::builder(StoneUnit::Stone, BaseDimensions::MASS)
            .unit(StoneUnit::Stone, "Stones", "1", &[])
            .build()
            .unwrap();
        let mut kinds = builtin_kinds().unwrap();
        kinds.push(stone_kind());
        kinds.push(impostor);
        assert!(Registry::with_kinds(kinds, Settings::default()).is_err());
    }

    #[test]
    fn test_kinds_with_dimensions() {
        let mut kinds = builtin_kinds().unwrap();
        kinds.push(stone_kind());
        let catalog = Registry::with_kinds(kinds, Settings::default()).unwrap().catalog();
        let masses: Vec<_> = catalog.kinds_with_dimensions(BaseDimensions::MASS).iter().map(|k| k.name()).collect();
        assert_eq!(masses, vec!["Mass", "Stone"]);
        let dimensionless: Vec<_> = catalog.kinds_with_dimensions(BaseDimensions::NONE).iter().map(|k| k.name()).collect();
        assert_eq!(dimensionless, vec!["Angle", "Information"]);
    }

    #[test]
    fn test_default_abbreviations_seeded() {
        let catalog = Registry::with_builtin_kinds().unwrap().catalog();
        let abbr = catalog.abbreviations();
        assert_eq!(abbr.default_abbreviation(LengthUnit::Kilometer, Culture::EN_US).as_deref(), Some("km"));
        assert_eq!(abbr.default_abbreviation(DurationUnit::Minute, Culture::INVARIANT).as_deref(), Some("min"));
        assert_eq!(abbr.default_abbreviation(LengthUnit::Kilometer, Culture::RU_RU).as_deref(), Some("км"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::default();
        assert!(registry.kind_names().is_empty());
        assert_eq!(registry.catalog().generation(), 0);
    }

    #[test]
    fn test_concurrent_readers_see_whole_generations() {
        let registry = Arc::new(Registry::with_builtin_kinds().unwrap());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let catalog = registry.catalog();
                        let names = catalog.kind_names();
                        for name in names {
                            assert!(catalog.lookup_by_name(name).is_some());
                        }
                    }
                })
            })
            .collect();
        for _ in 0..20 {
            registry.register(vec![stone_kind()]).unwrap();
            registry.register(builtin_kinds().unwrap()).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_snapshot_does_not_see_later_edits() {
        let registry = Registry::with_builtin_kinds().unwrap();
        let before = registry.catalog();
        registry.add_abbreviation(Culture::INVARIANT, LengthUnit::Kilometer, "klick");
        assert!(before.try_parse_unit("klick", None, None).is_none());

        let after = registry.catalog();
        assert_eq!(after.generation(), before.generation() + 1);
        assert_eq!(after.parse_unit("klick", None, None).unwrap(), UnitKey::of(LengthUnit::Kilometer));
    }

    #[test]
    fn test_runtime_edits_survive_register() {
        let registry = Registry::with_builtin_kinds().unwrap();
        registry.add_abbreviation(Culture::INVARIANT, LengthUnit::Kilometer, "klick");
        registry
            .set_conversion_functions("Duration", DurationUnit::Week, |w| w * 604_800.0 + 1.0, |s| (s - 1.0) / 604_800.0)
            .unwrap();

        registry.register(builtin_kinds().unwrap()).unwrap();
        let catalog = registry.catalog();
        assert_eq!(catalog.parse_unit("klick", None, None).unwrap(), UnitKey::of(LengthUnit::Kilometer));
        assert!(catalog.converter().is_custom("Duration", DurationUnit::Week).unwrap());
        let seconds = catalog.converter().convert_f64(1.0, DurationUnit::Week, DurationUnit::Second, "Duration").unwrap();
        assert_eq!(seconds, 604_801.0);
    }

    #[test]
    fn test_override_for_removed_kind_is_dropped() {
        let registry = Registry::with_builtin_kinds().unwrap();
        registry.set_conversion_functions("Duration", DurationUnit::Week, |w| w, |s| s).unwrap();
        registry.register(vec![stone_kind()]).unwrap();
        registry.register(builtin_kinds().unwrap()).unwrap();
        assert!(!registry.catalog().converter().is_custom("Duration", DurationUnit::Week).unwrap());
    }

    #[test]
    fn test_rejected_override_keeps_catalog() {
        let registry = Registry::with_builtin_kinds().unwrap();
        let generation = registry.catalog().generation();
        let err = registry.set_conversion_functions("Angle", LengthUnit::Meter, |x| x, |x| x).unwrap_err();
        assert_eq!(err.code(), codes::UNSUPPORTED_CONVERSION);
        let err = registry.set_conversion_functions("Nope", LengthUnit::Meter, |x| x, |x| x).unwrap_err();
        assert_eq!(err.code(), codes::UNKNOWN_KIND);
        assert_eq!(registry.catalog().generation(), generation);
    }

    static REENTRANT: LazyLock<Registry> = LazyLock::new(|| Registry::with_builtin_kinds().unwrap());

    #[test]
    fn test_custom_function_may_edit_its_registry() {
        REENTRANT
            .set_conversion_functions(
                "Duration",
                DurationUnit::Week,
                |w| {
                    REENTRANT.add_abbreviation(Culture::INVARIANT, DurationUnit::Week, "sennight");
                    w * 604_800.0
                },
                |s| s / 604_800.0,
            )
            .unwrap();

        let catalog = REENTRANT.catalog();
        let seconds = catalog.converter().convert_f64(2.0, DurationUnit::Week, DurationUnit::Second, "Duration").unwrap();
        assert_eq!(seconds, 1_209_600.0);
        assert!(catalog.try_parse_unit("sennight", None, None).is_none());
        assert_eq!(
            REENTRANT.catalog().parse_unit("sennight", None, None).unwrap(),
            UnitKey::of(DurationUnit::Week)
        );
    }

    #[test]
    fn test_concurrent_writers_keep_generation_monotonic() {
        let registry = Arc::new(Registry::default());
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        if i % 2 == 0 {
                            registry.register(vec![stone_kind()]).unwrap();
                        } else {
                            registry.add_abbreviation(Culture::INVARIANT, StoneUnit::Stone, "stn");
                        }
                    }
                })
            })
            .collect();

        let mut last = 0;
        while writers.iter().any(|w| !w.is_finished()) {
            let generation = registry.catalog().generation();
            assert!(generation >= last, "generation went from {} to {}", last, generation);
            last = generation;
        }
        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(registry.catalog().generation(), 100);
        assert_eq!(registry.kind_names(), vec!["Stone"]);
    }
}
