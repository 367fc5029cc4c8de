//! Per-culture unit abbreviations
//!
//! Lookups walk the culture chain: the requested culture, then the table's
//! fallback culture, then the invariant culture. The first culture with a hit
//! answers. Matching is case-sensitive ("mm" and "Mm" are different units).

use std::collections::HashMap;
use std::fmt;
use measurand_core::Culture;
use tracing::debug;
use crate::UnitKey;

#[derive(Debug, Clone, Default)]
struct Table {
    /// (culture, unit) pairs in the order they were first seen
    order: Vec<(&'static str, UnitKey)>,
    texts: HashMap<(&'static str, UnitKey), Vec<String>>,
}

/// Abbreviation strings per (culture, unit); the first string is the default
#[derive(Clone)]
pub struct UnitAbbreviations {
    fallback: Culture,
    table: Table,
}

impl UnitAbbreviations {
    pub fn new(fallback: Culture) -> Self {
        UnitAbbreviations { fallback, table: Table::default() }
    }

    pub fn fallback_culture(&self) -> Culture {
        self.fallback
    }

    /// Append an abbreviation. Blank text and exact duplicates are ignored.
    pub fn add(&mut self, culture: Culture, unit: impl Into<UnitKey>, text: &str) {
        let unit = unit.into();
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let table = &mut self.table;
        let key = (culture.name(), unit);
        if !table.texts.contains_key(&key) {
            table.order.push(key);
        }
        let texts = table.texts.entry(key).or_default();
        if texts.iter().any(|t| t == text) {
            return;
        }
        texts.push(text.to_string());
        debug!(culture = %culture, unit = %unit, text, "abbreviation added");
    }

    pub fn add_all(&mut self, culture: Culture, unit: impl Into<UnitKey>, texts: &[&str]) {
        let unit = unit.into();
        for text in texts {
            self.add(culture, unit, text);
        }
    }

    fn chain(&self, culture: Culture) -> Vec<&'static str> {
        let mut chain = vec![culture.name()];
        for name in [self.fallback.name(), Culture::INVARIANT.name()] {
            if !chain.contains(&name) {
                chain.push(name);
            }
        }
        chain
    }

    /// First abbreviation for the unit, searching the culture chain
    pub fn default_abbreviation(&self, unit: impl Into<UnitKey>, culture: Culture) -> Option<String> {
        self.abbreviations(unit, culture).into_iter().next()
    }

    /// All abbreviations for the unit in the first culture of the chain that has any
    pub fn abbreviations(&self, unit: impl Into<UnitKey>, culture: Culture) -> Vec<String> {
        let unit = unit.into();
        self.chain(culture)
            .into_iter()
            .filter_map(|name| self.table.texts.get(&(name, unit)))
            .find(|texts| !texts.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    /// Units having `text` as an abbreviation, in registration order.
    /// With `kind` set, only units whose tag type belongs to that kind count.
    pub fn find_units(&self, text: &str, culture: Culture, kind: Option<&str>) -> Vec<UnitKey> {
        let table = &self.table;
        for name in self.chain(culture) {
            let mut found: Vec<UnitKey> = Vec::new();
            for key in table.order.iter().filter(|(c, _)| *c == name) {
                let unit = key.1;
                if kind.is_some_and(|k| unit.kind() != k) || found.contains(&unit) {
                    continue;
                }
                if table.texts.get(key).is_some_and(|texts| texts.iter().any(|t| t == text)) {
                    found.push(unit);
                }
            }
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

impl fmt::Debug for UnitAbbreviations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitAbbreviations")
            .field("fallback", &self.fallback)
            .field("entries", &self.table.order.len())
            .finish()
    }
}
