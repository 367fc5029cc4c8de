//! Quantity and unit string parsing
//!
//! Input is `<number><whitespace><unit text>`. The number follows the
//! culture's separators; the unit text is resolved through the abbreviation
//! table. An abbreviation that matches units of more than one kind is never
//! guessed: the caller gets `AmbiguousUnit` and must pass a kind.

use measurand_core::{Culture, QuantityError, QuantityValue};
use tracing::debug;
use crate::{Catalog, Measure, Quantity, UnitKey, UnitTag};

/// Split at the first whitespace run. A group separator that is itself
/// whitespace (fr-FR, ru-RU) stays in the number while a digit follows it.
fn split_quantity(text: &str, culture: Culture) -> (&str, &str) {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !c.is_whitespace() {
            continue;
        }
        let grouping = c == culture.group_separator()
            && chars.peek().is_some_and(|(_, next)| next.is_ascii_digit());
        if !grouping {
            return (&text[..i], text[i..].trim());
        }
    }
    (text, "")
}

impl Catalog {
    fn culture_or_default(&self, culture: Option<Culture>) -> Culture {
        culture.unwrap_or(self.settings().culture)
    }

    /// Resolve unit text to a declared unit, optionally within one kind
    fn resolve_unit(&self, text: &str, culture: Culture, kind: Option<&str>) -> Result<UnitKey, QuantityError> {
        if let Some(kind) = kind {
            self.require_kind(kind)?;
        }
        if text.is_empty() {
            return Err(QuantityError::unknown_unit(text, kind));
        }

        let matches: Vec<UnitKey> = self
            .abbreviations()
            .find_units(text, culture, kind)
            .into_iter()
            .filter(|unit| self.lookup_unit(unit.unit_type(), unit.name()).is_some())
            .collect();

        let Some(&first) = matches.first() else {
            return Err(QuantityError::unknown_unit(text, kind));
        };

        let mut kinds: Vec<&'static str> = matches.iter().map(|u| u.kind()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        if kinds.len() > 1 {
            debug!(text, culture = %culture, candidates = ?kinds, "ambiguous unit rejected");
            return Err(QuantityError::AmbiguousUnit {
                text: text.to_string(),
                candidates: kinds.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(first)
    }

    /// Parse unit text such as "km" or "°C"
    pub fn parse_unit(&self, text: &str, culture: Option<Culture>, kind: Option<&str>) -> Result<UnitKey, QuantityError> {
        self.resolve_unit(text.trim(), self.culture_or_default(culture), kind)
    }

    pub fn try_parse_unit(&self, text: &str, culture: Option<Culture>, kind: Option<&str>) -> Option<UnitKey> {
        self.parse_unit(text, culture, kind).ok()
    }

    /// Parse "1.5 kg" into a quantity of the kind owning the unit.
    /// With `kind` set, only that kind's abbreviations are considered.
    pub fn parse_quantity(
        &self,
        text: &str,
        culture: Option<Culture>,
        kind: Option<&str>,
    ) -> Result<Box<dyn Quantity>, QuantityError> {
        let culture = self.culture_or_default(culture);
        let (number, unit_text) = split_quantity(text.trim(), culture);

        let normalized = culture.normalize_number(number).map_err(|_| QuantityError::MalformedNumber {
            text: number.to_string(),
            culture: culture.name().to_string(),
        })?;

        let unit = self.resolve_unit(unit_text, culture, kind)?;
        let info = self.lookup_by_unit_type(unit.unit_type())?;
        let value = QuantityValue::parse_as(info.value_type(), &normalized).map_err(|e| match e {
            QuantityError::MalformedNumber { .. } => QuantityError::MalformedNumber {
                text: number.to_string(),
                culture: culture.name().to_string(),
            },
            other => other,
        })?;
        info.construct(value, unit)
    }

    pub fn try_parse_quantity(
        &self,
        text: &str,
        culture: Option<Culture>,
        kind: Option<&str>,
    ) -> Option<Box<dyn Quantity>> {
        self.parse_quantity(text, culture, kind).ok()
    }

    /// Parse into a statically typed measure of `U`'s kind
    pub fn parse_measure<U: UnitTag>(&self, text: &str, culture: Option<Culture>) -> Result<Measure<U>, QuantityError> {
        let quantity = self.parse_quantity(text, culture, Some(U::KIND))?;
        let unit = quantity.unit();
        quantity.to_measure::<U>().ok_or_else(|| QuantityError::InvalidUnit {
            unit_type: unit.unit_type().type_name().to_string(),
            unit: unit.name().to_string(),
        })
    }
}
