//! Cultures: numeric formatting conventions and abbreviation scopes
//!
//! A culture decides which character separates decimals and which one groups
//! thousands. It also scopes unit abbreviations ("m" vs "м").

use crate::NumberError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Culture {
    name: &'static str,
    decimal_separator: char,
    group_separator: char,
}

impl Culture {
    /// Culture-neutral conventions; also the scope of every unit's default abbreviations
    pub const INVARIANT: Culture = Culture::new("", '.', ',');
    pub const EN_US: Culture = Culture::new("en-US", '.', ',');
    pub const EN_GB: Culture = Culture::new("en-GB", '.', ',');
    pub const DE_DE: Culture = Culture::new("de-DE", ',', '.');
    pub const FR_FR: Culture = Culture::new("fr-FR", ',', '\u{202f}');
    pub const NB_NO: Culture = Culture::new("nb-NO", ',', '\u{a0}');
    pub const RU_RU: Culture = Culture::new("ru-RU", ',', '\u{a0}');

    const BUILTIN: [Culture; 7] = [
        Culture::INVARIANT,
        Culture::EN_US,
        Culture::EN_GB,
        Culture::DE_DE,
        Culture::FR_FR,
        Culture::NB_NO,
        Culture::RU_RU,
    ];

    pub const fn new(name: &'static str, decimal_separator: char, group_separator: char) -> Self {
        Culture { name, decimal_separator, group_separator }
    }

    /// Look up a built-in culture by name ("de-DE"). Case-insensitive;
    /// "" and "invariant" both name the invariant culture.
    pub fn find(name: &str) -> Option<Culture> {
        if name.eq_ignore_ascii_case("invariant") {
            return Some(Culture::INVARIANT);
        }
        Self::BUILTIN.iter().copied().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Rewrite a culture-formatted number into invariant form.
    ///
    /// Accepts an optional sign, digits with group separators in the integer
    /// part, this culture's decimal separator and an optional exponent.
    /// "1.234,5" under de-DE becomes "1234.5".
    pub fn normalize_number(&self, text: &str) -> Result<String, NumberError> {
        let malformed = || NumberError::ParseError(text.to_string());
        let chars: Vec<char> = text.trim().chars().collect();
        let mut out = String::with_capacity(chars.len() + 1);
        let mut i = 0;

        if let Some(&sign) = chars.first() {
            if sign == '+' || sign == '-' {
                if sign == '-' {
                    out.push('-');
                }
                i += 1;
            }
        }

        let mut int_digits = 0usize;
        let mut frac_digits = 0usize;
        let mut seen_decimal = false;

        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() {
                out.push(c);
                if seen_decimal {
                    frac_digits += 1;
                } else {
                    int_digits += 1;
                }
            } else if c == self.decimal_separator && !seen_decimal {
                if int_digits == 0 {
                    out.push('0');
                }
                out.push('.');
                seen_decimal = true;
            } else if c == self.group_separator && !seen_decimal {
                // Only between digits: "1,000" yes, ",100" or "1,,0" no
                let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
                let next_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
                if !(prev_digit && next_digit) {
                    return Err(malformed());
                }
            } else if c == 'e' || c == 'E' {
                break;
            } else {
                return Err(malformed());
            }
            i += 1;
        }

        if int_digits + frac_digits == 0 {
            return Err(malformed());
        }
        if seen_decimal && frac_digits == 0 {
            out.pop();
        }

        if i < chars.len() {
            // Exponent: e, optional sign, at least one digit
            out.push('e');
            i += 1;
            if let Some(&sign) = chars.get(i) {
                if sign == '+' || sign == '-' {
                    if sign == '-' {
                        out.push('-');
                    }
                    i += 1;
                }
            }
            let exp_digits = &chars[i.min(chars.len())..];
            if exp_digits.is_empty() || !exp_digits.iter().all(|c| c.is_ascii_digit()) {
                return Err(malformed());
            }
            out.extend(exp_digits);
        }

        Ok(out)
    }

    /// Parse a culture-formatted number as f64. Overflow to infinity is rejected.
    pub fn parse_f64(&self, text: &str) -> Result<f64, NumberError> {
        let normalized = self.normalize_number(text)?;
        let f: f64 = normalized.parse()
            .map_err(|_| NumberError::ParseError(text.to_string()))?;
        if f.is_finite() {
            Ok(f)
        } else {
            Err(NumberError::NonFinite(f))
        }
    }

    /// Parse a culture-formatted number as a decimal Number
    pub fn parse_number(&self, text: &str) -> Result<crate::Number, NumberError> {
        let normalized = self.normalize_number(text)?;
        crate::Number::from_str(&normalized)
    }
}

impl Default for Culture {
    fn default() -> Self {
        Culture::INVARIANT
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            write!(f, "invariant")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl Serialize for Culture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Culture {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Culture::find(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown culture {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(Culture::find("de-DE"), Some(Culture::DE_DE));
        assert_eq!(Culture::find("DE-de"), Some(Culture::DE_DE));
        assert_eq!(Culture::find(""), Some(Culture::INVARIANT));
        assert_eq!(Culture::find("invariant"), Some(Culture::INVARIANT));
        assert_eq!(Culture::find("xx-XX"), None);
    }

    #[test]
    fn test_normalize_invariant() {
        let c = Culture::INVARIANT;
        assert_eq!(c.normalize_number("1.5").unwrap(), "1.5");
        assert_eq!(c.normalize_number("-1,234.5").unwrap(), "-1234.5");
        assert_eq!(c.normalize_number("+2").unwrap(), "2");
        assert_eq!(c.normalize_number(".5").unwrap(), "0.5");
        assert_eq!(c.normalize_number("5.").unwrap(), "5");
        assert_eq!(c.normalize_number("1.5e-3").unwrap(), "1.5e-3");
        assert_eq!(c.normalize_number("2E+4").unwrap(), "2e4");
    }

    #[test]
    fn test_normalize_german() {
        let c = Culture::DE_DE;
        assert_eq!(c.normalize_number("1,5").unwrap(), "1.5");
        assert_eq!(c.normalize_number("1.234,5").unwrap(), "1234.5");
        // A dot after the decimal comma is not a group separator
        assert!(c.normalize_number("1,5.0").is_err());
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let c = Culture::EN_US;
        assert!(c.normalize_number("").is_err());
        assert!(c.normalize_number("-").is_err());
        assert!(c.normalize_number("abc").is_err());
        assert!(c.normalize_number("1e").is_err());
        assert!(c.normalize_number("1e+").is_err());
        assert!(c.normalize_number(",100").is_err());
        assert!(c.normalize_number("1,,0").is_err());
        assert!(c.normalize_number("1.2.3").is_err());
        assert!(c.normalize_number("e5").is_err());
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(Culture::DE_DE.parse_f64("-0,25").unwrap(), -0.25);
        assert_eq!(Culture::EN_US.parse_f64("1,000").unwrap(), 1000.0);
        assert!(matches!(Culture::EN_US.parse_f64("1e999"), Err(NumberError::NonFinite(_))));
    }

    #[test]
    fn test_parse_number() {
        let n = Culture::RU_RU.parse_number("2,5").unwrap();
        assert_eq!(n, crate::Number::from_str("2.5").unwrap());
    }

    #[test]
    fn test_serde_by_name() {
        let json = serde_json::to_string(&Culture::NB_NO).unwrap();
        assert_eq!(json, "\"nb-NO\"");
        let back: Culture = serde_json::from_str("\"fr-FR\"").unwrap();
        assert_eq!(back, Culture::FR_FR);
        assert!(serde_json::from_str::<Culture>("\"xx\"").is_err());
    }
}
