//! Locale rules, localized strings and timezone labels
//!
//! A [`Locale`] answers the handful of questions the poster layout asks of a
//! locale: which weekday starts a week, which way text runs, whether times
//! use a 12 hour clock, and which paper system the territory prints on.

mod dates;
mod error;
mod strings;
mod timezone;

pub use dates::DateFormatter;
pub use error::LocaleError;
pub use strings::{fill, StringTable, DEFAULT_STRINGS};
pub use timezone::{parse_tz, tz_abbreviation, tz_header};

use std::fmt;

use chrono::Weekday;

const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "ur"];

const SUNDAY_TERRITORIES: &[&str] = &[
    "us", "ca", "mx", "jp", "br", "ph", "il", "pr", "co", "ve", "gt", "pa", "sv",
];
const SUNDAY_LANGUAGES: &[&str] = &["en", "ja", "he"];
const SATURDAY_TERRITORIES: &[&str] = &["ir", "af"];

const HOUR12_TERRITORIES: &[&str] = &["us", "ca", "au", "nz", "ph", "in", "pk", "eg", "sa"];

const US_PAPER_TERRITORIES: &[&str] = &[
    "us", "ca", "mx", "cl", "co", "cr", "gt", "pa", "ph", "pr", "ve", "sv",
];

/// A language with an optional territory, e.g. `en_US` or `fa`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Lowercase ISO 639 language code
    pub language: String,
    /// Uppercase ISO 3166 territory code
    pub territory: Option<String>,
}

impl Locale {
    /// Parse `ll`, `ll_TT` or `ll-TT`
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        let invalid = || LocaleError::InvalidLocale {
            value: s.to_string(),
        };
        let mut parts = s.split(['_', '-']);
        let language = parts.next().filter(|l| is_code(l, 2..=3)).ok_or_else(invalid)?;
        let territory = match parts.next() {
            Some(t) if is_code(t, 2..=3) => Some(t.to_ascii_uppercase()),
            Some(_) => return Err(invalid()),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            territory,
        })
    }

    fn territory_in(&self, set: &[&str]) -> bool {
        self.territory
            .as_deref()
            .map(|t| set.contains(&t.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// `ll_TT`, or just `ll` without a territory
    pub fn tag(&self) -> String {
        match &self.territory {
            Some(t) => format!("{}_{}", self.language, t),
            None => self.language.clone(),
        }
    }

    pub fn first_weekday(&self) -> Weekday {
        if self.language == "fa" || self.territory_in(SATURDAY_TERRITORIES) {
            Weekday::Sat
        } else if self.territory_in(SUNDAY_TERRITORIES)
            || (self.territory.is_none() && SUNDAY_LANGUAGES.contains(&self.language.as_str()))
        {
            Weekday::Sun
        } else {
            Weekday::Mon
        }
    }

    pub fn last_weekday(&self) -> Weekday {
        self.first_weekday().pred()
    }

    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.language.as_str())
    }

    pub fn hour12(&self) -> bool {
        self.territory_in(HOUR12_TERRITORIES)
            || (self.territory.is_none() && self.language == "en")
    }

    /// Whether the territory prints on US letter based paper sizes
    pub fn uses_us_paper(&self) -> bool {
        self.territory_in(US_PAPER_TERRITORIES)
    }
}

fn is_code(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            territory: Some("US".to_string()),
        }
    }
}
