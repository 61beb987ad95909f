//! Localized string table
//!
//! Strings are stored as `section -> key -> locale -> text`:
//!
//! ```toml
//! [stage]
//! final = { en = "Final", es = "Final", fa = "فینال" }
//!
//! [country]
//! mex = { en = "Mexico", es = "México" }
//! ```
//!
//! Lookups resolve the exact locale first, then the bare language, then
//! English. Only a miss at all three levels is an error.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::{Locale, LocaleError};

/// Base language every lookup falls back to
const FALLBACK_LANGUAGE: &str = "en";

/// Built-in English strings for page furniture, stage names and calendar text
pub const DEFAULT_STRINGS: &str = r#"
[page]
"title.fixtures" = { en = "Fixtures" }
"title.results" = { en = "Results" }
"format.title" = { en = "{year} {name} {label}" }
"format.dates-and-location" = { en = "{dates} | {location}" }
"format.timezone" = { en = "{label}: {timezone}" }
"timezone.label" = { en = "All times" }
"format.footer" = { en = "{credits} | {locale} | {paper}" }
"format.month-day" = { en = "{month} {day}" }
"format.month-year" = { en = "{month} {year}" }
"format.weekday-date" = { en = "{weekday}, {month} {day}" }
"format.date-range" = { en = "{start} - {end}" }
credits = { en = "tourney-poster" }

[group]
title = { en = "Group" }
points = { en = "PTS" }
goals-for = { en = "GF" }
goals-against = { en = "GA" }

[stage]
group = { en = "Group Stage" }
round32 = { en = "Round of 32" }
round16 = { en = "Round of 16" }
quarters = { en = "Quarterfinals" }
semis = { en = "Semifinals" }
third = { en = "Third Place" }
final = { en = "Final" }

[match]
"format.label" = { en = "Match {id}" }

[month]
"1" = { en = "January" }
"2" = { en = "February" }
"3" = { en = "March" }
"4" = { en = "April" }
"5" = { en = "May" }
"6" = { en = "June" }
"7" = { en = "July" }
"8" = { en = "August" }
"9" = { en = "September" }
"10" = { en = "October" }
"11" = { en = "November" }
"12" = { en = "December" }
"short.1" = { en = "Jan" }
"short.2" = { en = "Feb" }
"short.3" = { en = "Mar" }
"short.4" = { en = "Apr" }
"short.5" = { en = "May" }
"short.6" = { en = "Jun" }
"short.7" = { en = "Jul" }
"short.8" = { en = "Aug" }
"short.9" = { en = "Sep" }
"short.10" = { en = "Oct" }
"short.11" = { en = "Nov" }
"short.12" = { en = "Dec" }

[weekday]
mon = { en = "Mon" }
tue = { en = "Tue" }
wed = { en = "Wed" }
thu = { en = "Thu" }
fri = { en = "Fri" }
sat = { en = "Sat" }
sun = { en = "Sun" }
"full.mon" = { en = "Monday" }
"full.tue" = { en = "Tuesday" }
"full.wed" = { en = "Wednesday" }
"full.thu" = { en = "Thursday" }
"full.fri" = { en = "Friday" }
"full.sat" = { en = "Saturday" }
"full.sun" = { en = "Sunday" }

[fonts]
"page.header.title" = { en = "Oswald" }
"group.name" = { en = "Oswald" }
"group.label" = { en = "Oswald" }
"group.heading" = { en = "Oswald" }
"group.team.name" = { en = "Roboto Condensed" }
"group.team.abbrev" = { en = "Oswald" }
"calendar.day-of-week" = { en = "Oswald" }
"day.date" = { en = "Oswald" }
"elim.date" = { en = "Oswald" }
"elim.stage" = { en = "Oswald" }
"match.time" = { en = "Roboto Condensed" }
"match.score" = { en = "Roboto Condensed" }
"match.label" = { en = "Roboto Condensed" }
"match.form.label" = { en = "Roboto Condensed" }
"match.form.label-inverse" = { en = "Roboto Condensed Italic" }
"match.team.abbrev" = { en = "Roboto Condensed" }
"final.title" = { en = "Oswald" }
"final.date" = { en = "Oswald" }
"final.time" = { en = "Oswald" }
"final.form.label" = { en = "Roboto Condensed" }
"elim.label" = { en = "Roboto Condensed" }
"#;

type TomlStrings = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Localized strings keyed by `section.key`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringTable {
    /// Lowercased full key -> locale tag -> text
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl StringTable {
    /// An empty table with no fallback strings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LocaleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a table from TOML text
    pub fn from_str(content: &str) -> Result<Self, LocaleError> {
        let parsed: TomlStrings = toml::from_str(content)?;
        let mut table = Self::new();
        for (section, keys) in parsed {
            for (key, texts) in keys {
                for (locale, text) in texts {
                    table.insert(&format!("{}.{}", section, key), &locale, text);
                }
            }
        }
        Ok(table)
    }

    /// Add or replace the text of `key` for one locale tag (`en`, `es_MX`, `es-MX`)
    pub fn insert(&mut self, key: &str, locale: &str, text: impl Into<String>) {
        self.entries
            .entry(key.to_lowercase())
            .or_default()
            .insert(normalize_tag(locale), text.into());
    }

    /// Overlay every entry of `other` onto this table
    pub fn merge(&mut self, other: StringTable) {
        for (key, texts) in other.entries {
            self.entries.entry(key).or_default().extend(texts);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// Whether `section.<key>` exists for every key in `keys`
    pub fn section_has_all_keys(&self, section: &str, keys: &BTreeSet<String>) -> bool {
        keys.iter()
            .all(|key| self.contains_key(&format!("{}.{}", section, key)))
    }

    /// Resolve `key` for `locale`, falling back to its language and then English
    pub fn get(&self, key: &str, locale: &Locale) -> Result<&str, LocaleError> {
        let texts = self
            .entries
            .get(&key.to_lowercase())
            .ok_or_else(|| LocaleError::missing(key, locale.tag()))?;

        [
            locale.tag(),
            locale.language.clone(),
            FALLBACK_LANGUAGE.to_string(),
        ]
        .iter()
        .find_map(|tag| texts.get(tag))
        .map(|s| s.as_str())
        .ok_or_else(|| LocaleError::missing(key, locale.tag()))
    }
}

fn normalize_tag(tag: &str) -> String {
    match tag.split_once(['_', '-']) {
        Some((language, territory)) => format!(
            "{}_{}",
            language.to_ascii_lowercase(),
            territory.to_ascii_uppercase()
        ),
        None => tag.to_ascii_lowercase(),
    }
}

/// Replace every `{name}` in `template` with its value
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{}}}", name), value)
        })
}
