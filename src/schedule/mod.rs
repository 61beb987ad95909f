//! Schedule source: the seeds, matches and properties tables a poster is built from
//!
//! A schedule is a TOML document with three tables:
//!
//! ```toml
//! [properties]
//! competition = "world-cup"
//! host = "usa"
//! timezone = "America/New_York"
//! "color.a" = "#e53935"
//! "venue.01" = "metlife"
//!
//! [seeds]
//! A1 = "mex"
//!
//! [[matches]]
//! match = 1
//! venue = 1
//! home-seed = "A1"
//! away-seed = "A2"
//! time = "2026-06-11T15:00:00-04:00"
//! ```

#[cfg(test)]
pub(crate) mod fixture;
pub mod seed;

pub use seed::{classify_seeds, Outcome, SeedPair};

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ScheduleError;

/// Identifier of a match, unique within a schedule
pub type MatchId = u32;

/// One row of the matches table with its start time parsed
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub id: MatchId,
    pub venue: u32,
    pub home_seed: String,
    pub away_seed: String,
    pub start: DateTime<Utc>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_tiebreaker: Option<u32>,
    pub away_tiebreaker: Option<u32>,
}

/// Key/value properties of a tournament
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Result<&str, ScheduleError> {
        self.values
            .get(key)
            .map(|s| s.as_str())
            .ok_or_else(|| ScheduleError::missing(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Localization key of the competition name
    pub fn competition_key(&self) -> Result<String, ScheduleError> {
        Ok(format!("competition.{}", self.get("competition")?))
    }

    /// Localization key of the host location
    pub fn host_key(&self) -> Result<String, ScheduleError> {
        Ok(format!("host.{}", self.get("host")?))
    }

    /// IANA name of the tournament's home timezone
    pub fn timezone(&self) -> Result<&str, ScheduleError> {
        self.get("timezone")
    }

    pub fn group_color(&self, group: char) -> Result<&str, ScheduleError> {
        self.get(&format!("color.{}", group.to_ascii_lowercase()))
    }

    /// Localization key of a venue, looked up through `venue.NN`
    pub fn venue_key(&self, venue: u32) -> Result<String, ScheduleError> {
        Ok(format!("venue.{}", self.get(&format!("venue.{:02}", venue))?))
    }
}

/// A complete tournament schedule
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Tournament name, usually the file stem (e.g. `2026-mens-world-cup`)
    pub name: String,
    pub properties: Properties,
    /// Seed code to team key
    pub seeds: BTreeMap<String, String>,
    pub matches: Vec<MatchRow>,
}

#[derive(Deserialize)]
struct TomlSchedule {
    #[serde(default)]
    properties: BTreeMap<String, String>,
    #[serde(default)]
    seeds: BTreeMap<String, String>,
    #[serde(default)]
    matches: Vec<TomlMatchRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlMatchRow {
    #[serde(rename = "match")]
    id: MatchId,
    venue: u32,
    home_seed: String,
    away_seed: String,
    time: String,
    home_team: Option<String>,
    away_team: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
    home_tiebreaker: Option<u32>,
    away_tiebreaker: Option<u32>,
}

impl TomlMatchRow {
    fn into_row(self) -> Result<MatchRow, ScheduleError> {
        let start = DateTime::parse_from_rfc3339(&self.time)
            .map_err(|_| ScheduleError::BadStartTime {
                id: self.id,
                value: self.time.clone(),
            })?
            .with_timezone(&Utc);

        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());

        Ok(MatchRow {
            id: self.id,
            venue: self.venue,
            home_seed: self.home_seed,
            away_seed: self.away_seed,
            start,
            home_team: non_empty(self.home_team),
            away_team: non_empty(self.away_team),
            home_score: self.home_score,
            away_score: self.away_score,
            home_tiebreaker: self.home_tiebreaker,
            away_tiebreaker: self.away_tiebreaker,
        })
    }
}

impl Schedule {
    /// Load a schedule from a TOML file, naming it after the file stem
    pub fn from_file(path: &Path) -> Result<Self, ScheduleError> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_str(&name, &content)
    }

    /// Parse a schedule from TOML text
    pub fn from_str(name: &str, content: &str) -> Result<Self, ScheduleError> {
        let parsed: TomlSchedule = toml::from_str(content)?;

        let mut seen = HashSet::new();
        let mut matches = Vec::with_capacity(parsed.matches.len());
        for row in parsed.matches {
            if !seen.insert(row.id) {
                return Err(ScheduleError::DuplicateMatch { id: row.id });
            }
            matches.push(row.into_row()?);
        }

        Ok(Schedule {
            name: name.to_string(),
            properties: Properties::new(parsed.properties),
            seeds: parsed.seeds,
            matches,
        })
    }
}
