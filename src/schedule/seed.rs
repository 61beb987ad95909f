//! Seed code classification
//!
//! A match names its two participants with seed codes. Three shapes exist:
//! - both codes are known seeds (`A1`, `A2`): a group match
//! - slot-then-group codes (`1A`, `2B`, `3CDE`): a first elimination round match
//! - outcome-then-match codes (`W49`, `RU61`, `L61`): a match fed by earlier matches

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::MatchId;
use crate::bracket::BracketError;

static SLOT_THEN_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-*([A-Za-z]+)$").expect("valid regex"));
static OUTCOME_THEN_MATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)-*([0-9]+)$").expect("valid regex"));

/// Which result of a feeder match advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner,
    RunnerUp,
    Loser,
}

impl Outcome {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "W" => Some(Outcome::Winner),
            "RU" => Some(Outcome::RunnerUp),
            "L" => Some(Outcome::Loser),
            _ => None,
        }
    }
}

/// Classification of a match's home/away seed codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedPair {
    /// Both seeds are group slots of the same group
    Group { group: char },
    /// Slot-then-group codes; `groups` holds every group letter of both codes
    FirstRound { groups: Vec<char> },
    /// Both participants come from earlier matches
    Feeders {
        outcome: Outcome,
        home: MatchId,
        away: MatchId,
    },
}

/// Classify a match's two seed codes against the known seed table
pub fn classify_seeds(
    home: &str,
    away: &str,
    seeds: &BTreeMap<String, String>,
) -> Result<SeedPair, BracketError> {
    if seeds.contains_key(home) && seeds.contains_key(away) {
        let group_home = home.chars().next();
        let group_away = away.chars().next();
        return match (group_home, group_away) {
            (Some(a), Some(b)) if a == b => Ok(SeedPair::Group { group: a }),
            _ => Err(BracketError::MismatchedGroupSeeds {
                home: home.to_string(),
                away: away.to_string(),
            }),
        };
    }

    if let Some(cap_home) = SLOT_THEN_GROUP.captures(home) {
        let cap_away = SLOT_THEN_GROUP
            .captures(away)
            .ok_or_else(|| BracketError::malformed(home, away))?;
        let groups = cap_home[2].chars().chain(cap_away[2].chars()).collect();
        return Ok(SeedPair::FirstRound { groups });
    }

    if let Some(cap_home) = OUTCOME_THEN_MATCH.captures(home) {
        let cap_away = OUTCOME_THEN_MATCH
            .captures(away)
            .ok_or_else(|| BracketError::malformed(home, away))?;
        if cap_home[1] != cap_away[1] {
            return Err(BracketError::malformed(home, away));
        }
        let outcome =
            Outcome::from_prefix(&cap_home[1]).ok_or_else(|| BracketError::malformed(home, away))?;
        let home_id = cap_home[2]
            .parse()
            .map_err(|_| BracketError::malformed(home, away))?;
        let away_id = cap_away[2]
            .parse()
            .map_err(|_| BracketError::malformed(home, away))?;
        return Ok(SeedPair::Feeders {
            outcome,
            home: home_id,
            away: away_id,
        });
    }

    Err(BracketError::malformed(home, away))
}
