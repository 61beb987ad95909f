//! Error types for bracket construction

use thiserror::Error;

use super::Stage;
use crate::error::ScheduleError;
use crate::schedule::MatchId;

/// Errors that can occur while building a bracket model
#[derive(Debug, Error)]
pub enum BracketError {
    /// Seed codes that fit none of the known shapes
    #[error("malformed seed codes '{home}' / '{away}'")]
    MalformedSeed { home: String, away: String },

    /// Group seeds from two different groups in one match
    #[error("group match seeds '{home}' and '{away}' are from different groups")]
    MismatchedGroupSeeds { home: String, away: String },

    /// A feeder reference to a match that does not exist
    #[error("match {id} is fed by unknown match {feeder}")]
    UnknownFeeder { id: MatchId, feeder: MatchId },

    /// A match that feeds more than one later match
    #[error("match {feeder} feeds both match {first} and match {second}")]
    FeederClaimedTwice {
        feeder: MatchId,
        first: MatchId,
        second: MatchId,
    },

    /// A propagation round that resolved nothing
    #[error("stage inference stalled after {stage} with {unresolved} unresolved matches")]
    StageInferenceStalled { stage: Stage, unresolved: usize },

    /// Stage after which no further round exists
    #[error("no round follows {stage}")]
    NoNextStage { stage: Stage },

    #[error("unsupported seed count {count} (expected 8, 12, 16, 24, 32, 48 or 64)")]
    UnsupportedSeedCount { count: usize },

    #[error("expected exactly one final, found {count}")]
    FinalCount { count: usize },

    #[error("expected at most one third place match, found {count}")]
    ThirdCount { count: usize },

    /// First elimination round merge without at least two groups
    #[error("match {id} merges first round groups {groups:?}")]
    FirstRoundGroups { id: MatchId, groups: Vec<char> },

    /// Group letters that are not the first N letters of A..P
    #[error("group letters '{found}' must be the first letters of A..P (at most 16)")]
    BadGroupSet { found: String },

    #[error("group {group} has unparseable color '{value}'")]
    BadColor { group: char, value: String },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl BracketError {
    /// Create a malformed seed error
    pub fn malformed(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self::MalformedSeed {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Create a stall error
    pub fn stalled(stage: Stage, unresolved: usize) -> Self {
        Self::StageInferenceStalled { stage, unresolved }
    }
}
