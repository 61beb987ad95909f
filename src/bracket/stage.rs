//! Tournament stages and the round progression between them

use std::fmt;

use super::BracketError;

/// Round a match belongs to, ordered by progression
///
/// `Third` sorts after `Semifinal` but is not on the chain that leads to `Final`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Group,
    Round32,
    Round16,
    Quarterfinal,
    Semifinal,
    Third,
    Final,
}

impl Stage {
    /// The round fed by this one on the way to the final
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Round32 => Some(Stage::Round16),
            Stage::Round16 => Some(Stage::Quarterfinal),
            Stage::Quarterfinal => Some(Stage::Semifinal),
            Stage::Semifinal => Some(Stage::Final),
            Stage::Group | Stage::Third | Stage::Final => None,
        }
    }

    /// Short key used for localized stage names (`stage.<key>`)
    pub fn key(self) -> &'static str {
        match self {
            Stage::Group => "group",
            Stage::Round32 => "round32",
            Stage::Round16 => "round16",
            Stage::Quarterfinal => "quarters",
            Stage::Semifinal => "semis",
            Stage::Third => "third",
            Stage::Final => "final",
        }
    }

    pub fn is_elimination(self) -> bool {
        self != Stage::Group
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// First elimination round for a tournament with `seed_count` seeds
pub fn first_elimination_stage(seed_count: usize) -> Result<Stage, BracketError> {
    match seed_count {
        8 => Ok(Stage::Semifinal),
        12 | 16 => Ok(Stage::Quarterfinal),
        24 | 32 => Ok(Stage::Round16),
        48 | 64 => Ok(Stage::Round32),
        count => Err(BracketError::UnsupportedSeedCount { count }),
    }
}

/// Stage fed by `prev`, given how many matches were resolved at `prev`
///
/// Eight matches always feed the quarterfinals, four quarterfinals feed the
/// semifinals and two semifinals feed the final. Any other count steps to the
/// next round in order.
pub fn next_round(prev: Stage, resolved_prev: usize) -> Result<Stage, BracketError> {
    match (resolved_prev, prev) {
        (8, _) => Ok(Stage::Quarterfinal),
        (4, Stage::Quarterfinal) => Ok(Stage::Semifinal),
        (2, Stage::Semifinal) => Ok(Stage::Final),
        _ => prev.next().ok_or(BracketError::NoNextStage { stage: prev }),
    }
}
