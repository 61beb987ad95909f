//! Bracket inference
//!
//! Reconstructs stages, feeder links, draw order and bracket halves from seed
//! codes alone. See [`BracketModel::build`].

mod error;
mod group;
mod model;
mod stage;

pub use error::BracketError;
pub use group::{build_groups, Group};
pub use model::{
    infer_stages, link_feeders, BracketModel, Feeders, LinkedMatch, Match, MatchInfo, RawMatch,
};
pub use stage::{first_elimination_stage, next_round, Stage};

pub use crate::schedule::MatchId;
