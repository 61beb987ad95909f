//! Groups derived from the seed table

use std::collections::{BTreeMap, BTreeSet};

use super::BracketError;
use crate::color::GroupColors;
use crate::schedule::Properties;

const GROUP_LETTERS: &str = "ABCDEFGHIJKLMNOP";

/// A group: its letter, colors and the seeds drawn into it
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: char,
    pub colors: GroupColors,
    /// Seed code to team key, for seeds starting with this group's letter
    pub seeds: BTreeMap<String, String>,
}

impl Group {
    /// Team keys ordered by seed code
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.seeds.values().map(|s| s.as_str())
    }
}

/// Build every group named by the seed table, validating the letter set
pub fn build_groups(
    seeds: &BTreeMap<String, String>,
    properties: &Properties,
) -> Result<BTreeMap<char, Group>, BracketError> {
    let letters: BTreeSet<char> = seeds.keys().filter_map(|s| s.chars().next()).collect();
    let found: String = letters.iter().collect();

    if letters.len() > GROUP_LETTERS.len() || !GROUP_LETTERS.starts_with(found.as_str()) {
        return Err(BracketError::BadGroupSet { found });
    }

    letters
        .into_iter()
        .map(|letter| -> Result<(char, Group), BracketError> {
            let colors = GroupColors::parse(letter, properties.group_color(letter)?)?;
            let group_seeds = seeds
                .iter()
                .filter(|(seed, _)| seed.starts_with(letter))
                .map(|(seed, team)| (seed.clone(), team.clone()))
                .collect();
            Ok((
                letter,
                Group {
                    name: letter,
                    colors,
                    seeds: group_seeds,
                },
            ))
        })
        .collect()
}
