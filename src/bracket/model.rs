//! Bracket model construction
//!
//! Matches go through three phases. [`RawMatch`] holds classified seed codes,
//! [`LinkedMatch`] adds the back-reference to the match it feeds, and
//! [`Match`] carries a resolved stage, group list and draw order. The model
//! keeps its matches in a flat arena addressed by match id and never mutates
//! them once built.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{build_groups, first_elimination_stage, next_round, BracketError, Group, Stage};
use crate::locale::StringTable;
use crate::schedule::{classify_seeds, MatchId, MatchRow, Outcome, Properties, Schedule, SeedPair};

/// Facts about a match that do not change between build phases
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInfo {
    pub id: MatchId,
    pub venue: u32,
    pub start: DateTime<Utc>,
    pub home_seed: String,
    pub away_seed: String,
    /// Team key, empty until known
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_tiebreaker: Option<u32>,
    pub away_tiebreaker: Option<u32>,
}

impl MatchInfo {
    /// Teams come from the explicit team columns, else the seed table
    fn from_row(row: &MatchRow, seeds: &BTreeMap<String, String>) -> Self {
        let team = |explicit: &Option<String>, seed: &str| {
            explicit
                .clone()
                .or_else(|| seeds.get(seed).cloned())
                .unwrap_or_default()
        };
        Self {
            id: row.id,
            venue: row.venue,
            start: row.start,
            home_team: team(&row.home_team, &row.home_seed),
            away_team: team(&row.away_team, &row.away_seed),
            home_seed: row.home_seed.clone(),
            away_seed: row.away_seed.clone(),
            home_score: row.home_score,
            away_score: row.away_score,
            home_tiebreaker: row.home_tiebreaker,
            away_tiebreaker: row.away_tiebreaker,
        }
    }

    pub fn has_teams(&self) -> bool {
        !self.home_team.is_empty() && !self.away_team.is_empty()
    }

    pub fn has_results(&self) -> bool {
        self.has_teams() && self.home_score.is_some() && self.away_score.is_some()
    }
}

/// Home and away feeder match ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feeders {
    pub home: MatchId,
    pub away: MatchId,
}

/// A match with classified seed codes
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    pub info: MatchInfo,
    pub seeds: SeedPair,
}

impl RawMatch {
    pub fn parse(row: &MatchRow, seeds: &BTreeMap<String, String>) -> Result<Self, BracketError> {
        Ok(Self {
            info: MatchInfo::from_row(row, seeds),
            seeds: classify_seeds(&row.home_seed, &row.away_seed, seeds)?,
        })
    }

    pub fn feeders(&self) -> Option<Feeders> {
        match self.seeds {
            SeedPair::Feeders { home, away, .. } => Some(Feeders { home, away }),
            _ => None,
        }
    }

    /// Fed by runners-up or losers: the third place match
    pub fn is_third(&self) -> bool {
        matches!(
            self.seeds,
            SeedPair::Feeders {
                outcome: Outcome::RunnerUp | Outcome::Loser,
                ..
            }
        )
    }

    /// Stage known from the seed codes alone
    fn initial_stage(&self, first: Stage) -> Option<Stage> {
        match &self.seeds {
            SeedPair::Group { .. } => Some(Stage::Group),
            SeedPair::FirstRound { .. } => Some(first),
            SeedPair::Feeders { .. } if self.is_third() => Some(Stage::Third),
            SeedPair::Feeders { .. } => None,
        }
    }

    fn initial_groups(&self) -> Vec<char> {
        match &self.seeds {
            SeedPair::Group { group } => vec![*group],
            SeedPair::FirstRound { groups } => groups.clone(),
            SeedPair::Feeders { .. } => Vec::new(),
        }
    }
}

/// A match that knows which later match it feeds
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedMatch {
    pub raw: RawMatch,
    pub fed_by: Option<MatchId>,
}

/// A fully classified match
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub info: MatchInfo,
    pub stage: Stage,
    /// Groups whose teams can reach this match
    pub groups: Vec<char>,
    pub feeders: Option<Feeders>,
    pub fed_by: Option<MatchId>,
    /// In-order position in the bracket tree, 0 outside it
    pub sort_elim: u32,
}

impl Match {
    pub fn id(&self) -> MatchId {
        self.info.id
    }
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a MatchId>) -> HashMap<MatchId, usize> {
    ids.enumerate().map(|(i, id)| (*id, i)).collect()
}

/// Point every feeder at the match it feeds
///
/// The third place match is skipped: its feeders already feed the final.
pub fn link_feeders(raws: Vec<RawMatch>) -> Result<Vec<LinkedMatch>, BracketError> {
    let index = index_by_id(raws.iter().map(|m| &m.info.id));
    let mut fed_by: Vec<Option<MatchId>> = vec![None; raws.len()];

    for raw in &raws {
        let Some(feeders) = raw.feeders() else {
            continue;
        };
        for feeder in [feeders.home, feeders.away] {
            let Some(&i) = index.get(&feeder) else {
                return Err(BracketError::UnknownFeeder {
                    id: raw.info.id,
                    feeder,
                });
            };
            if raw.is_third() {
                continue;
            }
            if let Some(first) = fed_by[i] {
                return Err(BracketError::FeederClaimedTwice {
                    feeder,
                    first,
                    second: raw.info.id,
                });
            }
            fed_by[i] = Some(raw.info.id);
        }
    }

    Ok(raws
        .into_iter()
        .zip(fed_by)
        .map(|(raw, fed_by)| LinkedMatch { raw, fed_by })
        .collect())
}

/// Union of two group lists, first-seen order
fn merge_groups(home: &[char], away: &[char]) -> Vec<char> {
    let mut merged = Vec::with_capacity(home.len() + away.len());
    for &group in home.iter().chain(away) {
        if !merged.contains(&group) {
            merged.push(group);
        }
    }
    merged
}

/// Resolve every unresolved stage, one round at a time
pub fn infer_stages(
    linked: Vec<LinkedMatch>,
    first: Stage,
    all_groups: &[char],
) -> Result<Vec<Match>, BracketError> {
    let index = index_by_id(linked.iter().map(|m| &m.raw.info.id));
    let mut stages: Vec<Option<Stage>> = linked
        .iter()
        .map(|m| m.raw.initial_stage(first))
        .collect();
    let mut groups: Vec<Vec<char>> = linked.iter().map(|m| m.raw.initial_groups()).collect();

    let mut prev = first;
    loop {
        let unresolved: Vec<usize> = (0..linked.len()).filter(|&i| stages[i].is_none()).collect();
        if unresolved.is_empty() {
            break;
        }

        let resolved_prev = stages.iter().filter(|s| **s == Some(prev)).count();
        if resolved_prev == 0 {
            return Err(BracketError::stalled(prev, unresolved.len()));
        }
        let next = next_round(prev, resolved_prev)?;

        let mut resolved = Vec::new();
        for &i in &unresolved {
            let Some(feeders) = linked[i].raw.feeders() else {
                continue;
            };
            let (Some(&home), Some(&away)) = (index.get(&feeders.home), index.get(&feeders.away))
            else {
                continue;
            };
            if stages[home] != Some(prev) || stages[away] != Some(prev) {
                continue;
            }

            let merged = merge_groups(&groups[home], &groups[away]);
            let merged = if prev == first {
                if merged.len() < 2 {
                    return Err(BracketError::FirstRoundGroups {
                        id: linked[i].raw.info.id,
                        groups: merged,
                    });
                }
                merged
            } else if merged.len() >= all_groups.len() {
                all_groups.to_vec()
            } else {
                merged
            };
            resolved.push((i, merged));
        }

        if resolved.is_empty() {
            return Err(BracketError::stalled(prev, unresolved.len()));
        }
        debug!(from = %prev, to = %next, resolved = resolved.len(), "resolved round");

        for (i, merged) in resolved {
            stages[i] = Some(next);
            groups[i] = merged;
        }
        prev = next;
    }

    linked
        .into_iter()
        .zip(stages)
        .zip(groups)
        .map(|((m, stage), groups)| {
            let stage = stage.ok_or_else(|| BracketError::stalled(prev, 1))?;
            Ok(Match {
                feeders: m.raw.feeders(),
                info: m.raw.info,
                stage,
                groups,
                fed_by: m.fed_by,
                sort_elim: 0,
            })
        })
        .collect()
}

enum Visit {
    Expand(usize),
    Emit(usize),
}

/// Number the bracket tree in order: home subtree, match, away subtree
fn assign_sort_elim(matches: &mut [Match], index: &HashMap<MatchId, usize>, root: usize) {
    let mut next = 1;
    let mut stack = vec![Visit::Expand(root)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Emit(i) => {
                matches[i].sort_elim = next;
                next += 1;
            }
            Visit::Expand(i) => {
                let feeders = matches[i]
                    .feeders
                    .and_then(|f| Some((*index.get(&f.home)?, *index.get(&f.away)?)));
                match feeders {
                    Some((home, away)) => {
                        stack.push(Visit::Expand(away));
                        stack.push(Visit::Emit(i));
                        stack.push(Visit::Expand(home));
                    }
                    None => stack.push(Visit::Emit(i)),
                }
            }
        }
    }
}

/// `start` plus every match that transitively feeds it
fn feeding(matches: &[Match], index: &HashMap<MatchId, usize>, start: MatchId) -> BTreeSet<MatchId> {
    let mut seen = BTreeSet::from([start]);
    let mut visit = vec![start];

    while let Some(id) = visit.pop() {
        let feeders = index.get(&id).and_then(|&i| matches[i].feeders);
        if let Some(f) = feeders {
            for feeder in [f.home, f.away] {
                if seen.insert(feeder) {
                    visit.push(feeder);
                }
            }
        }
    }
    seen
}

/// All matches and groups of a tournament with the derived bracket structure
#[derive(Debug, Clone)]
pub struct BracketModel {
    name: String,
    properties: Properties,
    seeds: BTreeMap<String, String>,
    groups: BTreeMap<char, Group>,
    group_letters: Vec<char>,
    first_stage: Stage,
    matches: Vec<Match>,
    index: HashMap<MatchId, usize>,
    final_index: usize,
    third_index: Option<usize>,
    home_half: BTreeSet<MatchId>,
    away_half: BTreeSet<MatchId>,
}

impl BracketModel {
    /// Parse, link and classify every match of a schedule
    pub fn build(schedule: &Schedule) -> Result<Self, BracketError> {
        let first_stage = first_elimination_stage(schedule.seeds.len())?;
        let groups = build_groups(&schedule.seeds, &schedule.properties)?;
        let group_letters: Vec<char> = groups.keys().copied().collect();

        let raws = schedule
            .matches
            .iter()
            .map(|row| RawMatch::parse(row, &schedule.seeds))
            .collect::<Result<Vec<_>, _>>()?;
        let linked = link_feeders(raws)?;
        let mut matches = infer_stages(linked, first_stage, &group_letters)?;
        let index = index_by_id(matches.iter().map(|m| &m.info.id));

        let finals: Vec<usize> = (0..matches.len())
            .filter(|&i| matches[i].stage == Stage::Final)
            .collect();
        let [final_index] = finals[..] else {
            return Err(BracketError::FinalCount {
                count: finals.len(),
            });
        };

        let thirds: Vec<usize> = (0..matches.len())
            .filter(|&i| matches[i].stage == Stage::Third)
            .collect();
        if thirds.len() > 1 {
            return Err(BracketError::ThirdCount {
                count: thirds.len(),
            });
        }
        let third_index = thirds.first().copied();

        assign_sort_elim(&mut matches, &index, final_index);

        let (home_half, away_half) = match matches[final_index].feeders {
            Some(f) => (
                feeding(&matches, &index, f.home),
                feeding(&matches, &index, f.away),
            ),
            None => (BTreeSet::new(), BTreeSet::new()),
        };

        debug!(
            tournament = %schedule.name,
            matches = matches.len(),
            first = %first_stage,
            "built bracket model"
        );

        Ok(Self {
            name: schedule.name.clone(),
            properties: schedule.properties.clone(),
            seeds: schedule.seeds.clone(),
            groups,
            group_letters,
            first_stage,
            matches,
            index,
            final_index,
            third_index,
            home_half,
            away_half,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn seeds(&self) -> &BTreeMap<String, String> {
        &self.seeds
    }

    pub fn team_count(&self) -> usize {
        self.seeds.len()
    }

    pub fn groups(&self) -> &BTreeMap<char, Group> {
        &self.groups
    }

    pub fn group(&self, letter: char) -> Option<&Group> {
        self.groups.get(&letter)
    }

    /// Sorted group letters
    pub fn group_letters(&self) -> &[char] {
        &self.group_letters
    }

    pub fn first_stage(&self) -> Stage {
        self.first_stage
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.index.get(&id).map(|&i| &self.matches[i])
    }

    pub fn final_match(&self) -> &Match {
        &self.matches[self.final_index]
    }

    pub fn third_match(&self) -> Option<&Match> {
        self.third_index.map(|i| &self.matches[i])
    }

    /// Matches feeding the final's home side, including its home feeder
    pub fn home_half(&self) -> &BTreeSet<MatchId> {
        &self.home_half
    }

    pub fn away_half(&self) -> &BTreeSet<MatchId> {
        &self.away_half
    }

    pub fn matches_in_stage(&self, stage: Stage) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.stage == stage).collect()
    }

    pub fn group_matches(&self) -> Vec<&Match> {
        self.matches_in_stage(Stage::Group)
    }

    /// Bracket matches below the final, excluding the third place match
    pub fn elimination_matches(&self) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| !matches!(m.stage, Stage::Group | Stage::Third | Stage::Final))
            .collect()
    }

    /// Distinct stages of [`Self::elimination_matches`], in round order
    pub fn elimination_stages(&self) -> Vec<Stage> {
        let stages: BTreeSet<Stage> = self.elimination_matches().iter().map(|m| m.stage).collect();
        stages.into_iter().collect()
    }

    pub fn has_all_results(&self) -> bool {
        self.matches.iter().all(|m| m.info.has_results())
    }

    /// Localization prefix for team keys: clubs only when every team is a known club
    /// and not every team is a known country
    pub fn team_key_prefix(&self, strings: &StringTable) -> &'static str {
        let teams: BTreeSet<String> = self.seeds.values().map(|t| t.to_lowercase()).collect();
        let all_countries = strings.section_has_all_keys("country", &teams);
        let all_clubs = strings.section_has_all_keys("club", &teams);
        if all_countries || !all_clubs {
            "country."
        } else {
            "club."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Two groups of four, semifinals, final and third place
    const EIGHT: &str = r##"
[properties]
competition = "mini"
host = "here"
timezone = "UTC"
"color.a" = "#e53935"
"color.b" = "#1e88e5"

[seeds]
A1 = "aaa"
A2 = "aab"
A3 = "aac"
A4 = "aad"
B1 = "bba"
B2 = "bbb"
B3 = "bbc"
B4 = "bbd"

[[matches]]
match = 1
venue = 1
home-seed = "A1"
away-seed = "A2"
time = "2026-06-11T15:00:00Z"

[[matches]]
match = 2
venue = 1
home-seed = "B1"
away-seed = "B2"
time = "2026-06-11T18:00:00Z"

[[matches]]
match = 3
venue = 1
home-seed = "1A"
away-seed = "2B"
time = "2026-06-20T15:00:00Z"

[[matches]]
match = 4
venue = 1
home-seed = "1B"
away-seed = "2A"
time = "2026-06-20T18:00:00Z"

[[matches]]
match = 5
venue = 1
home-seed = "L3"
away-seed = "L4"
time = "2026-06-24T15:00:00Z"

[[matches]]
match = 6
venue = 1
home-seed = "W3"
away-seed = "W4"
time = "2026-06-25T15:00:00Z"
home-team = "aaa"
"##;

    fn eight() -> BracketModel {
        let schedule = Schedule::from_str("mini", EIGHT).unwrap();
        BracketModel::build(&schedule).unwrap()
    }

    #[test]
    fn test_eight_seed_stages() {
        let model = eight();
        assert_eq!(model.first_stage(), Stage::Semifinal);
        assert_eq!(model.get(1).unwrap().stage, Stage::Group);
        assert_eq!(model.get(3).unwrap().stage, Stage::Semifinal);
        assert_eq!(model.get(4).unwrap().stage, Stage::Semifinal);
        assert_eq!(model.final_match().id(), 6);
        assert_eq!(model.third_match().map(|m| m.id()), Some(5));
    }

    #[test]
    fn test_group_lists() {
        let model = eight();
        assert_eq!(model.get(1).unwrap().groups, vec!['A']);
        assert_eq!(model.get(3).unwrap().groups, vec!['A', 'B']);
        assert_eq!(model.get(4).unwrap().groups, vec!['B', 'A']);
        assert_eq!(model.final_match().groups, vec!['A', 'B']);
        assert!(model.third_match().unwrap().groups.is_empty());
    }

    #[test]
    fn test_feeder_links_skip_third() {
        let model = eight();
        assert_eq!(model.get(3).unwrap().fed_by, Some(6));
        assert_eq!(model.get(4).unwrap().fed_by, Some(6));
        assert_eq!(model.final_match().fed_by, None);
    }

    #[test]
    fn test_sort_elim_in_order() {
        let model = eight();
        assert_eq!(model.get(3).unwrap().sort_elim, 1);
        assert_eq!(model.final_match().sort_elim, 2);
        assert_eq!(model.get(4).unwrap().sort_elim, 3);
        assert_eq!(model.get(1).unwrap().sort_elim, 0);
        assert_eq!(model.third_match().unwrap().sort_elim, 0);
    }

    #[test]
    fn test_halves() {
        let model = eight();
        assert_eq!(model.home_half(), &BTreeSet::from([3]));
        assert_eq!(model.away_half(), &BTreeSet::from([4]));
    }

    #[test]
    fn test_views() {
        let model = eight();
        assert_eq!(model.group_matches().len(), 2);
        let elim: Vec<MatchId> = model.elimination_matches().iter().map(|m| m.id()).collect();
        assert_eq!(elim, vec![3, 4]);
        assert_eq!(model.elimination_stages(), vec![Stage::Semifinal]);
    }

    #[test]
    fn test_team_resolution() {
        let model = eight();
        let group = model.get(1).unwrap();
        assert_eq!(group.info.home_team, "aaa");
        assert_eq!(group.info.away_team, "aab");
        let semi = model.get(3).unwrap();
        assert_eq!(semi.info.home_team, "");
        let fin = model.final_match();
        assert_eq!(fin.info.home_team, "aaa");
        assert!(!fin.info.has_teams());
        assert!(!model.has_all_results());
    }

    #[test]
    fn test_unknown_feeder() {
        let content = EIGHT.replace("\"W4\"", "\"W40\"");
        let schedule = Schedule::from_str("mini", &content).unwrap();
        let err = BracketModel::build(&schedule).unwrap_err();
        assert!(matches!(
            err,
            BracketError::UnknownFeeder { id: 6, feeder: 40 }
        ));
    }

    #[test]
    fn test_feeder_claimed_twice() {
        let content = EIGHT.replace("\"W4\"", "\"W3\"");
        let schedule = Schedule::from_str("mini", &content).unwrap();
        let err = BracketModel::build(&schedule).unwrap_err();
        assert!(matches!(err, BracketError::FeederClaimedTwice { feeder: 3, .. }));
    }

    #[test]
    fn test_stall_on_feeder_outside_bracket() {
        let content = EIGHT.replace("\"W4\"", "\"W1\"");
        let schedule = Schedule::from_str("mini", &content).unwrap();
        let err = BracketModel::build(&schedule).unwrap_err();
        assert!(matches!(
            err,
            BracketError::StageInferenceStalled {
                stage: Stage::Semifinal,
                unresolved: 1
            }
        ));
    }

    #[test]
    fn test_missing_final() {
        let content = EIGHT.replace("\"W3\"", "\"L3\"").replace("\"W4\"", "\"L4\"");
        let schedule = Schedule::from_str("mini", &content).unwrap();
        let err = BracketModel::build(&schedule).unwrap_err();
        assert!(matches!(err, BracketError::FinalCount { count: 0 }));
    }

    #[test]
    fn test_merge_groups_preserves_first_seen_order() {
        assert_eq!(merge_groups(&['C', 'A'], &['A', 'B', 'C']), vec!['C', 'A', 'B']);
    }
}
