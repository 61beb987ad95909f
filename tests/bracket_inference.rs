//! Bracket structure inferred from synthetic schedules of every supported size

mod common;

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use tourney_poster::{BracketError, BracketModel, Match, Stage};

const SEED_COUNTS: [usize; 7] = [8, 12, 16, 24, 32, 48, 64];

#[test]
fn test_first_stage_by_seed_count() {
    let expected = [
        Stage::Semifinal,
        Stage::Quarterfinal,
        Stage::Quarterfinal,
        Stage::Round16,
        Stage::Round16,
        Stage::Round32,
        Stage::Round32,
    ];
    for (seeds, stage) in SEED_COUNTS.into_iter().zip(expected) {
        assert_eq!(common::model(seeds).first_stage(), stage, "{} seeds", seeds);
    }
}

#[test]
fn test_match_counts() {
    for seeds in SEED_COUNTS {
        let model = common::model(seeds);
        let entrants = common::entrants(seeds);

        assert_eq!(model.team_count(), seeds);
        assert_eq!(model.group_letters(), common::letters(seeds).as_slice());
        assert_eq!(model.group_matches().len(), seeds / 4 * 6, "{} seeds", seeds);
        assert_eq!(model.elimination_matches().len(), entrants - 2, "{} seeds", seeds);
        assert!(model.third_match().is_some());
        assert_eq!(model.final_match().stage, Stage::Final);
    }
}

#[test]
fn test_elimination_stages_exclude_third_and_final() {
    let model = common::model(48);
    assert_eq!(
        model.elimination_stages(),
        vec![
            Stage::Round32,
            Stage::Round16,
            Stage::Quarterfinal,
            Stage::Semifinal
        ]
    );
    assert_eq!(model.matches_in_stage(Stage::Round32).len(), 16);
    assert_eq!(model.matches_in_stage(Stage::Semifinal).len(), 2);
}

#[test]
fn test_halves_partition_the_bracket() {
    for seeds in SEED_COUNTS {
        let model = common::model(seeds);
        let elimination: BTreeSet<u32> = model.elimination_matches().iter().map(|m| m.id()).collect();
        let home = model.home_half();
        let away = model.away_half();

        assert!(home.is_disjoint(away), "{} seeds", seeds);
        assert_eq!(home.len(), away.len());
        let union: BTreeSet<u32> = home.union(away).copied().collect();
        assert_eq!(union, elimination, "{} seeds", seeds);
    }
}

#[test]
fn test_draw_order_puts_final_in_the_middle() {
    for seeds in SEED_COUNTS {
        let model = common::model(seeds);
        let entrants = common::entrants(seeds);
        assert_eq!(model.final_match().sort_elim as usize, entrants / 2, "{} seeds", seeds);

        let mut order: Vec<u32> = model
            .elimination_matches()
            .iter()
            .map(|m| m.sort_elim)
            .chain([model.final_match().sort_elim])
            .collect();
        order.sort_unstable();
        let expected: Vec<u32> = (1..entrants as u32).collect();
        assert_eq!(order, expected);
    }
}

/// Draw positions of `root` and every match feeding into it
fn subtree_positions(model: &BracketModel, root: u32) -> Vec<u32> {
    let mut positions = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let m = model.get(id).unwrap();
        positions.push(m.sort_elim);
        if let Some(feeders) = m.feeders {
            stack.extend([feeders.home, feeders.away]);
        }
    }
    positions
}

#[test]
fn test_feeders_play_in_earlier_stages() {
    for seeds in SEED_COUNTS {
        let model = common::model(seeds);
        let fed: Vec<&Match> = model
            .elimination_matches()
            .into_iter()
            .chain(model.third_match())
            .chain([model.final_match()])
            .collect();
        for m in fed {
            let Some(feeders) = m.feeders else { continue };
            for feeder in [feeders.home, feeders.away] {
                let stage = model.get(feeder).unwrap().stage;
                assert!(
                    stage < m.stage,
                    "{} seeds: match {} ({:?}) fed by {} ({:?})",
                    seeds,
                    m.id(),
                    m.stage,
                    feeder,
                    stage
                );
            }
        }
    }
}

#[test]
fn test_draw_order_is_in_order_over_feeder_tree() {
    for seeds in SEED_COUNTS {
        let model = common::model(seeds);
        let tree = model
            .elimination_matches()
            .into_iter()
            .chain([model.final_match()]);
        for m in tree {
            let Some(feeders) = m.feeders else { continue };
            for position in subtree_positions(&model, feeders.home) {
                assert!(position < m.sort_elim, "{} seeds: home side of {}", seeds, m.id());
            }
            for position in subtree_positions(&model, feeders.away) {
                assert!(position > m.sort_elim, "{} seeds: away side of {}", seeds, m.id());
            }
        }
    }
}

#[test]
fn test_only_later_rounds_have_feeders() {
    let model = common::model(32);
    for m in model.elimination_matches() {
        if m.stage == model.first_stage() {
            assert!(m.feeders.is_none(), "match {}", m.id());
        } else {
            let feeders = m.feeders.expect("later rounds are fed");
            assert_eq!(model.get(feeders.home).unwrap().fed_by, Some(m.id()));
            assert_eq!(model.get(feeders.away).unwrap().fed_by, Some(m.id()));
        }
    }
}

#[test]
fn test_final_reaches_every_group() {
    for seeds in SEED_COUNTS {
        let model = common::model(seeds);
        let mut groups = model.final_match().groups.clone();
        groups.sort_unstable();
        assert_eq!(groups, common::letters(seeds), "{} seeds", seeds);
    }
}

#[test]
fn test_first_round_teams_unknown_before_groups_finish() {
    let model = common::model(24);
    for m in model.matches_in_stage(Stage::Round16) {
        assert!(!m.info.has_teams());
        assert!(!m.info.has_results());
    }
    for m in model.group_matches() {
        assert!(m.info.has_teams());
    }
}

#[test]
fn test_unsupported_seed_count() {
    let mut schedule = common::schedule(8);
    schedule.seeds.insert("C1".to_string(), "team-c1".to_string());

    let err = BracketModel::build(&schedule).unwrap_err();
    assert!(matches!(err, BracketError::UnsupportedSeedCount { count: 9 }));
}
