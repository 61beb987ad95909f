//! Synthetic tournaments shared by the integration tests
//!
//! `seed_count / 4` groups of four play a round robin. Group winners, runners
//! up and as many best third places as needed fill the first elimination
//! round; winners then pair off in order, with a third place match played
//! by the semifinal losers.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use tourney_poster::locale::DEFAULT_STRINGS;
use tourney_poster::{BracketModel, Schedule, StringTable};

const COLORS: [&str; 16] = [
    "#c62828", "#1565c0", "#2e7d32", "#f9a825", "#6a1b9a", "#ef6c00", "#00838f", "#4e342e",
    "#ad1457", "#283593", "#558b2f", "#ff8f00", "#4527a0", "#d84315", "#00695c", "#616161",
];

const PAIRINGS: [(usize, usize); 6] = [(1, 2), (3, 4), (1, 3), (2, 4), (1, 4), (2, 3)];
const KICKOFFS: [i64; 4] = [13, 16, 19, 22];

/// Number of teams entering the first elimination round
pub fn entrants(seed_count: usize) -> usize {
    match seed_count {
        8 => 4,
        12 | 16 => 8,
        24 | 32 => 16,
        _ => 32,
    }
}

/// Group letters for a seed count
pub fn letters(seed_count: usize) -> Vec<char> {
    ('A'..='P').take(seed_count / 4).collect()
}

/// Home and away seeds of every match, in id order starting at 1
fn pairings(seed_count: usize) -> Vec<Vec<(String, String)>> {
    let letters = letters(seed_count);
    let groups = letters.len();

    let group_round: Vec<(String, String)> = letters
        .iter()
        .flat_map(|g| PAIRINGS.iter().map(move |(a, b)| (format!("{g}{a}"), format!("{g}{b}"))))
        .collect();

    let entrants = entrants(seed_count);
    let mut qualifiers: Vec<String> = letters.iter().map(|g| format!("1{g}")).collect();
    qualifiers.extend((0..groups).map(|i| format!("2{}", letters[(i + 1) % groups])));
    qualifiers.extend((0..entrants - 2 * groups).map(|k| {
        let candidates: String = (0..3).map(|d| letters[(k + d) % groups]).collect();
        format!("3{candidates}")
    }));
    let half = entrants / 2;
    let first_round = (0..half)
        .map(|j| (qualifiers[j].clone(), qualifiers[half + j].clone()))
        .collect();

    vec![group_round, first_round]
}

/// Schedule TOML, optionally with every group match already played
pub fn schedule_toml(seed_count: usize, group_results: bool) -> String {
    let letters = letters(seed_count);
    let mut toml = String::from(
        "[properties]\ncompetition = \"synthetic\"\nhost = \"nowhere\"\n\
         timezone = \"America/New_York\"\n\"venue.01\" = \"arena\"\n",
    );
    for (letter, color) in letters.iter().zip(COLORS) {
        toml.push_str(&format!("\"color.{}\" = \"{}\"\n", letter.to_ascii_lowercase(), color));
    }

    toml.push_str("\n[seeds]\n");
    for letter in &letters {
        for slot in 1..=4 {
            let team = format!("team-{}{}", letter.to_ascii_lowercase(), slot);
            toml.push_str(&format!("{letter}{slot} = \"{team}\"\n"));
        }
    }

    // rounds as lists of ids, so later rounds can name their feeders
    let mut rows: Vec<(u32, String, String, bool)> = Vec::new();
    let mut rounds: Vec<Vec<u32>> = Vec::new();
    for (index, round) in pairings(seed_count).into_iter().enumerate() {
        let mut ids = Vec::new();
        for (home, away) in round {
            let id = rows.len() as u32 + 1;
            rows.push((id, home, away, index == 0 && group_results));
            ids.push(id);
        }
        rounds.push(ids);
    }

    let mut previous = rounds.last().cloned().unwrap_or_default();
    while previous.len() > 1 {
        if previous.len() == 2 {
            let id = rows.len() as u32 + 1;
            rows.push((id, format!("L{}", previous[0]), format!("L{}", previous[1]), false));
            rounds.push(vec![id]);
        }
        let mut next = Vec::new();
        for pair in previous.chunks(2) {
            let id = rows.len() as u32 + 1;
            rows.push((id, format!("W{}", pair[0]), format!("W{}", pair[1]), false));
            next.push(id);
        }
        rounds.push(next.clone());
        previous = next;
    }

    let mut day = Utc.with_ymd_and_hms(2026, 6, 11, 0, 0, 0).unwrap();
    let mut kickoff = std::collections::HashMap::new();
    for ids in &rounds {
        for (i, id) in ids.iter().enumerate() {
            let offset = Duration::days((i / KICKOFFS.len()) as i64)
                + Duration::hours(KICKOFFS[i % KICKOFFS.len()]);
            kickoff.insert(*id, day + offset);
        }
        day += Duration::days((ids.len().div_ceil(KICKOFFS.len()) + 1) as i64);
    }

    for (id, home, away, played) in rows {
        toml.push_str(&format!(
            "\n[[matches]]\nmatch = {id}\nvenue = 1\nhome-seed = \"{home}\"\naway-seed = \"{away}\"\ntime = \"{}\"\n",
            kickoff[&id].to_rfc3339()
        ));
        if played {
            toml.push_str(&format!("home-score = {}\naway-score = {}\n", id % 4, id % 3));
        }
    }
    toml
}

pub fn schedule(seed_count: usize) -> Schedule {
    Schedule::from_str(&format!("synthetic-{seed_count}"), &schedule_toml(seed_count, false))
        .expect("synthetic schedule parses")
}

pub fn model(seed_count: usize) -> BracketModel {
    BracketModel::build(&schedule(seed_count)).expect("synthetic bracket builds")
}

/// Built-in strings plus everything the synthetic tournaments name
pub fn strings(model: &BracketModel) -> StringTable {
    let mut strings = StringTable::from_str(DEFAULT_STRINGS).expect("default strings parse");
    strings.insert("competition.synthetic", "en", "Synthetic Cup");
    strings.insert("host.nowhere", "en", "Nowhere");
    strings.insert("venue.arena", "en", "Arena");
    for team in model.seeds().values() {
        strings.insert(&format!("country.{}", team), "en", team.to_uppercase());
    }
    strings
}
