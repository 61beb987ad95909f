//! Synthetic tournaments for tests
//!
//! Groups of four play a round robin, the top two of each group and enough
//! best third-placed teams fill the first elimination round, and winners meet
//! in order until the final. A third place match precedes the final.

use chrono::{Duration, TimeZone, Utc};

use super::Schedule;

const COLORS: [&str; 16] = [
    "#e53935", "#1e88e5", "#43a047", "#fdd835", "#8e24aa", "#fb8c00", "#00acc1", "#6d4c41",
    "#d81b60", "#3949ab", "#7cb342", "#ffb300", "#5e35b1", "#f4511e", "#00897b", "#757575",
];

const ROUND_ROBIN: [(usize, usize); 6] = [(1, 2), (3, 4), (1, 3), (2, 4), (1, 4), (2, 3)];
const KICKOFF_HOURS: [u32; 4] = [13, 16, 19, 22];

/// Entrants of the first elimination round for a seed count
pub fn first_round_entrants(seed_count: usize) -> usize {
    match seed_count {
        8 => 4,
        12 | 16 => 8,
        24 | 32 => 16,
        _ => 32,
    }
}

/// TOML text of a tournament with `seed_count` seeds in groups of four
pub fn synthetic_toml(seed_count: usize) -> String {
    let letters: Vec<char> = ('A'..='P').take(seed_count / 4).collect();
    let group_count = letters.len();

    let mut out = String::from("[properties]\n");
    out.push_str("competition = \"synthetic\"\nhost = \"nowhere\"\n");
    out.push_str("timezone = \"America/New_York\"\n\"venue.01\" = \"arena\"\n");
    for (i, letter) in letters.iter().enumerate() {
        out.push_str(&format!(
            "\"color.{}\" = \"{}\"\n",
            letter.to_ascii_lowercase(),
            COLORS[i]
        ));
    }

    out.push_str("\n[seeds]\n");
    for letter in &letters {
        for slot in 1..=4 {
            out.push_str(&format!(
                "{letter}{slot} = \"team-{}{slot}\"\n",
                letter.to_ascii_lowercase()
            ));
        }
    }

    let mut rounds: Vec<Vec<(String, String)>> = Vec::new();
    rounds.push(
        letters
            .iter()
            .flat_map(|g| {
                ROUND_ROBIN
                    .iter()
                    .map(move |(a, b)| (format!("{g}{a}"), format!("{g}{b}")))
            })
            .collect(),
    );

    let entrants = first_round_entrants(seed_count);
    let mut tokens: Vec<String> = letters.iter().map(|g| format!("1{g}")).collect();
    tokens.extend((0..group_count).map(|i| format!("2{}", letters[(i + 1) % group_count])));
    for k in 0..entrants - 2 * group_count {
        let trio: String = (0..3).map(|d| letters[(k + d) % group_count]).collect();
        tokens.push(format!("3{trio}"));
    }
    let half = entrants / 2;
    rounds.push(
        (0..half)
            .map(|j| (tokens[j].clone(), tokens[half + j].clone()))
            .collect(),
    );

    let mut out_rows: Vec<(u32, String, String)> = Vec::new();
    let mut next_id = 1u32;
    let mut round_ids: Vec<Vec<u32>> = Vec::new();

    for round in rounds {
        let ids: Vec<u32> = round
            .into_iter()
            .map(|(home, away)| {
                out_rows.push((next_id, home, away));
                next_id += 1;
                next_id - 1
            })
            .collect();
        round_ids.push(ids);
    }

    let mut previous = round_ids.last().cloned().unwrap_or_default();
    while previous.len() > 1 {
        if previous.len() == 2 {
            out_rows.push((
                next_id,
                format!("L{}", previous[0]),
                format!("L{}", previous[1]),
            ));
            round_ids.push(vec![next_id]);
            next_id += 1;
        }
        let ids: Vec<u32> = previous
            .chunks(2)
            .map(|pair| {
                out_rows.push((next_id, format!("W{}", pair[0]), format!("W{}", pair[1])));
                next_id += 1;
                next_id - 1
            })
            .collect();
        round_ids.push(ids.clone());
        previous = ids;
    }

    let mut day = Utc.with_ymd_and_hms(2026, 6, 11, 0, 0, 0).unwrap();
    let mut starts = std::collections::HashMap::new();
    for ids in &round_ids {
        for (i, id) in ids.iter().enumerate() {
            let date = day + Duration::days((i / KICKOFF_HOURS.len()) as i64);
            let start = date + Duration::hours(KICKOFF_HOURS[i % KICKOFF_HOURS.len()] as i64);
            starts.insert(*id, start);
        }
        day += Duration::days((ids.len().div_ceil(KICKOFF_HOURS.len()) + 1) as i64);
    }

    for (id, home, away) in out_rows {
        out.push_str(&format!(
            "\n[[matches]]\nmatch = {id}\nvenue = 1\nhome-seed = \"{home}\"\naway-seed = \"{away}\"\ntime = \"{}\"\n",
            starts[&id].to_rfc3339()
        ));
    }
    out
}

pub fn synthetic(seed_count: usize) -> Schedule {
    Schedule::from_str(&format!("synthetic-{seed_count}"), &synthetic_toml(seed_count)).unwrap()
}
