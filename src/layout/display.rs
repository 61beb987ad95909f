//! Display dates and times for one viewer timezone
//!
//! A match is normally shown on its date in the viewer's timezone. Group
//! matches are anchored to their date in the tournament's home timezone so
//! that a day's fixtures stay together; when that date precedes the viewer's
//! date the time is written past midnight (`25:30`).

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::bracket::{Match, MatchId, Stage};

/// Date and time text of one match as the viewer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMatch {
    pub date: NaiveDate,
    pub time: String,
}

/// Display dates and times for every match of a tournament
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySchedule {
    entries: HashMap<MatchId, DisplayMatch>,
    group_dates_shifted: bool,
}

/// Short time text: `3:00pm` on a 12 hour clock, `15:00` otherwise
pub fn format_time(at: &DateTime<Tz>, hour12: bool) -> String {
    let text = if hour12 {
        at.format("%-I:%M%P").to_string()
    } else {
        at.format("%H:%M").to_string()
    };
    text.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether every group match falls on a different home date than viewer date
///
/// When this holds, all group dates move forward one day together. Needs at
/// least one group match to fire.
pub fn all_group_matches_cross_midnight<'a>(
    matches: impl IntoIterator<Item = &'a Match>,
    home_tz: Tz,
    viewer_tz: Tz,
) -> bool {
    let mut any = false;
    for m in matches.into_iter().filter(|m| m.stage == Stage::Group) {
        any = true;
        if date_in(m.info.start, home_tz) == date_in(m.info.start, viewer_tz) {
            return false;
        }
    }
    any
}

fn date_in(at: DateTime<Utc>, tz: Tz) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

impl DisplaySchedule {
    pub fn build(matches: &[Match], home_tz: Tz, viewer_tz: Tz, hour12: bool) -> Self {
        let group_dates_shifted = all_group_matches_cross_midnight(matches, home_tz, viewer_tz);

        let entries = matches
            .iter()
            .map(|m| {
                let viewer = m.info.start.with_timezone(&viewer_tz);
                let viewer_date = viewer.date_naive();
                let mut display = DisplayMatch {
                    date: viewer_date,
                    time: format_time(&viewer, hour12),
                };

                if m.stage == Stage::Group {
                    let mut home_date = date_in(m.info.start, home_tz);
                    if group_dates_shifted {
                        home_date = home_date.succ_opt().unwrap_or(home_date);
                    }
                    if home_date < viewer_date {
                        display.date = home_date;
                        display.time = format!("{}:{:02}", viewer.hour() + 24, viewer.minute());
                    }
                }

                (m.id(), display)
            })
            .collect();

        Self {
            entries,
            group_dates_shifted,
        }
    }

    pub fn get(&self, id: MatchId) -> Option<&DisplayMatch> {
        self.entries.get(&id)
    }

    pub fn date(&self, id: MatchId) -> Option<NaiveDate> {
        self.entries.get(&id).map(|d| d.date)
    }

    pub fn time(&self, id: MatchId) -> Option<&str> {
        self.entries.get(&id).map(|d| d.time.as_str())
    }

    /// Whether the cross-midnight rule moved the group dates
    pub fn group_dates_shifted(&self) -> bool {
        self.group_dates_shifted
    }

    /// Group `matches` by display date
    pub fn by_date<'a>(
        &self,
        matches: impl IntoIterator<Item = &'a Match>,
    ) -> BTreeMap<NaiveDate, Vec<&'a Match>> {
        let mut days: BTreeMap<NaiveDate, Vec<&'a Match>> = BTreeMap::new();
        for m in matches {
            if let Some(date) = self.date(m.id()) {
                days.entry(date).or_default().push(m);
            }
        }
        days
    }
}
