//! Week-aligned calendar grid
//!
//! One cell per display date from the locale's first weekday on or before the
//! earliest match to its last weekday on or after the latest. Cells share one
//! size, picked from three tiers by the busiest day. Matches stack inside a
//! cell; adjacent matches with the same kickoff share one time line.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::config::LayoutConfig;
use super::display::DisplaySchedule;
use super::error::LayoutError;
use super::types::{BoundingBox, Point, Size};
use crate::bracket::{Match, MatchId, Stage};
use crate::locale::Locale;

/// Vertical room a match needs for its time, score boxes and form labels
pub fn info_height(config: &LayoutConfig, time_height: f64, with_form: bool) -> f64 {
    let mut height = time_height + config.score_size();
    if with_form {
        height += config.label_font() + config.pens_size() / 2.0 - config.pens_nudge;
    }
    height
}

/// One match stacked inside a day cell or bracket cell
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSlot {
    pub id: MatchId,
    pub stage: Stage,
    pub rect: BoundingBox,
    /// Gap above the time line
    pub outer_gap: f64,
    /// Time text plus the gap below it; zero once coalesced into the match above
    pub time_and_gap: f64,
}

impl MatchSlot {
    /// Center `info` height of content inside `rect`
    pub fn fit(
        id: MatchId,
        stage: Stage,
        rect: BoundingBox,
        info: f64,
        time_height: f64,
        time_gap_max: f64,
    ) -> Self {
        let gaps = rect.height - info;
        let time_gap = time_gap_max.min(gaps / 3.0);
        Self {
            id,
            stage,
            rect,
            outer_gap: (gaps - time_gap) / 2.0,
            time_and_gap: time_height + time_gap,
        }
    }

    pub fn has_time(&self) -> bool {
        self.time_and_gap != 0.0
    }

    /// Line the time text sits in, when the slot shows one
    pub fn time_rect(&self, time_height: f64) -> Option<BoundingBox> {
        self.has_time().then(|| {
            BoundingBox::new(
                self.rect.x,
                self.rect.y + self.outer_gap,
                self.rect.width,
                time_height,
            )
        })
    }

    /// Top of the score boxes
    pub fn score_top(&self) -> f64 {
        self.rect.y + self.outer_gap + self.time_and_gap
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.rect = self.rect.translate(dx, dy);
    }
}

/// Share the lower match's time line with the upper one when both kick off together
///
/// A third of the lower match's time band becomes its new outer gap, and the
/// upper match grows by twice that at the lower match's expense.
pub fn coalesce(top: &mut MatchSlot, bottom: &mut MatchSlot) {
    let adjust = bottom.time_and_gap / 3.0;
    bottom.outer_gap = adjust;
    bottom.time_and_gap = 0.0;

    top.outer_gap += adjust;
    top.time_and_gap += adjust;
    top.rect = top.rect.stretch(0.0, 0.0, 0.0, adjust * 2.0);
    bottom.rect = bottom.rect.stretch(0.0, adjust * 2.0, 0.0, 0.0);
}

/// Cell size tier picked from the busiest day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTier {
    Quiet,
    Default,
    Busy,
}

impl DayTier {
    pub fn for_busiest(count: usize, config: &LayoutConfig) -> Self {
        if count >= config.busy_day_matches {
            DayTier::Busy
        } else if count <= config.quiet_day_matches {
            DayTier::Quiet
        } else {
            DayTier::Default
        }
    }

    pub fn cell(self, config: &LayoutConfig) -> Size {
        let base = config.day_cell;
        match self {
            DayTier::Busy => Size::new(
                base.width * config.busy_day_scale.0,
                base.height * config.busy_day_scale.1,
            ),
            DayTier::Quiet => Size::new(base.width, base.height * config.quiet_day_height_scale),
            DayTier::Default => base,
        }
    }
}

/// One calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub rect: BoundingBox,
    pub date_rect: BoundingBox,
    /// Empty on matchless days
    pub slots: Vec<MatchSlot>,
}

/// Options that vary per page
#[derive(Debug, Clone, Copy)]
pub struct CalendarOptions {
    /// Rendered height of the time text
    pub time_height: f64,
    pub results: bool,
}

/// Calendar grid with a stage heading and a weekday row above the days
#[derive(Debug, Clone)]
pub struct CalendarGridLayout {
    origin: Point,
    first: NaiveDate,
    weeks: usize,
    cell: Size,
    tier: DayTier,
    heading_height: f64,
    stage_font: f64,
    day_of_week_height: f64,
    first_weekday: Weekday,
    rtl: bool,
    days: Vec<DayCell>,
}

fn week_start(date: NaiveDate, first: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() - first.num_days_from_monday()) % 7;
    date - Duration::days(back as i64)
}

fn week_end(date: NaiveDate, last: Weekday) -> NaiveDate {
    let forward = (7 + last.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(forward as i64)
}

impl CalendarGridLayout {
    /// Lay out `matches` at the origin
    pub fn new(
        matches: &[&Match],
        display: &DisplaySchedule,
        locale: &Locale,
        config: &LayoutConfig,
        options: CalendarOptions,
    ) -> Result<Self, LayoutError> {
        let by_date = display.by_date(matches.iter().copied());
        let (Some(min), Some(max)) = (by_date.keys().next(), by_date.keys().next_back()) else {
            return Err(LayoutError::invalid_layout("calendar", "no matches to place"));
        };

        let first_weekday = locale.first_weekday();
        let first = week_start(*min, first_weekday);
        let last = week_end(*max, locale.last_weekday());
        let day_count = (last - first).num_days() as usize + 1;
        let weeks = day_count / 7;

        let busiest = by_date.values().map(Vec::len).max().unwrap_or(0);
        let tier = DayTier::for_busiest(busiest, config);
        let cell = tier.cell(config);

        let rtl = locale.is_rtl();
        let heading_height = config.stage_label_height();
        let day_of_week_height = config.day_of_week_height();
        let days_top = heading_height + day_of_week_height;

        let mut days = Vec::with_capacity(day_count);
        for index in 0..day_count {
            let date = first + Duration::days(index as i64);
            let column = if rtl { 6 - index % 7 } else { index % 7 };
            let row = index / 7;
            let rect = cell.at(Point::new(
                column as f64 * cell.width,
                days_top + row as f64 * cell.height,
            ));
            let inside = rect.outset(-config.line_outer / 2.0);
            let (date_rect, rest) = inside.split_top(config.date_height());

            let mut day_matches = by_date.get(&date).cloned().unwrap_or_default();
            day_matches.sort_by(|a, b| {
                (a.info.start, &a.info.home_seed).cmp(&(b.info.start, &b.info.home_seed))
            });
            let slots = Self::stack(&day_matches, rest, config, options);

            days.push(DayCell {
                date,
                rect,
                date_rect,
                slots,
            });
        }

        Ok(Self {
            origin: Point::default(),
            first,
            weeks,
            cell,
            tier,
            heading_height,
            stage_font: config.stage_font(),
            day_of_week_height,
            first_weekday,
            rtl,
            days,
        })
    }

    fn stack(
        matches: &[&Match],
        area: BoundingBox,
        config: &LayoutConfig,
        options: CalendarOptions,
    ) -> Vec<MatchSlot> {
        if matches.is_empty() {
            return Vec::new();
        }
        let height = area.height / matches.len() as f64;
        let mut slots: Vec<MatchSlot> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let rect = BoundingBox::new(area.x, area.y + i as f64 * height, area.width, height);
                let with_form = m.stage != Stage::Group && !options.results;
                MatchSlot::fit(
                    m.id(),
                    m.stage,
                    rect,
                    info_height(config, options.time_height, with_form),
                    options.time_height,
                    config.time_gap_max(),
                )
            })
            .collect();

        for i in 1..slots.len() {
            let (upper, lower) = (matches[i - 1], matches[i]);
            if options.results && upper.info.has_results() && lower.info.has_results() {
                continue;
            }
            if upper.info.start != lower.info.start || !slots[i - 1].has_time() {
                continue;
            }
            let (head, tail) = slots.split_at_mut(i);
            coalesce(&mut head[i - 1], &mut tail[0]);
        }
        slots
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Move the whole calendar so its top-left corner sits at `origin`
    pub fn move_to(&mut self, origin: Point) {
        let (dx, dy) = (origin.x - self.origin.x, origin.y - self.origin.y);
        for day in &mut self.days {
            day.rect = day.rect.translate(dx, dy);
            day.date_rect = day.date_rect.translate(dx, dy);
            for slot in &mut day.slots {
                slot.translate(dx, dy);
            }
        }
        self.origin = origin;
    }

    pub fn size(&self) -> Size {
        Size::new(
            7.0 * self.cell.width,
            self.heading_height + self.day_of_week_height + self.weeks as f64 * self.cell.height,
        )
    }

    pub fn bounds(&self) -> BoundingBox {
        self.size().at(self.origin)
    }

    pub fn cell(&self) -> Size {
        self.cell
    }

    pub fn tier(&self) -> DayTier {
        self.tier
    }

    pub fn first_date(&self) -> NaiveDate {
        self.first
    }

    pub fn last_date(&self) -> NaiveDate {
        self.first + Duration::days(self.days.len() as i64 - 1)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn days(&self) -> &[DayCell] {
        &self.days
    }

    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    /// Band for the stage heading above the weekday row
    pub fn heading_rect(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x, self.origin.y, self.size().width, self.stage_font)
    }

    /// Weekday name cells in display order
    pub fn weekday_rects(&self) -> Vec<(Weekday, BoundingBox)> {
        let mut weekday = self.first_weekday;
        (0..7)
            .map(|index| {
                let column = if self.rtl { 6 - index } else { index };
                let rect = BoundingBox::new(
                    self.origin.x + column as f64 * self.cell.width,
                    self.origin.y + self.heading_height,
                    self.cell.width,
                    self.day_of_week_height,
                );
                let entry = (weekday, rect);
                weekday = weekday.succ();
                entry
            })
            .collect()
    }
}
