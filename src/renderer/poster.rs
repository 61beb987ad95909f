//! Poster painter
//!
//! [`compose_page`] lays out every block of one page and arranges them on the
//! canvas between the header and footer bands. [`PosterPainter`] then draws
//! the composed page onto any [`Canvas`]: group standings, calendar days,
//! bracket cells and captions, the final card, header, footer and crop marks.
//!
//! Fonts are looked up per locale under `fonts.<role>` in the string table,
//! so a locale with its own script can swap typefaces without code changes.

use std::collections::BTreeSet;

use chrono::Datelike;

use super::canvas::{Canvas, FontMetrics, HAlign, TextStyle, VAlign};
use crate::bracket::{Match, MatchId, Stage};
use crate::color::Color;
use crate::layout::{
    BoundingBox, BracketCell, BracketGridLayout, BracketOptions, CalendarGridLayout,
    CalendarOptions, ComposedPage, DayCell, GridShape, GroupGridLayout, LayoutConfig, LayoutError,
    MatchSlot, PageComposer, Point, StageCaption,
};
use crate::locale::{fill, DateFormatter, LocaleError};
use crate::page::{PageContext, PageKind};
use crate::paper::PageFrame;
use crate::stylesheet::Stylesheet;
use crate::PosterError;

/// Score digit outline, as a fraction of the font size
const SCORE_HALO: f64 = 0.1;

/// Separator between footer credits
const CREDIT_SEPARATOR: &str = " \u{2022} ";

/// Room left for blocks once the header and footer bands are taken
pub fn canvas_rect(frame: &PageFrame, config: &LayoutConfig) -> BoundingBox {
    frame
        .inside
        .stretch(0.0, config.header_height, 0.0, -config.footer_height)
}

fn font_for(ctx: &PageContext<'_>, role: &str) -> Result<String, LocaleError> {
    ctx.text(&format!("fonts.{}", role)).map(str::to_string)
}

/// Lay out and compose every block of the page `ctx` describes
pub fn compose_page(
    ctx: &PageContext<'_>,
    config: &LayoutConfig,
    metrics: &impl FontMetrics,
) -> Result<ComposedPage, PosterError> {
    let model = ctx.model;
    let time_height = metrics.cap_height(&font_for(ctx, "match.time")?, config.time_font());

    let letters = model.group_letters();
    let (first, second) = letters.split_at(letters.len().div_ceil(2));
    let (left, right) = if ctx.is_rtl() {
        (second, first)
    } else {
        (first, second)
    };
    let grid = |groups: &[char]| GroupGridLayout::new(groups.to_vec(), GridShape::Columns(1), config);

    let composer = PageComposer::new(canvas_rect(&ctx.frame, config), config.final_card());
    let calendar_options = CalendarOptions {
        time_height,
        results: ctx.args.results,
    };

    let page = match ctx.args.kind {
        PageKind::CalElim => {
            let matches = model.group_matches();
            let calendar = CalendarGridLayout::new(
                &matches,
                &ctx.display,
                &ctx.locale,
                config,
                calendar_options,
            )?;
            let bracket = BracketGridLayout::new(
                model,
                config,
                BracketOptions {
                    time_height,
                    results: ctx.args.results,
                    match_numbers: ctx.args.match_numbers,
                    rtl: ctx.is_rtl(),
                },
            )?;
            composer.compose_with_bracket(grid(left), grid(right), calendar, bracket)?
        }
        PageKind::CalOnly => {
            let matches: Vec<&Match> = model
                .matches()
                .iter()
                .filter(|m| m.stage != Stage::Final)
                .collect();
            let calendar = CalendarGridLayout::new(
                &matches,
                &ctx.display,
                &ctx.locale,
                config,
                calendar_options,
            )?;
            composer.compose_calendar_only(grid(left), grid(right), calendar)?
        }
    };
    Ok(page)
}

/// Background rectangles for a match: one per group color
///
/// Group matches take their group's color. First round cells split in half,
/// the home group on the left and the right half striped by the remaining
/// candidates. Later rounds stripe evenly across every reachable group.
pub fn fill_stripes(
    rect: BoundingBox,
    stage: Stage,
    first_round: Stage,
    colors: &[Color],
) -> Vec<(BoundingBox, Color)> {
    match colors {
        [] => Vec::new(),
        [only] => vec![(rect, *only)],
        [first, rest @ ..] if stage == first_round => {
            let (left, right) = rect.split_left(rect.width / 2.0);
            let mut fills = vec![(left, *first)];
            fills.extend(stripes(right, rest));
            fills
        }
        _ if stage == Stage::Group => vec![(rect, colors[0])],
        _ => stripes(rect, colors),
    }
}

fn stripes(rect: BoundingBox, colors: &[Color]) -> Vec<(BoundingBox, Color)> {
    let width = rect.width / colors.len() as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            (
                BoundingBox::new(rect.x + i as f64 * width, rect.y, width, rect.height),
                *color,
            )
        })
        .collect()
}

/// Font role and text for a form label of group letters
///
/// Every group collapses to a dot; more than half of them is written as the
/// groups left out, between tildes. Labels that are not group letters, such
/// as seed codes, pass through unchanged.
pub fn form_label(label: &str, groups: &[char]) -> (&'static str, String) {
    let all: BTreeSet<char> = groups.iter().copied().collect();
    let used: BTreeSet<char> = label.chars().collect();

    if used == all {
        return ("match.form.label", "\u{b7}".to_string());
    }
    if !used.is_subset(&all) || used.len() <= all.len() / 2 {
        return ("match.form.label", label.to_string());
    }
    let missing: String = all.difference(&used).collect();
    ("match.form.label-inverse", format!("~{}~", missing))
}

/// Sizes of one score box pair and its penalty boxes
#[derive(Debug, Clone, Copy)]
struct ScoreMetrics {
    score: f64,
    dash_gap: f64,
    pens: f64,
    nudge: f64,
    line: f64,
    /// Penalty result text is outlined like the score digits
    halo_tiebreaker: bool,
}

/// Where a score box pair landed
#[derive(Debug, Clone, Copy)]
struct ScoreBoxes {
    home: BoundingBox,
    away: BoundingBox,
    home_pens: BoundingBox,
    away_pens: BoundingBox,
}

/// Draws a composed page
pub struct PosterPainter<'p, 'a> {
    page: &'p ComposedPage,
    ctx: &'p PageContext<'a>,
    config: &'p LayoutConfig,
    stylesheet: &'p Stylesheet,
}

impl<'p, 'a> PosterPainter<'p, 'a> {
    pub fn new(
        page: &'p ComposedPage,
        ctx: &'p PageContext<'a>,
        config: &'p LayoutConfig,
        stylesheet: &'p Stylesheet,
    ) -> Self {
        Self {
            page,
            ctx,
            config,
            stylesheet,
        }
    }

    /// Draw every block of the page
    pub fn paint<C: Canvas>(&self, canvas: &mut C) -> Result<(), PosterError> {
        canvas.begin_group("groups");
        let left = self.page.left_groups.block_rects(self.page.left_origin);
        let right = self.page.right_groups.block_rects(self.page.right_origin);
        for (letter, rect) in left.into_iter().chain(right) {
            self.draw_group(canvas, letter, rect)?;
        }
        canvas.end_group();

        canvas.begin_group("calendar");
        self.draw_calendar(canvas, &self.page.calendar)?;
        canvas.end_group();

        if let Some(bracket) = &self.page.bracket {
            canvas.begin_group("bracket");
            self.draw_bracket(canvas, bracket)?;
            canvas.end_group();
        }

        canvas.begin_group("final");
        self.draw_final(canvas)?;
        canvas.end_group();

        canvas.begin_group("header");
        self.draw_header(canvas)?;
        canvas.end_group();

        canvas.begin_group("footer");
        self.draw_footer(canvas)?;
        canvas.end_group();

        self.draw_crop_marks(canvas);
        Ok(())
    }

    fn color(&self, token: &str) -> Color {
        self.stylesheet.color(token)
    }

    fn dates(&self) -> DateFormatter<'_> {
        DateFormatter::new(self.ctx.strings, &self.ctx.locale)
    }

    fn start(&self) -> HAlign {
        if self.ctx.is_rtl() {
            HAlign::Right
        } else {
            HAlign::Left
        }
    }

    fn end(&self) -> HAlign {
        if self.ctx.is_rtl() {
            HAlign::Left
        } else {
            HAlign::Right
        }
    }

    /// Centered text style, inset so the caps sit in the middle of `rect`
    fn text_style<C: Canvas>(
        &self,
        canvas: &C,
        role: &str,
        rect: BoundingBox,
        size: f64,
        color: Color,
    ) -> Result<TextStyle, PosterError> {
        let font = font_for(self.ctx, role)?;
        let cap = canvas.cap_height(&font, size);
        let margin = ((rect.height - cap) / 2.0).max(0.0);
        Ok(TextStyle::new(font, size, color).with_margin(margin))
    }

    fn match_for(&self, id: MatchId) -> Result<&'a Match, PosterError> {
        self.ctx.model.get(id).ok_or_else(|| {
            LayoutError::invalid_layout("poster", format!("no match with id {}", id)).into()
        })
    }

    fn display_date(&self, m: &Match) -> Result<chrono::NaiveDate, PosterError> {
        self.ctx.display.date(m.id()).ok_or_else(|| {
            LayoutError::invalid_layout("poster", format!("match {} has no display date", m.id()))
                .into()
        })
    }

    /// Kickoff time, or the venue once the match has a result
    fn time_text(&self, m: &Match) -> Result<String, PosterError> {
        if self.ctx.args.results && m.info.has_results() {
            let key = self.ctx.model.properties().venue_key(m.info.venue)?;
            return Ok(self.ctx.text(&key)?.to_string());
        }
        self.ctx
            .display
            .time(m.id())
            .map(str::to_string)
            .ok_or_else(|| {
                LayoutError::invalid_layout("poster", format!("match {} has no display time", m.id()))
                    .into()
            })
    }

    fn title(&self) -> Result<String, PosterError> {
        let properties = self.ctx.model.properties();
        let label = if self.ctx.args.results {
            "page.title.results"
        } else {
            "page.title.fixtures"
        };
        Ok(fill(
            self.ctx.text("page.format.title")?,
            &[
                ("year", self.ctx.first_date.year().to_string().as_str()),
                ("name", self.ctx.text(&properties.competition_key()?)?),
                ("label", self.ctx.text(label)?),
            ],
        ))
    }

    fn draw_group<C: Canvas>(
        &self,
        canvas: &mut C,
        letter: char,
        rect: BoundingBox,
    ) -> Result<(), PosterError> {
        let config = self.config;
        let group = self.ctx.model.group(letter).ok_or_else(|| {
            LayoutError::invalid_layout("groups", format!("no group {}", letter))
        })?;
        let ltr = !self.ctx.is_rtl();
        let ink = self.color("ink");
        let light = self.color("text-light");
        let inside = rect.outset(-config.group_line_outer / 2.0);

        // title band: big group letter at the end, "Group" label before it
        let (title, rest) = inside.split_top(inside.width / 5.0);
        canvas.fill_rect(title, group.colors.base);

        let name_style = self
            .text_style(canvas, "group.name", title, title.height * 1.3, group.colors.darker)?
            .h_align(self.end());
        let name_box = canvas.text(title, &letter.to_string(), &name_style);

        let label_rect = if ltr {
            BoundingBox::new(title.x, title.y, name_box.x - title.x, title.height)
        } else {
            BoundingBox::new(name_box.right(), title.y, title.right() - name_box.right(), title.height)
        };
        let label_style = self
            .text_style(canvas, "group.label", label_rect, title.height * 0.65, light)?
            .h_align(self.end())
            .with_margin(name_style.margin);
        canvas.text(label_rect, self.ctx.text("group.title")?, &label_style);

        let (heading, teams_area) = rest.split_top(title.height / 4.0);
        canvas.fill_rect(heading, ink);

        // alternating team rows
        let teams: Vec<&str> = group.teams().collect();
        let row_height = teams_area.height / teams.len().max(1) as f64;
        for i in 0..teams.len() {
            let row = BoundingBox::new(
                teams_area.x,
                teams_area.y + i as f64 * row_height,
                teams_area.width,
                row_height,
            );
            let fill = if i % 2 == 1 {
                group.colors.lighter
            } else {
                self.color("paper")
            };
            canvas.fill_rect(row, fill);
        }

        let name_width = row_height * 6.0;
        let name_x = if ltr {
            teams_area.x
        } else {
            teams_area.right() - name_width
        };
        for (i, team) in teams.iter().enumerate() {
            let row = BoundingBox::new(
                name_x,
                teams_area.y + i as f64 * row_height,
                name_width,
                row_height,
            );
            let abbrev_style = self
                .text_style(canvas, "group.team.abbrev", row, row_height, ink)?
                .h_align(self.end());
            let abbrev = canvas.text(row, team, &abbrev_style);

            let trim = abbrev.width + abbrev_style.margin;
            let name_rect = if ltr {
                row.stretch(0.0, 0.0, -trim, 0.0)
            } else {
                row.stretch(trim, 0.0, 0.0, 0.0)
            };
            let team_style = self
                .text_style(
                    canvas,
                    "group.team.name",
                    name_rect,
                    row_height * 0.75,
                    self.color("team-name"),
                )?
                .h_align(self.start())
                .with_margin(abbrev_style.margin)
                .shrink_to_fit();
            canvas.text(name_rect, self.ctx.team_name(team)?, &team_style);
        }

        // points, goals for, goals against and rank columns
        let rank_width = (inside.width - name_width) / 7.0;
        let stats_width = rank_width * 2.0;
        let mut columns = Vec::with_capacity(4);
        let mut edge = if ltr { name_x + name_width } else { name_x };
        for width in [stats_width, stats_width, stats_width, rank_width] {
            let x = if ltr { edge } else { edge - width };
            columns.push(BoundingBox::new(x, heading.y, width, heading.height));
            edge = if ltr { x + width } else { x };
        }

        for column in &columns {
            let x = if ltr { column.x } else { column.right() };
            canvas.line(
                Point::new(x, heading.bottom()),
                Point::new(x, inside.bottom()),
                config.group_line_stats,
                ink,
            );
        }

        let rank_mark = if ltr { "\u{bb}" } else { "\u{ab}" };
        let headings = [
            self.ctx.text("group.points")?,
            self.ctx.text("group.goals-for")?,
            self.ctx.text("group.goals-against")?,
            rank_mark,
        ];
        for (column, text) in columns.iter().zip(headings) {
            let style = self.text_style(canvas, "group.heading", *column, column.height, light)?;
            canvas.text(*column, text, &style);
        }

        if self.ctx.args.group_dots {
            self.draw_tally_dots(canvas, &columns[..3], heading.bottom(), teams.len(), row_height);
        }

        if self.ctx.args.main_borders {
            canvas.stroke_rect(rect, config.group_line_outer, ink);
            canvas.stroke_rect(rect, config.group_line_inner, group.colors.base);
        }
        Ok(())
    }

    /// Faint grids for tallying points and goals by hand
    fn draw_tally_dots<C: Canvas>(
        &self,
        canvas: &mut C,
        columns: &[BoundingBox],
        top: f64,
        team_count: usize,
        row_height: f64,
    ) {
        const DOWN: usize = 3;
        const ACROSS: [usize; 3] = [3, 5, 5];

        let Some(stats_width) = columns.first().map(|c| c.width) else {
            return;
        };
        let dot = stats_width / (2 * ACROSS[2] + 1) as f64;
        let gap_y = (row_height - DOWN as f64 * dot) / (DOWN + 1) as f64;
        let color = self.color("tally-dot");

        for team in 0..team_count {
            let y_team = top + team as f64 * row_height;
            for (column, across) in columns.iter().zip(ACROSS) {
                let gap_x = (stats_width - across as f64 * dot) / (across + 1) as f64;
                for col in 0..across {
                    for row in 0..DOWN {
                        let x = column.x + gap_x + (dot + gap_x) * col as f64;
                        let y = y_team + gap_y + (dot + gap_y) * row as f64;
                        canvas.fill_rect_translucent(BoundingBox::new(x, y, dot, dot), color, 0.05);
                    }
                }
            }
        }
    }

    /// Caption text with rules running out to the block's edges
    fn draw_calendar_heading<C: Canvas>(
        &self,
        canvas: &mut C,
        rect: BoundingBox,
        rules_bottom: f64,
        text: &str,
    ) -> Result<(), PosterError> {
        let style = self.text_style(canvas, "elim.stage", rect, rect.height, self.color("caption"))?;
        let drawn = canvas.text(rect, text, &style);
        let middle = drawn.y + drawn.height / 2.0;
        let gap = (rules_bottom - middle) / 2.0;
        let rule = self.color("caption-rule");

        canvas.line(
            Point::new(rect.x, middle),
            Point::new(drawn.x - gap, middle),
            self.config.group_line_stats,
            rule,
        );
        canvas.line(
            Point::new(drawn.right() + gap, middle),
            Point::new(rect.right(), middle),
            self.config.group_line_stats,
            rule,
        );
        Ok(())
    }

    fn draw_calendar<C: Canvas>(
        &self,
        canvas: &mut C,
        calendar: &CalendarGridLayout,
    ) -> Result<(), PosterError> {
        let config = self.config;
        let ink = self.color("ink");

        let weekdays = calendar.weekday_rects();
        let (weekdays_top, days_top) = weekdays
            .first()
            .map(|(_, rect)| (rect.y, rect.bottom()))
            .unwrap_or((calendar.bounds().y, calendar.bounds().y));

        let text = self.ctx.text("stage.group")?.to_uppercase();
        self.draw_calendar_heading(canvas, calendar.heading_rect(), weekdays_top, &text)?;

        let dates = self.dates();
        for (weekday, rect) in weekdays {
            let style = self.text_style(canvas, "calendar.day-of-week", rect, rect.height, ink)?;
            canvas.text(rect, dates.weekday_short(weekday)?, &style);
        }

        let mut prev = None;
        for day in calendar.days() {
            self.draw_day(canvas, day, prev)?;
            prev = Some(day.date);
        }

        if self.ctx.args.main_borders {
            let bounds = calendar.bounds();
            let days = bounds.stretch(0.0, days_top - bounds.y, 0.0, 0.0);
            canvas.stroke_rect(days, config.line_outer, ink);
        }
        Ok(())
    }

    fn draw_day<C: Canvas>(
        &self,
        canvas: &mut C,
        day: &DayCell,
        prev: Option<chrono::NaiveDate>,
    ) -> Result<(), PosterError> {
        let config = self.config;
        let ink = self.color("ink");
        let borders = self.ctx.args.main_borders;

        let text = self.dates().calendar_date(day.date, prev)?;
        let style = self
            .text_style(canvas, "day.date", day.date_rect, day.date_rect.height, ink)?
            .h_align(self.start());
        canvas.text(day.date_rect, &text, &style);

        // matchless days only get a bottom rule
        if day.slots.is_empty() {
            if borders {
                canvas.line(
                    Point::new(day.rect.x, day.rect.bottom()),
                    Point::new(day.rect.right(), day.rect.bottom()),
                    config.line_outer,
                    ink,
                );
            }
            return Ok(());
        }

        for slot in &day.slots {
            self.draw_fill(canvas, slot, false)?;
        }
        for slot in &day.slots {
            self.draw_info(canvas, slot, false)?;
        }

        if borders {
            canvas.stroke_rect(day.rect, config.line_outer, ink);
        }
        Ok(())
    }

    fn draw_fill<C: Canvas>(
        &self,
        canvas: &mut C,
        slot: &MatchSlot,
        in_bracket: bool,
    ) -> Result<(), PosterError> {
        let m = self.match_for(slot.id)?;
        if m.stage == Stage::Final || (m.stage == Stage::Third && in_bracket) {
            return Ok(());
        }

        let model = self.ctx.model;
        let letters: &[char] = if m.groups.is_empty() {
            model.group_letters()
        } else {
            &m.groups
        };
        let colors: Vec<Color> = letters
            .iter()
            .filter_map(|letter| model.group(*letter))
            .map(|group| {
                if m.stage == Stage::Group {
                    group.colors.base
                } else {
                    group.colors.lighter
                }
            })
            .collect();

        for (rect, color) in fill_stripes(slot.rect, m.stage, model.first_stage(), &colors) {
            canvas.fill_rect(rect, color);
        }
        Ok(())
    }

    /// Labels under the form lines: seed codes, or feeder group letters
    fn form_labels(&self, m: &Match, in_bracket: bool) -> Option<(String, String, f64)> {
        let args = self.ctx.args;
        let model = self.ctx.model;
        let size = self.config.time_font();

        if args.match_numbers || m.stage == model.first_stage() {
            return Some((m.info.home_seed.clone(), m.info.away_seed.clone(), size));
        }

        let later_round = m.stage > model.first_stage() && m.stage < Stage::Third;
        if !(args.elimination_hints && in_bracket && later_round) {
            return None;
        }
        let feeders = m.feeders?;
        let letters = |id: MatchId| -> String {
            let mut groups = model.get(id).map(|f| f.groups.clone()).unwrap_or_default();
            groups.sort_unstable();
            groups.into_iter().collect()
        };
        Some((letters(feeders.home), letters(feeders.away), size * 0.8))
    }

    fn draw_score<C: Canvas>(
        &self,
        canvas: &mut C,
        rect: BoundingBox,
        score: Option<u32>,
        line: f64,
    ) -> Result<(), PosterError> {
        match score.filter(|_| self.ctx.args.results) {
            Some(score) => {
                let style = self
                    .text_style(canvas, "match.score", rect, rect.height, self.color("score"))?
                    .with_halo(self.color("score-halo"), SCORE_HALO);
                canvas.text(rect, &score.to_string(), &style);
            }
            None => {
                canvas.fill_and_stroke_rect(rect, line, self.color("ink"), self.color("paper"));
            }
        }
        Ok(())
    }

    /// Dash, score boxes and any penalty result, centered on `center_x`
    fn draw_scores<C: Canvas>(
        &self,
        canvas: &mut C,
        m: &Match,
        center_x: f64,
        top: f64,
        sizes: ScoreMetrics,
    ) -> Result<ScoreBoxes, PosterError> {
        let ink = self.color("ink");
        let dash = sizes.dash_gap / 2.0;
        let dash_y = top + sizes.score / 2.0;
        canvas.line(
            Point::new(center_x - dash / 2.0, dash_y),
            Point::new(center_x + dash / 2.0, dash_y),
            sizes.line,
            ink,
        );

        let home = BoundingBox::new(
            center_x - (sizes.dash_gap / 2.0 + sizes.score),
            top,
            sizes.score,
            sizes.score,
        );
        let away = BoundingBox::new(center_x + sizes.dash_gap / 2.0, top, sizes.score, sizes.score);
        self.draw_score(canvas, home, m.info.home_score, sizes.line)?;
        self.draw_score(canvas, away, m.info.away_score, sizes.line)?;

        let half = sizes.pens / 2.0;
        let home_pens = BoundingBox::new(
            home.right() - half - sizes.nudge,
            home.bottom() - half - sizes.nudge,
            sizes.pens,
            sizes.pens,
        );
        let away_pens = BoundingBox::new(
            away.x - half + sizes.nudge,
            away.bottom() - half - sizes.nudge,
            sizes.pens,
            sizes.pens,
        );

        if let (true, Some(h), Some(a)) = (
            self.ctx.args.results,
            m.info.home_tiebreaker,
            m.info.away_tiebreaker,
        ) {
            let rect = BoundingBox::new(
                home_pens.x,
                home_pens.y,
                away_pens.right() - home_pens.x,
                home_pens.height,
            );
            let mut style = self.text_style(canvas, "match.score", rect, rect.height, ink)?;
            if sizes.halo_tiebreaker {
                style.color = self.color("score");
                style = style.with_halo(self.color("score-halo"), SCORE_HALO);
            }
            canvas.text(rect, &format!("({}-{})", h, a), &style);
        }

        Ok(ScoreBoxes {
            home,
            away,
            home_pens,
            away_pens,
        })
    }

    /// Localized team names either side of the score boxes
    fn draw_full_names<C: Canvas>(
        &self,
        canvas: &mut C,
        m: &Match,
        area: BoundingBox,
        boxes: &ScoreBoxes,
    ) -> Result<(), PosterError> {
        let ink = self.color("ink");
        let (home, away) = (boxes.home, boxes.away);

        let home_rect = BoundingBox::new(area.x, home.y, home.x - area.x, home.height);
        let style = self
            .text_style(canvas, "match.team.abbrev", home_rect, home.height, ink)?
            .h_align(HAlign::Right);
        canvas.text(home_rect, self.ctx.team_name(&m.info.home_team)?, &style);

        let away_rect = BoundingBox::new(away.right(), away.y, area.right() - away.right(), away.height);
        let style = self
            .text_style(canvas, "match.team.abbrev", away_rect, away.height, ink)?
            .h_align(HAlign::Left);
        canvas.text(away_rect, self.ctx.team_name(&m.info.away_team)?, &style);
        Ok(())
    }

    fn draw_info<C: Canvas>(
        &self,
        canvas: &mut C,
        slot: &MatchSlot,
        in_bracket: bool,
    ) -> Result<(), PosterError> {
        let config = self.config;
        let args = self.ctx.args;
        let model = self.ctx.model;
        let m = self.match_for(slot.id)?;
        let ink = self.color("ink");
        let rect = slot.rect;

        let time_height = canvas.cap_height(&font_for(self.ctx, "match.time")?, config.time_font());
        if let Some(time_rect) = slot.time_rect(time_height) {
            let style = self.text_style(canvas, "match.time", time_rect, config.time_font(), ink)?;
            canvas.text(time_rect, &self.time_text(m)?, &style);
        }

        let score = config.score_size();
        let sizes = ScoreMetrics {
            score,
            dash_gap: score / 2.0,
            pens: config.pens_size(),
            nudge: config.pens_nudge,
            line: config.line_score,
            halo_tiebreaker: true,
        };
        let boxes = self.draw_scores(canvas, m, rect.x + rect.width / 2.0, slot.score_top(), sizes)?;

        let elimination = m.stage != Stage::Group;
        if elimination && !(args.results && m.info.has_teams()) {
            canvas.fill_and_stroke_rect(boxes.home_pens, config.line_score, ink, self.color("paper"));
            canvas.fill_and_stroke_rect(boxes.away_pens, config.line_score, ink, self.color("paper"));

            let form = config.form_line();
            let form_y = (boxes.home.bottom() + boxes.home_pens.y) / 2.0;
            let form_gap = ((boxes.home.x - rect.x) - form) / 2.0;
            let left_x = rect.x + form_gap;
            let right_x = rect.right() - (form_gap + form);
            for x in [left_x, right_x] {
                canvas.line(
                    Point::new(x, form_y),
                    Point::new(x + form, form_y),
                    config.line_score,
                    ink,
                );
            }

            if let Some((home, away, size)) = self.form_labels(m, in_bracket) {
                for (x, label) in [(left_x, home), (right_x, away)] {
                    let (role, text) = form_label(&label, model.group_letters());
                    let label_rect = BoundingBox::new(x, form_y, form, size);
                    let style = self.text_style(canvas, role, label_rect, size, ink)?;
                    canvas.text(label_rect, &text, &style);
                }
            }

            if args.match_numbers {
                let role = if in_bracket { "elim.label" } else { "match.label" };
                let text = fill(
                    self.ctx.text("match.format.label")?,
                    &[("id", m.id().to_string().as_str())],
                );
                let label_rect = BoundingBox::new(
                    rect.x,
                    boxes.home_pens.bottom(),
                    rect.width,
                    config.label_font() + config.time_gap_max(),
                );
                let style = self.text_style(canvas, role, label_rect, config.label_font(), ink)?;
                canvas.text(label_rect, &text, &style);
            }
            return Ok(());
        }

        if m.stage == Stage::Third {
            self.draw_full_names(canvas, m, rect, &boxes)?;
        } else {
            let team_width = (rect.width - 2.0 * score - sizes.dash_gap) / 2.0;
            let home_rect = BoundingBox::new(rect.x, boxes.home.y, team_width, score);
            let away_rect = BoundingBox::new(rect.right() - team_width, boxes.home.y, team_width, score);
            for (team_rect, team) in [(home_rect, &m.info.home_team), (away_rect, &m.info.away_team)] {
                let style = self.text_style(canvas, "match.team.abbrev", team_rect, score, ink)?;
                canvas.text(team_rect, team, &style);
            }
        }

        if args.group_hints && slot.has_time() {
            if let Some(group) = m.groups.first().and_then(|letter| model.group(*letter)) {
                let style = TextStyle::new(
                    font_for(self.ctx, "group.name")?,
                    config.time_font(),
                    group.colors.darker,
                )
                .align(HAlign::Right, VAlign::Top)
                .with_margin(config.time_gap_max() / 2.0);
                canvas.text(rect, &group.name.to_string(), &style);
            }
        }
        Ok(())
    }

    fn draw_bracket<C: Canvas>(
        &self,
        canvas: &mut C,
        bracket: &BracketGridLayout,
    ) -> Result<(), PosterError> {
        for cell in bracket.cells() {
            self.draw_elim_cell(canvas, cell)?;
        }
        for caption in bracket.captions() {
            self.draw_stage_caption(canvas, caption)?;
        }
        Ok(())
    }

    fn draw_elim_cell<C: Canvas>(&self, canvas: &mut C, cell: &BracketCell) -> Result<(), PosterError> {
        let m = self.match_for(cell.id)?;
        self.draw_fill(canvas, &cell.slot, true)?;

        let date = self.dates().short_date(self.display_date(m)?)?;
        let style = self.text_style(
            canvas,
            "elim.date",
            cell.date_rect,
            cell.date_rect.height,
            self.color("ink"),
        )?;
        canvas.text(cell.date_rect, &date, &style);

        self.draw_info(canvas, &cell.slot, true)?;

        let args = self.ctx.args;
        if args.main_borders && args.elimination_borders {
            if let Some(color) = self.stylesheet.stage_border(cell.stage) {
                canvas.stroke_rect(cell.rect, self.config.line_outer, color);
            }
        }
        Ok(())
    }

    fn draw_stage_caption<C: Canvas>(
        &self,
        canvas: &mut C,
        caption: &StageCaption,
    ) -> Result<(), PosterError> {
        let rect = caption.text_rect;
        let text = self
            .ctx
            .text(&format!("stage.{}", caption.stage.key()))?
            .to_uppercase();
        let style = self.text_style(canvas, "elim.stage", rect, rect.height, self.color("caption"))?;
        let drawn = canvas.text(rect, &text, &style);

        // bracket-shaped rules in the stage's border tint
        let Some(color) = self.stylesheet.stage_border(caption.stage) else {
            return Ok(());
        };
        let width = self.config.group_line_stats;
        let middle = drawn.y + drawn.height / 2.0;
        let gap = (caption.span.y - middle) / 2.0;
        let inset = self.config.elim_cell().width / 2.0;
        let left = rect.x + inset;
        let right = rect.right() - inset;

        canvas.line(Point::new(left, middle), Point::new(drawn.x - gap, middle), width, color);
        canvas.line(Point::new(drawn.right() + gap, middle), Point::new(right, middle), width, color);
        canvas.line(Point::new(left, middle), Point::new(left, middle + gap), width, color);
        canvas.line(Point::new(right, middle), Point::new(right, middle + gap), width, color);
        Ok(())
    }

    fn draw_final<C: Canvas>(&self, canvas: &mut C) -> Result<(), PosterError> {
        let config = self.config;
        let args = self.ctx.args;
        let ink = self.color("ink");
        let card = self.page.final_rect;
        let m = self.ctx.model.final_match();

        let title_font = config.label_font() * 1.7;
        let date_font = title_font * 0.66;
        let text_gap = title_font / 4.0;

        let title_rect = BoundingBox::new(card.x, card.y, card.width, title_font);
        let style = self.text_style(canvas, "final.title", title_rect, title_font, ink)?;
        let title = self.ctx.text("stage.final")?.to_uppercase();
        canvas.text(title_rect, &title, &style);

        let date_rect = title_rect.translate(0.0, title_font + text_gap);
        let date_rect = BoundingBox::new(date_rect.x, date_rect.y, date_rect.width, date_font);
        let style = self.text_style(canvas, "final.date", date_rect, date_font, ink)?;
        let date = self.dates().long_date(self.display_date(m)?)?;
        canvas.text(date_rect, &date, &style);

        let time_rect = date_rect.translate(0.0, date_font + text_gap);
        let style = self.text_style(canvas, "final.time", time_rect, date_font, ink)?;
        canvas.text(time_rect, &self.time_text(m)?, &style);

        let score = config.score_size() * 1.6;
        let sizes = ScoreMetrics {
            score,
            dash_gap: score,
            pens: score / 2.0,
            nudge: 0.0,
            line: config.line_outer,
            halo_tiebreaker: false,
        };
        let score_top = time_rect.bottom() + 2.0 * text_gap;
        let boxes = self.draw_scores(canvas, m, card.x + card.width / 2.0, score_top, sizes)?;

        if args.results && m.info.has_teams() {
            return self.draw_full_names(canvas, m, card, &boxes);
        }

        canvas.fill_and_stroke_rect(boxes.home_pens, sizes.line, ink, self.color("paper"));
        canvas.fill_and_stroke_rect(boxes.away_pens, sizes.line, ink, self.color("paper"));

        let form = score * 4.0;
        let form_y = (boxes.home.bottom() + boxes.home_pens.bottom()) / 2.0;
        let form_gap = ((boxes.home.x - card.x) - form) / 2.0;
        let left_x = card.x + form_gap;
        let right_x = card.right() - (form_gap + form);
        for x in [left_x, right_x] {
            canvas.line(Point::new(x, form_y), Point::new(x + form, form_y), sizes.line, ink);
        }

        if args.match_numbers {
            for (x, seed) in [(left_x, &m.info.home_seed), (right_x, &m.info.away_seed)] {
                let rect = BoundingBox::new(x, form_y + text_gap / 2.0, form, date_font);
                let style = self.text_style(canvas, "final.form.label", rect, date_font, ink)?;
                canvas.text(rect, seed, &style);
            }
        }
        Ok(())
    }

    fn draw_header<C: Canvas>(&self, canvas: &mut C) -> Result<(), PosterError> {
        let height = self.config.header_height;
        let frame = &self.ctx.frame;
        let band = BoundingBox::new(frame.inside.x, frame.inside.y, frame.inside.width, height);
        let light = self.color("text-light");

        // bleeds to the crop marks above and to the sides
        let bleed = frame.crop_marks;
        canvas.fill_rect(
            BoundingBox::new(bleed.x, bleed.y, bleed.width, band.bottom() - bleed.y),
            self.color("ink"),
        );

        let title_font = height / 2.0;
        let style = self.text_style(canvas, "page.header.title", band, title_font, light)?;
        let drawn = canvas.text(band, &self.title()?, &style);
        let side_margin = band.bottom() - drawn.bottom();

        let dates = self
            .dates()
            .date_range(self.ctx.first_date, self.ctx.last_date)?;
        let location = self.ctx.text(&self.ctx.model.properties().host_key()?)?;
        let dates_location = fill(
            self.ctx.text("page.format.dates-and-location")?,
            &[("dates", dates.as_str()), ("location", location)],
        );
        let timezone = fill(
            self.ctx.text("page.format.timezone")?,
            &[
                ("label", self.ctx.text("page.timezone.label")?),
                ("timezone", self.ctx.tz_header.as_str()),
            ],
        );

        let (mut left, mut right) = if self.ctx.args.results {
            (dates, location.to_string())
        } else {
            (dates_location, timezone)
        };
        if self.ctx.is_rtl() {
            std::mem::swap(&mut left, &mut right);
        }

        let side_font = title_font / 2.0;
        for (rect, text, h_align) in [
            (band.stretch(height, 0.0, 0.0, 0.0), left, HAlign::Left),
            (band.stretch(0.0, 0.0, -height, 0.0), right, HAlign::Right),
        ] {
            let style = self
                .text_style(canvas, "page.header.title", rect, side_font, light)?
                .align(h_align, VAlign::Bottom)
                .with_margin(side_margin);
            canvas.text(rect, &text, &style);
        }
        Ok(())
    }

    fn draw_footer<C: Canvas>(&self, canvas: &mut C) -> Result<(), PosterError> {
        let config = self.config;
        let frame = &self.ctx.frame;
        let band = BoundingBox::new(
            frame.inside.x,
            frame.inside.bottom() - config.footer_height,
            frame.inside.width,
            config.footer_height,
        );

        // bleeds to the crop marks below and to the sides
        let bleed = frame.crop_marks;
        canvas.fill_rect(
            BoundingBox::new(bleed.x, band.y, bleed.width, bleed.bottom() - band.y),
            self.color("ink"),
        );

        let credits_rect = band.stretch(config.header_height, 0.0, -config.header_height, 0.0);
        let locale = self.ctx.locale.tag().to_lowercase();
        let left = fill(
            self.ctx.text("page.format.footer")?,
            &[
                ("credits", self.ctx.text("page.credits")?),
                ("locale", locale.as_str()),
                ("paper", self.ctx.paper.name()),
            ],
        );
        let right = [
            format!("v{}", env!("CARGO_PKG_VERSION")),
            self.ctx.tz_abbreviation.clone(),
        ]
        .join(CREDIT_SEPARATOR);

        for (text, h_align) in [
            (left, HAlign::Left),
            (self.ctx.args.variant.clone(), HAlign::Center),
            (right, HAlign::Right),
        ] {
            if text.is_empty() {
                continue;
            }
            let style = self
                .text_style(
                    canvas,
                    "page.header.title",
                    credits_rect,
                    config.footer_height / 4.0,
                    self.color("text-light"),
                )?
                .h_align(h_align);
            canvas.text(credits_rect, &text, &style);
        }
        Ok(())
    }

    fn draw_crop_marks<C: Canvas>(&self, canvas: &mut C) {
        let frame = &self.ctx.frame;
        if !frame.is_cropped() {
            return;
        }
        let color = self.color("crop-marks");
        for segment in frame.mark_segments() {
            canvas.line(segment.from, segment.to, self.config.line_crop_marks, color);
        }
    }
}
