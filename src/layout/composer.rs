//! Page composition
//!
//! Places the two group grids, the calendar, the bracket and the final card
//! on the canvas between the header and footer. The normal arrangement puts
//! the groups on either side of a centered calendar/bracket/final stack; when
//! that does not fit, fallbacks trade the final card's gap or move the groups
//! below the calendar.

use tracing::info;

use super::bracket::BracketGridLayout;
use super::calendar::CalendarGridLayout;
use super::error::LayoutError;
use super::groups::{GapMode, GroupGridLayout};
use super::types::{BoundingBox, Point, Size};

/// How the page ended up being arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Groups flank the calendar/bracket/final stack
    Normal,
    /// As normal, with the final card pulled into the bracket's gap
    VerticalOverflow,
    /// Groups flush with the canvas edges, below the calendar, packed tight
    HorizontalOverflow,
}

/// Every block of a page at its final position
#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub strategy: Strategy,
    pub canvas: BoundingBox,
    pub left_groups: GroupGridLayout,
    pub left_origin: Point,
    pub right_groups: GroupGridLayout,
    pub right_origin: Point,
    pub calendar: CalendarGridLayout,
    pub bracket: Option<BracketGridLayout>,
    pub final_rect: BoundingBox,
}

impl ComposedPage {
    pub fn left_groups_rect(&self) -> BoundingBox {
        self.left_groups.size().at(self.left_origin)
    }

    pub fn right_groups_rect(&self) -> BoundingBox {
        self.right_groups.size().at(self.right_origin)
    }

    /// Every placed block, for bounds checks
    pub fn block_rects(&self) -> Vec<BoundingBox> {
        let mut rects = vec![
            self.left_groups_rect(),
            self.right_groups_rect(),
            self.calendar.bounds(),
            self.final_rect,
        ];
        rects.extend(self.bracket.as_ref().map(|b| b.bounds()));
        rects
    }
}

/// Shortfalls as positive overflow magnitudes
fn overflow(x_unused: f64, y_unused: f64) -> LayoutError {
    let short = |unused: f64| (unused < 0.0).then_some(-unused);
    LayoutError::overflow(short(x_unused), short(y_unused))
}

/// Groups that could not fit the canvas height even at zero gaps
fn check_groups(
    canvas: BoundingBox,
    x_unused: f64,
    grids: [&GroupGridLayout; 2],
) -> Result<(), LayoutError> {
    for grid in grids {
        if grid.is_degenerate() {
            return Err(overflow(x_unused, canvas.height - grid.size().height));
        }
    }
    Ok(())
}

/// Height of the groups-and-bracket band and where the groups sit in it
///
/// The bracket is centered on the groups' vertical midpoint, so a bracket
/// taller than the groups overhangs them. Returns the overhang above the
/// groups and the band's total height.
fn centered_band(groups_height: f64, bracket_height: f64, mid_grid: f64) -> (f64, f64) {
    let half = groups_height / 2.0;
    let above = (mid_grid - half).max(0.0);
    let below = (bracket_height - mid_grid - half).max(0.0);
    (above, groups_height + above + below)
}

/// Arranges laid out blocks on a canvas
#[derive(Debug, Clone)]
pub struct PageComposer {
    canvas: BoundingBox,
    final_card: Size,
}

impl PageComposer {
    pub fn new(canvas: BoundingBox, final_card: Size) -> Self {
        Self { canvas, final_card }
    }

    pub fn canvas(&self) -> BoundingBox {
        self.canvas
    }

    fn centered_x(&self, width: f64) -> f64 {
        self.canvas.x + (self.canvas.width - width) / 2.0
    }

    /// Groups either side of a calendar holding every match but the final
    ///
    /// There is no fallback: anything that does not fit is an overflow.
    pub fn compose_calendar_only(
        &self,
        mut left: GroupGridLayout,
        mut right: GroupGridLayout,
        mut calendar: CalendarGridLayout,
    ) -> Result<ComposedPage, LayoutError> {
        let canvas = self.canvas;
        left.relayout(canvas.size(), GapMode::Outer);
        right.relayout(canvas.size(), GapMode::Outer);
        let (groups_left, groups_right, cal) = (left.size(), right.size(), calendar.size());

        let x_unused = canvas.width - (cal.width + groups_left.width + groups_right.width);
        let y_unused = canvas.height - (cal.height + self.final_card.height);
        if x_unused < 0.0 || y_unused < 0.0 {
            return Err(overflow(x_unused, y_unused));
        }
        check_groups(canvas, x_unused, [&left, &right])?;
        let gap_x = x_unused / 4.0;
        let gap_y = y_unused / 3.0;

        let y_groups = canvas.y + (canvas.height - groups_left.height) / 2.0;
        let left_origin = Point::new(canvas.x + gap_x, y_groups);
        let calendar_origin = Point::new(left_origin.x + groups_left.width + gap_x, canvas.y + gap_y);
        calendar.move_to(calendar_origin);
        let right_origin = Point::new(calendar_origin.x + cal.width + gap_x, y_groups);
        let final_rect = self.final_card.at(Point::new(
            self.centered_x(self.final_card.width),
            calendar_origin.y + cal.height + gap_y,
        ));

        info!(strategy = ?Strategy::Normal, gap_x, gap_y, "composed calendar page");

        Ok(ComposedPage {
            strategy: Strategy::Normal,
            canvas,
            left_groups: left,
            left_origin,
            right_groups: right,
            right_origin,
            calendar,
            bracket: None,
            final_rect,
        })
    }

    /// Groups either side of a calendar, bracket and final card stack
    pub fn compose_with_bracket(
        &self,
        mut left: GroupGridLayout,
        mut right: GroupGridLayout,
        mut calendar: CalendarGridLayout,
        mut bracket: BracketGridLayout,
    ) -> Result<ComposedPage, LayoutError> {
        let canvas = self.canvas;
        let card = self.final_card;
        left.relayout(canvas.size(), GapMode::Outer);
        right.relayout(canvas.size(), GapMode::Outer);
        let (cal, brk) = (calendar.size(), bracket.size());

        let mut strategy = Strategy::Normal;
        let mut y_unused = canvas.height - (cal.height + brk.height + card.height);
        let mut gap_y = y_unused / 4.0;
        let mut gap_final = gap_y;
        if gap_y < 0.0 {
            strategy = Strategy::VerticalOverflow;
            y_unused = canvas.height - (cal.height + brk.height);
            gap_y = y_unused / 3.0;
            gap_final = 0.0;
        }

        let widest = cal.width.max(brk.width).max(card.width);
        let x_unused = canvas.width - (widest + left.size().width + right.size().width);
        let mut gap_x = x_unused / 4.0;

        let left_origin;
        let right_origin;
        let bracket_y;
        if gap_x < 0.0 {
            strategy = Strategy::HorizontalOverflow;
            left.relayout(canvas.size(), GapMode::Tight);
            right.relayout(canvas.size(), GapMode::Tight);

            let x_unused = (canvas.width
                - (brk.width.max(card.width) + left.size().width + right.size().width))
                .min(canvas.width - cal.width);
            let tallest = |l: &GroupGridLayout, r: &GroupGridLayout| {
                l.size().height.max(r.size().height)
            };
            let mut groups_height = tallest(&left, &right);
            let (mut above, mut band) = centered_band(groups_height, brk.height, bracket.mid_grid());
            let mut y_unused = canvas.height - (cal.height + band + card.height);
            let squeezed = y_unused < 0.0;
            if squeezed {
                let flat = Size::new(canvas.width, 0.0);
                left.relayout(flat, GapMode::Tight);
                right.relayout(flat, GapMode::Tight);
                groups_height = tallest(&left, &right);
                (above, band) = centered_band(groups_height, brk.height, bracket.mid_grid());
                y_unused = canvas.height - (cal.height + band + card.height);
            }
            if x_unused < 0.0 || y_unused < 0.0 {
                return Err(overflow(x_unused, y_unused));
            }

            gap_x = x_unused / 4.0;
            gap_y = y_unused / 3.0;
            gap_final = if squeezed { 0.0 } else { gap_y };
            let y_groups = canvas.y + cal.height + 2.0 * gap_y + above;
            left_origin = Point::new(canvas.x, y_groups);
            right_origin = Point::new(canvas.right() - right.size().width, y_groups);
            bracket_y = y_groups + groups_height / 2.0 - bracket.mid_grid();
        } else {
            if y_unused < 0.0 {
                return Err(overflow(x_unused, y_unused));
            }
            check_groups(canvas, x_unused, [&left, &right])?;
            let y_groups = canvas.y + (canvas.height - left.size().height) / 2.0;
            left_origin = Point::new(canvas.x + gap_x, y_groups);
            right_origin = Point::new(canvas.right() - (right.size().width + gap_x), y_groups);
            bracket_y = canvas.y + gap_y + cal.height + gap_y;
        }

        calendar.move_to(Point::new(self.centered_x(cal.width), canvas.y + gap_y));
        bracket.move_to(Point::new(self.centered_x(brk.width), bracket_y));
        let final_rect = card.at(Point::new(
            self.centered_x(card.width),
            canvas.bottom() - (card.height + gap_final),
        ));

        info!(?strategy, gap_x, gap_y, gap_final, "composed calendar and bracket page");

        Ok(ComposedPage {
            strategy,
            canvas,
            left_groups: left,
            left_origin,
            right_groups: right,
            right_origin,
            calendar,
            bracket: Some(bracket),
            final_rect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{BracketModel, Match, Stage};
    use crate::layout::bracket::BracketOptions;
    use crate::layout::calendar::CalendarOptions;
    use crate::layout::config::LayoutConfig;
    use crate::layout::display::DisplaySchedule;
    use crate::layout::groups::GridShape;
    use crate::locale::Locale;
    use crate::schedule::fixture::synthetic;
    use chrono_tz::Tz;

    struct Blocks {
        left: GroupGridLayout,
        right: GroupGridLayout,
        calendar: CalendarGridLayout,
        bracket: BracketGridLayout,
        config: LayoutConfig,
    }

    fn blocks(seeds: usize, with_elimination: bool) -> Blocks {
        let config = LayoutConfig::default();
        let model = BracketModel::build(&synthetic(seeds)).unwrap();
        let tz: Tz = "America/New_York".parse().unwrap();
        let display = DisplaySchedule::build(model.matches(), tz, tz, true);
        let letters = model.group_letters();
        let half = letters.len() / 2;
        let left = GroupGridLayout::new(letters[..half].to_vec(), GridShape::Columns(1), &config);
        let right = GroupGridLayout::new(letters[half..].to_vec(), GridShape::Columns(1), &config);
        let on_calendar: Vec<&Match> = model
            .matches()
            .iter()
            .filter(|m| {
                m.stage == Stage::Group || (with_elimination && m.stage != Stage::Final)
            })
            .collect();
        let calendar = CalendarGridLayout::new(
            &on_calendar,
            &display,
            &Locale::default(),
            &config,
            CalendarOptions {
                time_height: 0.12,
                results: false,
            },
        )
        .unwrap();
        let bracket = BracketGridLayout::new(
            &model,
            &config,
            BracketOptions {
                time_height: 0.12,
                results: false,
                match_numbers: false,
                rtl: false,
            },
        )
        .unwrap();
        Blocks {
            left,
            right,
            calendar,
            bracket,
            config,
        }
    }

    fn compose(blocks: Blocks, canvas: BoundingBox) -> Result<ComposedPage, LayoutError> {
        PageComposer::new(canvas, blocks.config.final_card()).compose_with_bracket(
            blocks.left,
            blocks.right,
            blocks.calendar,
            blocks.bracket,
        )
    }

    fn assert_inside(page: &ComposedPage) {
        for rect in page.block_rects() {
            assert!(page.canvas.contains_box(&rect, 1e-9), "{:?} outside {:?}", rect, page.canvas);
        }
    }

    #[test]
    fn test_roomy_canvas_is_normal() {
        let page = compose(blocks(32, false), BoundingBox::new(1.0, 2.0, 60.0, 40.0)).unwrap();
        assert_eq!(page.strategy, Strategy::Normal);
        assert_inside(&page);

        let left = page.left_groups_rect();
        let right = page.right_groups_rect();
        let calendar = page.calendar.bounds();
        assert!(left.right() < calendar.x);
        assert!(calendar.right() < right.x);
        assert!((left.x - 1.0 - (61.0 - right.right())).abs() < 1e-9);
        assert!(page.bracket.as_ref().unwrap().bounds().y > calendar.bottom());
    }

    #[test]
    fn test_short_canvas_drops_final_gap() {
        let b = blocks(32, false);
        let stack = b.calendar.size().height + b.bracket.size().height;
        let canvas = BoundingBox::new(0.0, 0.0, 60.0, stack + b.config.final_card().height - 0.5);
        let page = compose(b, canvas).unwrap();
        assert_eq!(page.strategy, Strategy::VerticalOverflow);
        assert!((page.final_rect.bottom() - canvas.bottom()).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_overflow_is_fatal() {
        let b = blocks(32, false);
        let stack = b.calendar.size().height + b.bracket.size().height;
        let canvas = BoundingBox::new(0.0, 0.0, 60.0, stack - 1.0);
        let err = compose(b, canvas).unwrap_err();
        match err {
            LayoutError::Overflow { x, y } => {
                assert_eq!(x, None);
                assert!((y.unwrap() - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_narrow_canvas_moves_groups_below_calendar() {
        let b = blocks(32, false);
        let groups = b.left.size().width + b.right.size().width;
        let normal_width = b.calendar.size().width + groups;
        let narrow_width = b.bracket.size().width.max(b.config.final_card().width) + groups + 0.4;
        assert!(narrow_width < normal_width);

        let canvas = BoundingBox::new(0.0, 0.0, narrow_width, 40.0);
        let page = compose(b, canvas).unwrap();
        assert_eq!(page.strategy, Strategy::HorizontalOverflow);
        assert_eq!(page.left_groups.mode(), GapMode::Tight);
        assert_eq!(page.left_origin.x, 0.0);
        assert!((page.right_groups_rect().right() - canvas.right()).abs() < 1e-9);
        assert!(page.left_origin.y > page.calendar.bounds().bottom());
        assert!(page.final_rect.y >= page.left_groups_rect().bottom() - 1e-9);

        let groups_mid = page.left_groups_rect().center().y;
        let bracket = page.bracket.as_ref().unwrap();
        assert!((bracket.bounds().y + bracket.mid_grid() - groups_mid).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_short_canvas_squeezes_groups() {
        let b = blocks(32, false);
        let config = b.config.clone();
        let groups = b.left.size().width + b.right.size().width;
        let width = b.bracket.size().width.max(config.final_card().width) + groups + 0.4;
        let rows = b.left.rows() as f64;
        let tight_min = rows * config.group_block.height + (rows - 1.0) * config.group_gap_min();
        let height = b.calendar.size().height + tight_min + config.final_card().height + 0.3;

        let page = compose(b, BoundingBox::new(0.0, 0.0, width, height)).unwrap();
        assert_eq!(page.strategy, Strategy::HorizontalOverflow);
        assert!((page.left_groups.gap().1 - config.group_gap_min()).abs() < 1e-9);
        assert!((page.final_rect.bottom() - height).abs() < 1e-9);
    }

    /// Narrow enough for the horizontal fallback, for any seed count
    fn narrow_width(b: &Blocks) -> f64 {
        let groups = b.left.size().width + b.right.size().width;
        let stack = b.bracket.size().width.max(b.config.final_card().width) + groups;
        stack.max(b.calendar.size().width) + 0.4
    }

    #[test]
    fn test_overhanging_bracket_stays_clear_of_final() {
        let b = blocks(8, false);
        let groups_height = b.config.group_block.height;
        let (_, band) = centered_band(groups_height, b.bracket.size().height, b.bracket.mid_grid());
        assert!(band > groups_height);

        let width = narrow_width(&b);
        let height = b.calendar.size().height + band + b.config.final_card().height + 0.3;
        let page = compose(b, BoundingBox::new(0.0, 0.0, width, height)).unwrap();
        assert_eq!(page.strategy, Strategy::HorizontalOverflow);
        assert_inside(&page);

        let layout = page.bracket.as_ref().unwrap();
        let bracket = layout.bounds();
        assert!(bracket.y >= page.calendar.bounds().bottom() - 1e-9);
        assert!(bracket.bottom() <= page.final_rect.y + 1e-9);
        let groups_mid = page.left_groups_rect().center().y;
        assert!((bracket.y + layout.mid_grid() - groups_mid).abs() < 1e-9);
    }

    #[test]
    fn test_overhanging_bracket_without_room_is_fatal() {
        let b = blocks(8, false);
        let groups_height = b.config.group_block.height;
        let width = narrow_width(&b);
        let height = b.calendar.size().height + groups_height + b.config.final_card().height + 0.3;

        let err = compose(b, BoundingBox::new(0.0, 0.0, width, height)).unwrap_err();
        assert!(matches!(err, LayoutError::Overflow { x: None, y: Some(y) } if y > 0.0));
    }

    #[test]
    fn test_groups_taller_than_canvas_overflow() {
        let b = blocks(16, true);
        let tall = LayoutConfig::default().with_group_block(4.5, 20.0);
        let left = GroupGridLayout::new(vec!['A', 'B'], GridShape::Columns(1), &tall);
        let right = GroupGridLayout::new(vec!['C', 'D'], GridShape::Columns(1), &tall);

        let composer = PageComposer::new(BoundingBox::new(0.0, 0.0, 40.0, 30.0), b.config.final_card());
        let err = composer
            .compose_calendar_only(left, right, b.calendar)
            .unwrap_err();
        // two 20in blocks plus two clamped 0.75in gaps
        assert!(matches!(err, LayoutError::Overflow { x: None, y: Some(y) } if (y - 11.5).abs() < 1e-9));
    }

    #[test]
    fn test_nothing_fits_reports_both_axes() {
        let err = compose(blocks(32, false), BoundingBox::new(0.0, 0.0, 10.0, 10.0)).unwrap_err();
        match err {
            LayoutError::Overflow { x, y } => {
                assert!(x.unwrap() > 0.0);
                assert!(y.unwrap() > 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_calendar_only_layout() {
        let b = blocks(16, true);
        let composer = PageComposer::new(BoundingBox::new(0.0, 0.0, 40.0, 30.0), b.config.final_card());
        let page = composer
            .compose_calendar_only(b.left, b.right, b.calendar)
            .unwrap();
        assert_eq!(page.strategy, Strategy::Normal);
        assert!(page.bracket.is_none());
        assert_inside(&page);
        assert!(page.final_rect.y > page.calendar.bounds().bottom());

        let b = blocks(16, true);
        let composer = PageComposer::new(BoundingBox::new(0.0, 0.0, 12.0, 30.0), b.config.final_card());
        let err = composer
            .compose_calendar_only(b.left, b.right, b.calendar)
            .unwrap_err();
        assert!(matches!(err, LayoutError::Overflow { x: Some(_), y: None }));
    }
}
