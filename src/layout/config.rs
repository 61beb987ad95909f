//! Configuration for page layout
//!
//! Every length is in inches. Most secondary sizes derive from the day cell,
//! so scaling `day_cell` scales the calendar, bracket and final card together.

use super::types::Size;

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Group standings block
    pub group_block: Size,

    /// Group block border widths
    pub group_line_outer: f64,
    pub group_line_inner: f64,
    pub group_line_stats: f64,

    /// Calendar day cell at the default tier
    pub day_cell: Size,

    /// Busiest-day match count at or above which day cells grow
    pub busy_day_matches: usize,
    /// Width and height multipliers for busy days
    pub busy_day_scale: (f64, f64),
    /// Busiest-day match count at or below which day cells shrink
    pub quiet_day_matches: usize,
    /// Height multiplier for quiet days
    pub quiet_day_height_scale: f64,

    /// Day cell border width
    pub line_outer: f64,
    /// Score box border width
    pub line_score: f64,

    /// Offset applied to penalty boxes so they tuck under the score boxes
    pub pens_nudge: f64,

    /// Header band across the top of the page
    pub header_height: f64,
    /// Footer band across the bottom of the page
    pub footer_height: f64,

    /// Crop mark line width
    pub line_crop_marks: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let block_width = 4.5;
        let day = 2.25;
        Self {
            group_block: Size::new(block_width, block_width / (16.0 / 9.0)),
            group_line_outer: 0.04,
            group_line_inner: 0.008,
            group_line_stats: 0.01,
            day_cell: Size::new(day, day),
            busy_day_matches: 5,
            busy_day_scale: (1.1, 1.3),
            quiet_day_matches: 2,
            quiet_day_height_scale: 0.6,
            line_outer: 0.02,
            line_score: 0.01,
            pens_nudge: 0.02,
            header_height: day * 0.6,
            footer_height: day * 0.2,
            line_crop_marks: 0.008,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group block size
    pub fn with_group_block(mut self, width: f64, height: f64) -> Self {
        self.group_block = Size::new(width, height);
        self
    }

    /// Set the default day cell size
    pub fn with_day_cell(mut self, width: f64, height: f64) -> Self {
        self.day_cell = Size::new(width, height);
        self
    }

    /// Set the header and footer band heights
    pub fn with_header_footer(mut self, header: f64, footer: f64) -> Self {
        self.header_height = header;
        self.footer_height = footer;
        self
    }

    /// Smallest gap between group blocks
    pub fn group_gap_min(&self) -> f64 {
        self.group_block.width.min(self.group_block.height) / 6.0
    }

    /// Largest gap between group blocks
    pub fn group_gap_max(&self) -> f64 {
        self.group_block.width.min(self.group_block.height) / 2.0
    }

    /// Height of the date strip at the top of a day cell
    pub fn date_height(&self) -> f64 {
        self.day_cell.height * 0.06
    }

    /// Font size of match times
    pub fn time_font(&self) -> f64 {
        self.day_cell.height * 0.075
    }

    pub fn time_gap_max(&self) -> f64 {
        self.time_font() / 2.0
    }

    /// Side of a square score box
    pub fn score_size(&self) -> f64 {
        self.day_cell.height * 0.147
    }

    /// Side of a square penalty box
    pub fn pens_size(&self) -> f64 {
        self.score_size() / 2.0
    }

    /// Length of the line a form label sits on
    pub fn form_line(&self) -> f64 {
        self.score_size() * 1.32
    }

    /// Font size of match labels (`Match 49`)
    pub fn label_font(&self) -> f64 {
        self.time_font() * 1.3
    }

    /// Bracket cell: half a day cell plus room for the date
    pub fn elim_cell(&self) -> Size {
        Size::new(
            self.day_cell.width,
            self.day_cell.height / 2.0 + self.time_gap_max() * 2.0,
        )
    }

    /// Horizontal and vertical gaps between bracket cells
    pub fn stage_gap(&self) -> (f64, f64) {
        let cell = self.elim_cell();
        (cell.width / 8.0, cell.height / 8.0)
    }

    /// Font size of stage captions
    pub fn stage_font(&self) -> f64 {
        self.time_font()
    }

    /// Band above a stage reserved for its caption
    pub fn stage_label_height(&self) -> f64 {
        self.stage_font() * 2.0
    }

    /// Weekday name row above the calendar
    pub fn day_of_week_height(&self) -> f64 {
        self.date_height() * 2.0
    }

    pub fn final_card(&self) -> Size {
        Size::new(self.day_cell.width * 3.0, self.day_cell.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.group_block.width, 4.5);
        assert!(close(config.group_block.height, 2.53125));
        assert_eq!(config.day_cell, Size::new(2.25, 2.25));
        assert_eq!(config.busy_day_matches, 5);
        assert_eq!(config.quiet_day_matches, 2);
        assert!(close(config.date_height(), 0.135));
        assert!(close(config.time_font(), 0.16875));
        assert!(close(config.score_size(), 0.33075));
        assert!(close(config.elim_cell().height, 1.29375));
        assert!(close(config.header_height, 1.35));
        assert!(close(config.footer_height, 0.45));
        assert_eq!(config.final_card(), Size::new(6.75, 2.25));
    }

    #[test]
    fn test_group_gap_range() {
        let config = LayoutConfig::default();
        assert!(close(config.group_gap_min(), 2.53125 / 6.0));
        assert!(close(config.group_gap_max(), 2.53125 / 2.0));
        assert!(config.group_gap_min() < config.group_gap_max());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_day_cell(3.0, 3.0)
            .with_group_block(5.0, 3.0)
            .with_header_footer(1.0, 0.25);

        assert_eq!(config.day_cell, Size::new(3.0, 3.0));
        assert_eq!(config.group_block, Size::new(5.0, 3.0));
        assert_eq!(config.header_height, 1.0);
        assert!(close(config.elim_cell().width, 3.0));
    }
}
