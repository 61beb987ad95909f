//! Group block grid
//!
//! Lays out fixed-size group blocks in a grid whose gaps stretch to fill a
//! target extent. Gaps are clamped to the configured range, so a grid can end
//! up larger or smaller than the extent it was asked to fill.

use super::config::LayoutConfig;
use super::types::{BoundingBox, Point, Size};

/// How many columns and rows the grid has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    /// `round(sqrt(n)) + 1` columns and as many rows
    Auto,
    /// Fixed column count, rows derived
    Columns(usize),
    /// Fixed row count, columns derived
    Rows(usize),
    Fixed { columns: usize, rows: usize },
}

/// Where gaps go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapMode {
    /// A gap between blocks and half a gap at each outer edge
    Outer,
    /// Gaps only between blocks
    Tight,
}

/// A grid of group blocks
#[derive(Debug, Clone, PartialEq)]
pub struct GroupGridLayout {
    /// Group letters in placement order (column-major)
    groups: Vec<char>,
    block: Size,
    columns: usize,
    rows: usize,
    mode: GapMode,
    gap_x: f64,
    gap_y: f64,
    gap_range: (f64, f64),
    degenerate: bool,
}

fn div_ceil(n: usize, d: usize) -> usize {
    if d == 0 {
        0
    } else {
        (n + d - 1) / d
    }
}

impl GroupGridLayout {
    /// A tight grid at the largest allowed gap
    pub fn new(groups: Vec<char>, shape: GridShape, config: &LayoutConfig) -> Self {
        let n = groups.len();
        let (columns, rows) = match shape {
            GridShape::Auto => {
                let columns = (n as f64).sqrt().round() as usize + 1;
                (columns, columns)
            }
            GridShape::Columns(columns) => (columns, div_ceil(n, columns)),
            GridShape::Rows(rows) => (div_ceil(n, rows), rows),
            GridShape::Fixed { columns, rows } => (columns, rows),
        };
        let gap_range = (config.group_gap_min(), config.group_gap_max());
        Self {
            groups,
            block: config.group_block,
            columns,
            rows,
            mode: GapMode::Tight,
            gap_x: gap_range.1,
            gap_y: gap_range.1,
            gap_range,
            degenerate: false,
        }
    }

    pub fn groups(&self) -> &[char] {
        &self.groups
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn mode(&self) -> GapMode {
        self.mode
    }

    /// Horizontal and vertical gap
    pub fn gap(&self) -> (f64, f64) {
        (self.gap_x, self.gap_y)
    }

    /// Whether the last relayout needed a negative gap on some axis
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    fn gap_count(&self, count: usize) -> f64 {
        match self.mode {
            GapMode::Outer => count as f64,
            GapMode::Tight => count.saturating_sub(1) as f64,
        }
    }

    /// Overall extent including gaps and outer margins
    pub fn size(&self) -> Size {
        if self.groups.is_empty() {
            return Size::default();
        }
        Size::new(
            self.columns as f64 * self.block.width + self.gap_count(self.columns) * self.gap_x,
            self.rows as f64 * self.block.height + self.gap_count(self.rows) * self.gap_y,
        )
    }

    /// Recompute gaps so the grid fills `extent` in `mode`
    pub fn relayout(&mut self, extent: Size, mode: GapMode) {
        self.mode = mode;
        let (gap_x, degenerate_x) = self.fit_gap(extent.width, self.columns, self.block.width);
        let (gap_y, degenerate_y) = self.fit_gap(extent.height, self.rows, self.block.height);
        self.gap_x = gap_x;
        self.gap_y = gap_y;
        self.degenerate = degenerate_x || degenerate_y;
    }

    fn fit_gap(&self, extent: f64, count: usize, block: f64) -> (f64, bool) {
        let content = count as f64 * block;
        let gaps = self.gap_count(count);
        if count <= 1 || gaps == 0.0 {
            return (0.0, extent < content);
        }
        let raw = (extent - content) / gaps;
        (raw.clamp(self.gap_range.0, self.gap_range.1), raw < 0.0)
    }

    /// Block rectangles with the grid's top-left corner at `origin`
    pub fn block_rects(&self, origin: Point) -> Vec<(char, BoundingBox)> {
        let margin = match self.mode {
            GapMode::Outer => (self.gap_x / 2.0, self.gap_y / 2.0),
            GapMode::Tight => (0.0, 0.0),
        };
        let rows = self.rows.max(1);
        self.groups
            .iter()
            .enumerate()
            .map(|(i, &group)| {
                let column = i / rows;
                let row = i % rows;
                let x = origin.x + margin.0 + column as f64 * (self.block.width + self.gap_x);
                let y = origin.y + margin.1 + row as f64 * (self.block.height + self.gap_y);
                (group, self.block.at(Point::new(x, y)))
            })
            .collect()
    }
}
