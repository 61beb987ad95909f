//! Elimination bracket grid
//!
//! Each elimination stage gets a column on each side of the page: the left
//! columns hold one half of the draw, the right columns mirror them with the
//! other half, and both meet at the semifinals in the middle. Stages with
//! fewer matches are inset toward the vertical center. The third place match
//! sits centered below the semifinals.

use super::calendar::{info_height, MatchSlot};
use super::config::LayoutConfig;
use super::error::LayoutError;
use super::types::{BoundingBox, Point, Size};
use crate::bracket::{BracketModel, Match, MatchId, Stage};

/// Which side of the bracket a cell is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    /// The third place match
    Center,
}

/// A placed elimination match
#[derive(Debug, Clone, PartialEq)]
pub struct BracketCell {
    pub id: MatchId,
    pub stage: Stage,
    pub side: Side,
    pub rect: BoundingBox,
    pub slot: MatchSlot,
    pub date_rect: BoundingBox,
}

/// Caption band over the cells of one stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageCaption {
    pub stage: Stage,
    /// Union of the stage's cells
    pub span: BoundingBox,
    /// Where the caption text goes
    pub text_rect: BoundingBox,
}

#[derive(Debug, Clone, Copy)]
pub struct BracketOptions {
    /// Rendered height of the time text
    pub time_height: f64,
    pub results: bool,
    pub match_numbers: bool,
    /// Put the away half on the left
    pub rtl: bool,
}

#[derive(Debug, Clone)]
pub struct BracketGridLayout {
    origin: Point,
    size: Size,
    mid_grid: f64,
    columns: usize,
    rows: usize,
    stages: Vec<Stage>,
    cells: Vec<BracketCell>,
    captions: Vec<StageCaption>,
}

/// Y offsets of each row of one stage, relative to the grid top
fn stage_rows(
    stage_index: usize,
    count: usize,
    rows: usize,
    grid_height: f64,
    cell: Size,
    pitch: f64,
    inset_step: f64,
) -> Vec<f64> {
    if count >= rows {
        return (0..count).map(|row| row as f64 * pitch).collect();
    }
    let inset = stage_index as f64 * inset_step;
    if count <= 1 {
        return vec![inset; count];
    }
    let spare = grid_height - (count as f64 * cell.height + 2.0 * inset);
    let stride = spare / (count - 1) as f64 + cell.height;
    (0..count).map(|row| inset + row as f64 * stride).collect()
}

impl BracketGridLayout {
    pub fn new(
        model: &BracketModel,
        config: &LayoutConfig,
        options: BracketOptions,
    ) -> Result<Self, LayoutError> {
        let stages = model.elimination_stages();
        if stages.is_empty() {
            return Err(LayoutError::invalid_layout("bracket", "no elimination matches"));
        }

        let (left_half, right_half) = if options.rtl {
            (model.away_half(), model.home_half())
        } else {
            (model.home_half(), model.away_half())
        };

        let halves: Vec<(Vec<&Match>, Vec<&Match>)> = stages
            .iter()
            .map(|&stage| {
                let mut matches = model.matches_in_stage(stage);
                matches.sort_by_key(|m| m.sort_elim);
                let (left, right): (Vec<&Match>, Vec<&Match>) =
                    matches.into_iter().partition(|m| left_half.contains(&m.id()));
                debug_assert!(right.iter().all(|m| right_half.contains(&m.id())));
                (left, right)
            })
            .collect();

        let columns = stages.len() * 2;
        let rows = halves
            .iter()
            .map(|(l, r)| l.len().max(r.len()))
            .max()
            .unwrap_or(0);

        let cell = config.elim_cell();
        let (gap_x, gap_y) = config.stage_gap();
        let label = config.stage_label_height();
        let grid = Size::new(
            columns as f64 * cell.width + columns.saturating_sub(1) as f64 * gap_x,
            rows as f64 * cell.height + rows.saturating_sub(1) as f64 * gap_y,
        );
        let inset_step = if stages.len() > 1 {
            ((grid.height - cell.height) / 2.0) / (stages.len() - 1) as f64
        } else {
            0.0
        };
        let pitch_x = cell.width + gap_x;
        let pitch_y = cell.height + gap_y;

        let mut layout = Self {
            origin: Point::default(),
            size: Size::new(grid.width, label + grid.height),
            mid_grid: label + grid.height / 2.0,
            columns,
            rows,
            stages: stages.clone(),
            cells: Vec::new(),
            captions: Vec::new(),
        };

        let mut row_offsets = Vec::with_capacity(stages.len());
        for (index, (stage, (left, right))) in stages.iter().zip(&halves).enumerate() {
            let count = left.len().max(right.len());
            let offsets = stage_rows(index, count, rows, grid.height, cell, pitch_y, inset_step);
            let sides = [
                (index, Side::Left, left),
                (columns - 1 - index, Side::Right, right),
            ];
            for (column, side, matches) in sides {
                for (m, offset) in matches.iter().zip(&offsets) {
                    let origin = Point::new(column as f64 * pitch_x, label + offset);
                    layout.cells.push(Self::place(m, side, cell.at(origin), config, options));
                }
            }
            row_offsets.push((*stage, offsets));
        }

        if let Some(third) = model.third_match() {
            let row = |stage: Stage, index: usize| {
                row_offsets
                    .iter()
                    .find(|(s, _)| *s == stage)
                    .and_then(|(_, offsets)| offsets.get(index))
                    .map(|offset| label + offset)
            };
            let mut y = row(Stage::Quarterfinal, 1)
                .map(|y| y + cell.height / 2.0)
                .unwrap_or(label);
            if let Some(semis) = row(Stage::Semifinal, 0) {
                y = y.max(semis + cell.height + 2.0 * label);
            }
            let x = (grid.width - cell.width) / 2.0;
            let rect = cell.at(Point::new(x, y));
            layout
                .cells
                .push(Self::place(third, Side::Center, rect, config, options));
            layout.size.height = layout.size.height.max(rect.bottom());
        }

        layout.captions = Self::build_captions(&layout.cells, &stages, config);
        Ok(layout)
    }

    fn place(
        m: &Match,
        side: Side,
        rect: BoundingBox,
        config: &LayoutConfig,
        options: BracketOptions,
    ) -> BracketCell {
        let date_height = config.time_font();
        let mut slot = MatchSlot::fit(
            m.id(),
            m.stage,
            rect,
            info_height(config, options.time_height, !options.results),
            options.time_height,
            config.time_gap_max(),
        );

        let mut adjust = date_height / 2.0;
        if !options.match_numbers {
            adjust += config.label_font() / 2.0;
        }
        slot.outer_gap += adjust;
        slot.time_and_gap += adjust / 2.0;

        let date_rect = BoundingBox::new(
            rect.x,
            rect.y + (slot.outer_gap - date_height) / 2.0,
            rect.width,
            date_height,
        );

        BracketCell {
            id: m.id(),
            stage: m.stage,
            side,
            rect,
            slot,
            date_rect,
        }
    }

    fn build_captions(
        cells: &[BracketCell],
        stages: &[Stage],
        config: &LayoutConfig,
    ) -> Vec<StageCaption> {
        let label = config.stage_label_height();
        let font = config.stage_font();
        stages
            .iter()
            .copied()
            .chain(std::iter::once(Stage::Third))
            .filter_map(|stage| {
                let rects: Vec<BoundingBox> = cells
                    .iter()
                    .filter(|c| c.stage == stage)
                    .map(|c| c.rect)
                    .collect();
                let span = BoundingBox::union_all(&rects)?;
                let mut text_rect = BoundingBox::new(span.x, span.y - label, span.width, font);
                if stage == Stage::Third {
                    text_rect = text_rect.translate(0.0, font);
                }
                Some(StageCaption {
                    stage,
                    span,
                    text_rect,
                })
            })
            .collect()
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn move_to(&mut self, origin: Point) {
        let (dx, dy) = (origin.x - self.origin.x, origin.y - self.origin.y);
        for cell in &mut self.cells {
            cell.rect = cell.rect.translate(dx, dy);
            cell.slot.rect = cell.slot.rect.translate(dx, dy);
            cell.date_rect = cell.date_rect.translate(dx, dy);
        }
        for caption in &mut self.captions {
            caption.span = caption.span.translate(dx, dy);
            caption.text_rect = caption.text_rect.translate(dx, dy);
        }
        self.origin = origin;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> BoundingBox {
        self.size.at(self.origin)
    }

    /// Distance from the top to the middle of the cell grid
    pub fn mid_grid(&self) -> f64 {
        self.mid_grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Stages with columns, in round order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn cells(&self) -> &[BracketCell] {
        &self.cells
    }

    pub fn cell_for(&self, id: MatchId) -> Option<&BracketCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    pub fn captions(&self) -> &[StageCaption] {
        &self.captions
    }
}
