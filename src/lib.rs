//! Tourney Poster - wall chart generator for group-and-knockout tournaments
//!
//! This library infers the bracket structure of a tournament from its match
//! schedule, lays out group standings, a calendar of matches, the elimination
//! bracket and the final on a sheet of paper, and draws the page as SVG.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tourney_poster::{render_page, BracketModel, PageArgs, PageContext, Schedule, StringTable};
//!
//! let schedule = Schedule::from_file(Path::new("worldcup.toml")).unwrap();
//! let model = BracketModel::build(&schedule).unwrap();
//! let strings = StringTable::from_file(Path::new("strings.toml")).unwrap();
//! let args = PageArgs::default();
//! let ctx = PageContext::new(&args, &model, &strings).unwrap();
//!
//! let svg = render_page(&ctx).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod bracket;
pub mod color;
pub mod document;
pub mod error;
pub mod layout;
pub mod locale;
pub mod page;
pub mod paper;
pub mod renderer;
pub mod schedule;
pub mod stylesheet;

pub use bracket::{BracketError, BracketModel, Match, Stage};
pub use document::{DocumentAssembler, TournamentCache};
pub use error::ScheduleError;
pub use layout::{LayoutConfig, LayoutError};
pub use locale::{Locale, LocaleError, StringTable};
pub use page::{DocumentArgs, PageArgs, PageContext, PageError, PageKind};
pub use paper::{Orientation, Paper, PaperError};
pub use renderer::{SvgCanvas, SvgConfig};
pub use schedule::Schedule;

use thiserror::Error;
use tracing::debug;

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

use renderer::{compose_page, PosterPainter};

/// Errors that can occur anywhere between loading a schedule and writing a page
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("bracket error: {0}")]
    Bracket(#[from] BracketError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("locale error: {0}")]
    Locale(#[from] LocaleError),

    #[error("paper error: {0}")]
    Paper(#[from] PaperError),

    #[error("page error: {0}")]
    Page(#[from] PageError),

    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct PosterConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Palette for everything that is not a group color
    pub stylesheet: Stylesheet,
}

impl PosterConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

/// Render one page to SVG with default configuration
pub fn render_page(ctx: &PageContext<'_>) -> Result<String, PosterError> {
    render_page_with_config(ctx, &PosterConfig::default())
}

/// Render one page to SVG
///
/// The page is laid out with the canvas's own font metrics, so text sizes the
/// layout reserves match what the painter draws.
pub fn render_page_with_config(
    ctx: &PageContext<'_>,
    config: &PosterConfig,
) -> Result<String, PosterError> {
    let mut canvas = SvgCanvas::new(config.svg.clone(), ctx.frame.page.size());
    let page = compose_page(ctx, &config.layout, &canvas)?;
    debug!(
        tournament = ctx.model.name(),
        strategy = ?page.strategy,
        "composed page"
    );

    PosterPainter::new(&page, ctx, &config.layout, &config.stylesheet).paint(&mut canvas)?;
    Ok(canvas.build())
}
