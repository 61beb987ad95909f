//! Page layout
//!
//! Turns a [`BracketModel`](crate::bracket::BracketModel) into positioned
//! blocks: group grids, the calendar, the bracket and the final card, composed
//! onto a canvas by [`PageComposer`].

pub mod bracket;
pub mod calendar;
pub mod composer;
pub mod config;
pub mod display;
pub mod error;
pub mod groups;
pub mod types;

pub use bracket::{BracketCell, BracketGridLayout, BracketOptions, Side, StageCaption};
pub use calendar::{
    coalesce, info_height, CalendarGridLayout, CalendarOptions, DayCell, DayTier, MatchSlot,
};
pub use composer::{ComposedPage, PageComposer, Strategy};
pub use config::LayoutConfig;
pub use display::{all_group_matches_cross_midnight, format_time, DisplayMatch, DisplaySchedule};
pub use error::LayoutError;
pub use groups::{GapMode, GridShape, GroupGridLayout};
pub use types::{BoundingBox, Point, Size};
