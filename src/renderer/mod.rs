//! Poster rendering
//!
//! The painter in [`poster`] draws a composed page onto any [`Canvas`];
//! [`SvgCanvas`] is the implementation that writes SVG.

pub mod canvas;
pub mod config;
pub mod poster;
pub mod svg;

pub use canvas::{place_text, Canvas, FontMetrics, HAlign, Halo, TextPlacement, TextStyle, VAlign};
pub use config::SvgConfig;
pub use poster::{canvas_rect, compose_page, PosterPainter};
pub use svg::SvgCanvas;
