//! Drawing surface the poster painter targets
//!
//! A [`Canvas`] fills and strokes rectangles, draws lines and sets single
//! lines of text inside a rectangle. Text is positioned by cap height, so a
//! middle-justified label sits visually centered in its box whatever the
//! font's descenders.

use crate::color::Color;
use crate::layout::{BoundingBox, Point};

/// Horizontal justification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical justification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// An outline drawn around glyphs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub color: Color,
    /// Outline width as a fraction of the font size
    pub width: f64,
}

/// How a line of text is set
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name
    pub font: String,
    /// Font size in inches
    pub size: f64,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Shrink the font until the text fits the rectangle's width
    pub shrink_to_fit: bool,
    pub halo: Option<Halo>,
    /// Inset from the rectangle edge the text is justified against
    pub margin: f64,
}

impl TextStyle {
    pub fn new(font: impl Into<String>, size: f64, color: Color) -> Self {
        Self {
            font: font.into(),
            size,
            color,
            h_align: HAlign::Center,
            v_align: VAlign::Middle,
            shrink_to_fit: false,
            halo: None,
            margin: 0.0,
        }
    }

    pub fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn h_align(mut self, h_align: HAlign) -> Self {
        self.h_align = h_align;
        self
    }

    pub fn shrink_to_fit(mut self) -> Self {
        self.shrink_to_fit = true;
        self
    }

    pub fn with_halo(mut self, color: Color, width: f64) -> Self {
        self.halo = Some(Halo { color, width });
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Font measurements
pub trait FontMetrics {
    /// Height of capital letters set in `font` at `size`
    fn cap_height(&self, font: &str, size: f64) -> f64;

    /// Advance width of `text` set in `font` at `size`
    fn text_width(&self, font: &str, size: f64, text: &str) -> f64;
}

/// Where a line of text lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Font size after any shrinking
    pub size: f64,
    /// Point on the baseline at the anchor
    pub anchor: Point,
    /// Box spanning the text's width and cap height
    pub bounds: BoundingBox,
}

/// Position `text` inside `rect` according to `style`
pub fn place_text(
    metrics: &(impl FontMetrics + ?Sized),
    rect: BoundingBox,
    text: &str,
    style: &TextStyle,
) -> TextPlacement {
    let mut size = style.size;
    let mut width = metrics.text_width(&style.font, size, text);
    let available = rect.width - 2.0 * style.margin;
    if style.shrink_to_fit && width > available && width > 0.0 {
        size *= available.max(0.0) / width;
        width = metrics.text_width(&style.font, size, text);
    }
    let cap = metrics.cap_height(&style.font, size);

    let (left, anchor_x) = match style.h_align {
        HAlign::Left => (rect.x + style.margin, rect.x + style.margin),
        HAlign::Center => {
            let center = rect.x + rect.width / 2.0;
            (center - width / 2.0, center)
        }
        HAlign::Right => {
            let right = rect.right() - style.margin;
            (right - width, right)
        }
    };

    let baseline = match style.v_align {
        VAlign::Top => rect.y + style.margin + cap,
        VAlign::Middle => rect.y + (rect.height + cap) / 2.0,
        VAlign::Bottom => rect.bottom() - style.margin,
    };

    TextPlacement {
        size,
        anchor: Point::new(anchor_x, baseline),
        bounds: BoundingBox::new(left, baseline - cap, width, cap),
    }
}

/// A surface the poster is drawn on
pub trait Canvas: FontMetrics {
    fn fill_rect(&mut self, rect: BoundingBox, color: Color);

    /// Fill with partial coverage, `opacity` in `0.0..=1.0`
    fn fill_rect_translucent(&mut self, rect: BoundingBox, color: Color, opacity: f64);

    /// Stroke centered on the rectangle's edges
    fn stroke_rect(&mut self, rect: BoundingBox, width: f64, color: Color);

    fn line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Draw one line of text and return the box it occupies
    fn text(&mut self, rect: BoundingBox, text: &str, style: &TextStyle) -> BoundingBox;

    /// Open a named group of drawing operations
    fn begin_group(&mut self, _name: &str) {}

    fn end_group(&mut self) {}

    /// Stroke a rectangle over a fill
    fn fill_and_stroke_rect(&mut self, rect: BoundingBox, width: f64, stroke: Color, fill: Color) {
        self.fill_rect(rect, fill);
        self.stroke_rect(rect, width, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every glyph is half an em wide, caps are 0.7 em
    struct Fixed;

    impl FontMetrics for Fixed {
        fn cap_height(&self, _font: &str, size: f64) -> f64 {
            size * 0.7
        }

        fn text_width(&self, _font: &str, size: f64, text: &str) -> f64 {
            text.chars().count() as f64 * size * 0.5
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_place_centered() {
        let rect = BoundingBox::new(0.0, 0.0, 4.0, 1.0);
        let style = TextStyle::new("Oswald", 1.0, Color::BLACK);
        let placed = place_text(&Fixed, rect, "ab", &style);

        assert_eq!(placed.size, 1.0);
        assert!(close(placed.anchor.x, 2.0));
        assert!(close(placed.anchor.y, 0.85));
        assert!(close(placed.bounds.x, 1.5));
        assert!(close(placed.bounds.y, 0.15));
        assert!(close(placed.bounds.height, 0.7));
    }

    #[test]
    fn test_place_right_bottom_with_margin() {
        let rect = BoundingBox::new(1.0, 1.0, 4.0, 2.0);
        let style = TextStyle::new("Oswald", 1.0, Color::BLACK)
            .align(HAlign::Right, VAlign::Bottom)
            .with_margin(0.25);
        let placed = place_text(&Fixed, rect, "abc", &style);

        assert!(close(placed.anchor.x, 4.75));
        assert!(close(placed.anchor.y, 2.75));
        assert!(close(placed.bounds.x, 3.25));
    }

    #[test]
    fn test_shrink_to_fit() {
        let rect = BoundingBox::new(0.0, 0.0, 2.0, 1.0);
        let style = TextStyle::new("Oswald", 1.0, Color::BLACK)
            .h_align(HAlign::Left)
            .shrink_to_fit();
        let placed = place_text(&Fixed, rect, "abcdefgh", &style);

        assert!(close(placed.size, 0.5));
        assert!(close(placed.bounds.width, 2.0));
        assert!(close(placed.bounds.x, 0.0));
    }

    #[test]
    fn test_no_shrink_when_it_fits() {
        let rect = BoundingBox::new(0.0, 0.0, 10.0, 1.0);
        let style = TextStyle::new("Oswald", 1.0, Color::BLACK).shrink_to_fit();
        assert_eq!(place_text(&Fixed, rect, "abc", &style).size, 1.0);
    }
}
