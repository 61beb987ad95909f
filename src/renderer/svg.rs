//! SVG canvas
//!
//! Coordinates are inches; the root element carries the physical page size
//! so the file prints at scale.

use crate::color::Color;
use crate::layout::{BoundingBox, Point, Size};

use super::canvas::{place_text, Canvas, FontMetrics, HAlign, TextStyle};
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgCanvas {
    config: SvgConfig,
    size: Size,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgCanvas {
    /// Create a canvas for a page of `size` inches
    pub fn new(config: SvgConfig, size: Size) -> Self {
        Self {
            config,
            size,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add a CSS rule to the document's style block
    pub fn add_style(&mut self, css: impl Into<String>) {
        self.styles.push(css.into());
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Fixed precision with trailing zeros dropped
    fn num(&self, value: f64) -> String {
        let text = format!("{:.*}", self.config.precision, value);
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            text
        };
        if text == "-0" {
            "0".to_string()
        } else {
            text
        }
    }

    fn push(&mut self, element: String) {
        let line = format!("{}{}", self.indent_str(), element);
        self.elements.push(line);
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();
        let (w, h) = (self.num(self.size.width), self.num(self.size.height));

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}in" height="{h}in" viewBox="0 0 {w} {h}">"#
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

impl FontMetrics for SvgCanvas {
    fn cap_height(&self, _font: &str, size: f64) -> f64 {
        size * self.config.cap_height_ratio
    }

    fn text_width(&self, _font: &str, size: f64, text: &str) -> f64 {
        text.chars().count() as f64 * size * self.config.glyph_width_ratio
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: BoundingBox, color: Color) {
        let element = format!(
            r#"<rect class="{}fill" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.prefix(),
            self.num(rect.x),
            self.num(rect.y),
            self.num(rect.width),
            self.num(rect.height),
            color.to_hex()
        );
        self.push(element);
    }

    fn fill_rect_translucent(&mut self, rect: BoundingBox, color: Color, opacity: f64) {
        let element = format!(
            r#"<rect class="{}fill" x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            self.prefix(),
            self.num(rect.x),
            self.num(rect.y),
            self.num(rect.width),
            self.num(rect.height),
            color.to_hex(),
            self.num(opacity)
        );
        self.push(element);
    }

    fn stroke_rect(&mut self, rect: BoundingBox, width: f64, color: Color) {
        let element = format!(
            r#"<rect class="{}stroke" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            self.prefix(),
            self.num(rect.x),
            self.num(rect.y),
            self.num(rect.width),
            self.num(rect.height),
            color.to_hex(),
            self.num(width)
        );
        self.push(element);
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let element = format!(
            r#"<line class="{}line" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            self.prefix(),
            self.num(from.x),
            self.num(from.y),
            self.num(to.x),
            self.num(to.y),
            color.to_hex(),
            self.num(width)
        );
        self.push(element);
    }

    fn text(&mut self, rect: BoundingBox, text: &str, style: &TextStyle) -> BoundingBox {
        let placed = place_text(&*self, rect, text, style);
        let anchor = match style.h_align {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        let halo = style
            .halo
            .map(|h| {
                format!(
                    r#" stroke="{}" stroke-width="{}" paint-order="stroke""#,
                    h.color.to_hex(),
                    self.num(h.width * placed.size)
                )
            })
            .unwrap_or_default();

        let element = format!(
            r#"<text class="{}text" x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}"{}>{}</text>"#,
            self.prefix(),
            self.num(placed.anchor.x),
            self.num(placed.anchor.y),
            escape_xml(&style.font),
            self.num(placed.size),
            style.color.to_hex(),
            anchor,
            halo,
            escape_xml(text)
        );
        self.push(element);
        placed.bounds
    }

    /// Add a group element named by a class
    fn begin_group(&mut self, name: &str) {
        let element = format!(r#"<g class="{}{}">"#, self.prefix(), name);
        self.push(element);
        self.indent += 1;
    }

    /// Close a group element
    fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::VAlign;

    fn canvas() -> SvgCanvas {
        SvgCanvas::new(SvgConfig::default(), Size::new(17.0, 11.0))
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_number_formatting() {
        let c = canvas();
        assert_eq!(c.num(1.0), "1");
        assert_eq!(c.num(0.125), "0.125");
        assert_eq!(c.num(2.0 / 3.0), "0.6667");
        assert_eq!(c.num(-0.00001), "0");
    }

    #[test]
    fn test_build_empty_page() {
        let svg = canvas().build();
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"width="17in" height="11in" viewBox="0 0 17 11""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_not_standalone() {
        let svg = SvgCanvas::new(SvgConfig::new().with_standalone(false), Size::new(1.0, 1.0)).build();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_shapes() {
        let mut c = canvas();
        c.fill_rect(BoundingBox::new(0.0, 0.0, 1.0, 2.0), Color::WHITE);
        c.stroke_rect(BoundingBox::new(0.5, 0.5, 1.0, 1.0), 0.02, Color::BLACK);
        c.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 0.01, Color::rgb(128, 128, 128));
        c.fill_rect_translucent(BoundingBox::new(0.0, 0.0, 0.1, 0.1), Color::BLACK, 0.05);
        assert_eq!(c.element_count(), 4);

        let svg = c.build();
        assert!(svg.contains(
            r##"<rect class="tp-fill" x="0" y="0" width="1" height="2" fill="#ffffff"/>"##
        ));
        assert!(svg.contains(r##"fill="none" stroke="#000000" stroke-width="0.02""##));
        assert!(svg.contains(r##"<line class="tp-line" x1="0" y1="0" x2="1" y2="1" stroke="#808080""##));
        assert!(svg.contains(r#"fill-opacity="0.05""#));
    }

    #[test]
    fn test_text_with_halo() {
        let mut c = canvas();
        let style = TextStyle::new("Roboto Condensed", 0.5, Color::WHITE)
            .align(HAlign::Left, VAlign::Middle)
            .with_halo(Color::BLACK, 0.1);
        let bounds = c.text(BoundingBox::new(1.0, 1.0, 4.0, 1.0), "2 & 1", &style);

        assert_eq!(bounds.x, 1.0);
        let svg = c.build();
        assert!(svg.contains(r#"text-anchor="start""#));
        assert!(svg.contains(r#"font-family="Roboto Condensed""#));
        assert!(svg.contains(r#"paint-order="stroke""#));
        assert!(svg.contains(">2 &amp; 1</text>"));
    }

    #[test]
    fn test_groups_indent() {
        let mut c = canvas();
        c.begin_group("calendar");
        c.fill_rect(BoundingBox::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        c.end_group();

        let svg = c.build();
        assert!(svg.contains("  <g class=\"tp-calendar\">\n    <rect"));
        assert!(svg.contains("\n  </g>\n"));
    }
}
