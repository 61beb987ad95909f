//! Paper sizes, best-fit selection and trim frames
//!
//! Sizes are stored portrait (short side first) in inches. Names are either
//! entries of the built-in table (`a1`, `tabloid`, `24x36`) or a free-form
//! `<width>x<height>` in inches.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::layout::{BoundingBox, Point, Size};
use crate::locale::Locale;

const POINTS_PER_INCH: f64 = 72.0;

/// Named formats in points, portrait
const FORMATS: &[(&str, f64, f64)] = &[
    ("a0", 2383.94, 3370.39),
    ("a1", 1683.78, 2383.94),
    ("a2", 1190.55, 1683.78),
    ("a3", 841.89, 1190.55),
    ("a4", 595.28, 841.89),
    ("a5", 419.53, 595.28),
    ("a6", 297.64, 419.53),
    ("a7", 209.76, 297.64),
    ("a8", 147.40, 209.76),
    ("a9", 104.88, 147.40),
    ("a10", 73.70, 104.88),
    ("b0", 2834.65, 4008.19),
    ("b1", 2004.09, 2834.65),
    ("b2", 1417.32, 2004.09),
    ("b3", 1000.63, 1417.32),
    ("b4", 708.66, 1000.63),
    ("b5", 498.90, 708.66),
    ("b6", 354.33, 498.90),
    ("b7", 249.45, 354.33),
    ("b8", 175.75, 249.45),
    ("b9", 124.72, 175.75),
    ("b10", 87.87, 124.72),
    ("c0", 2599.37, 3676.54),
    ("c1", 1836.85, 2599.37),
    ("c2", 1298.27, 1836.85),
    ("c3", 918.43, 1298.27),
    ("c4", 649.13, 918.43),
    ("c5", 459.21, 649.13),
    ("c6", 323.15, 459.21),
    ("c7", 229.61, 323.15),
    ("c8", 161.57, 229.61),
    ("c9", 113.39, 161.57),
    ("c10", 79.37, 113.39),
    ("letter", 612.00, 792.00),
    ("legal", 612.00, 1008.00),
    ("tabloid", 792.00, 1224.00),
];

/// Candidates for best fit on ISO paper
const ISO_CANDIDATES: &[&str] = &[
    "a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10", "b0", "b1", "b2", "b3",
    "b4", "b5", "b6", "b7", "b8", "b9", "b10", "c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7",
    "c8", "c9", "c10",
];

/// Poster sizes offered by US print shops
const US_CANDIDATES: &[&str] = &["12x18", "16x20", "18x24", "22x28", "24x36", "36x48", "40x60"];

/// Smallest content area, in inches, that fits a calendar+bracket poster
const MINIMUM_BY_TEAMS: &[(usize, f64, f64)] = &[
    (16, 14.035, 19.844),
    (24, 18.068, 25.750),
    (32, 18.068, 25.750),
    (48, 22.665, 29.969),
];

static INCH_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)?)x([0-9]+(?:\.[0-9]+)?)$").expect("valid regex")
});

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaperError {
    #[error("unknown paper format '{name}'")]
    UnknownFormat { name: String },

    #[error("unknown orientation '{name}' (expected landscape or portrait)")]
    UnknownOrientation { name: String },

    #[error("no paper size fits {teams} teams")]
    NoBestFit { teams: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn parse(s: &str) -> Result<Self, PaperError> {
        match s.to_ascii_lowercase().as_str() {
            "landscape" | "l" => Ok(Orientation::Landscape),
            "portrait" | "p" => Ok(Orientation::Portrait),
            _ => Err(PaperError::UnknownOrientation {
                name: s.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }
}

/// A named paper size
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    name: String,
    /// Portrait size in inches
    size: Size,
}

impl Paper {
    /// Look up a table format or parse `<w>x<h>` inches
    pub fn parse(name: &str) -> Result<Self, PaperError> {
        let lower = name.trim().to_ascii_lowercase();
        if let Some((_, w, h)) = FORMATS.iter().find(|(n, _, _)| *n == lower) {
            return Ok(Self {
                name: lower,
                size: Size::new(w / POINTS_PER_INCH, h / POINTS_PER_INCH),
            });
        }

        let caps = INCH_SIZE
            .captures(&lower)
            .ok_or_else(|| PaperError::UnknownFormat {
                name: name.to_string(),
            })?;
        let a: f64 = caps[1].parse().map_err(|_| PaperError::UnknownFormat {
            name: name.to_string(),
        })?;
        let b: f64 = caps[2].parse().map_err(|_| PaperError::UnknownFormat {
            name: name.to_string(),
        })?;
        if a <= 0.0 || b <= 0.0 {
            return Err(PaperError::UnknownFormat {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: lower,
            size: Size::new(a.min(b), a.max(b)),
        })
    }

    /// Least wasted format at least as large as the minimum for `teams`
    ///
    /// Team counts without a measured minimum use the next larger one.
    pub fn best_fit(teams: usize, locale: &Locale) -> Result<Self, PaperError> {
        let (_, min_w, min_h) = MINIMUM_BY_TEAMS
            .iter()
            .find(|(count, _, _)| *count >= teams)
            .ok_or(PaperError::NoBestFit { teams })?;
        let min_area = min_w * min_h;

        let candidates = if locale.uses_us_paper() {
            US_CANDIDATES
        } else {
            ISO_CANDIDATES
        };

        let mut best: Option<(f64, Paper)> = None;
        for name in candidates {
            let paper = Paper::parse(name)?;
            if paper.size.width < *min_w || paper.size.height < *min_h {
                continue;
            }
            let wasted = paper.size.width * paper.size.height - min_area;
            if best.as_ref().map_or(true, |(w, _)| wasted < *w) {
                best = Some((wasted, paper));
            }
        }

        let (_, paper) = best.ok_or(PaperError::NoBestFit { teams })?;
        info!(teams, locale = %locale.tag(), paper = %paper.name, "best fit paper");
        Ok(paper)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Portrait size in inches
    pub fn portrait(&self) -> Size {
        self.size
    }

    pub fn oriented(&self, orientation: Orientation) -> Size {
        match orientation {
            Orientation::Portrait => self.size,
            Orientation::Landscape => Size::new(self.size.height, self.size.width),
        }
    }
}

/// A line segment in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
        }
    }
}

/// The sheet, the trimmed area inside it and the crop mark band
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    /// Whole sheet
    pub page: BoundingBox,
    /// Area left after trimming; equals `page` without a crop size
    pub inside: BoundingBox,
    /// `inside` grown by the crop mark gap; marks run from here to the sheet edge
    pub crop_marks: BoundingBox,
}

impl PageFrame {
    pub fn new(paper: &Paper, orientation: Orientation, crop: Option<&Paper>) -> Self {
        let page = paper.oriented(orientation).at(Point::new(0.0, 0.0));
        let Some(crop) = crop else {
            return Self {
                page,
                inside: page,
                crop_marks: page,
            };
        };

        let trim = crop.oriented(orientation);
        let width = page.width.min(trim.width);
        let height = page.height.min(trim.height);
        let edge_x = (page.width - width) / 2.0;
        let edge_y = (page.height - height) / 2.0;
        let mark_gap = (edge_x / 2.0).min(edge_y / 2.0);

        let inside = page.stretch(edge_x, edge_y, -edge_x, -edge_y);
        Self {
            page,
            inside,
            crop_marks: inside.outset(mark_gap),
        }
    }

    pub fn is_cropped(&self) -> bool {
        self.inside != self.page
    }

    /// Eight trim guides, two per edge, running from the sheet edge to the mark band
    pub fn mark_segments(&self) -> Vec<Segment> {
        if !self.is_cropped() {
            return Vec::new();
        }
        let (p, i, m) = (&self.page, &self.inside, &self.crop_marks);
        vec![
            Segment::new(p.x, i.y, m.x, i.y),
            Segment::new(m.right(), i.y, p.right(), i.y),
            Segment::new(p.x, i.bottom(), m.x, i.bottom()),
            Segment::new(m.right(), i.bottom(), p.right(), i.bottom()),
            Segment::new(i.x, p.y, i.x, m.y),
            Segment::new(i.x, m.bottom(), i.x, p.bottom()),
            Segment::new(i.right(), p.y, i.right(), m.y),
            Segment::new(i.right(), m.bottom(), i.right(), p.bottom()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_parse_table_format() {
        let a4 = Paper::parse("A4").unwrap();
        assert_eq!(a4.name(), "a4");
        assert!(close(a4.portrait().width, 595.28 / 72.0));
        assert!(close(a4.portrait().height, 841.89 / 72.0));
    }

    #[test]
    fn test_parse_inch_format_is_portrait() {
        let p = Paper::parse("36x24").unwrap();
        assert_eq!(p.portrait(), Size::new(24.0, 36.0));
        assert_eq!(p.oriented(Orientation::Landscape), Size::new(36.0, 24.0));
    }

    #[test]
    fn test_parse_unknown_format() {
        let err = Paper::parse("napkin").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"unknown paper format 'napkin'");
    }

    #[test]
    fn test_best_fit_us() {
        let locale = Locale::parse("en_US").unwrap();
        assert_eq!(Paper::best_fit(48, &locale).unwrap().name(), "24x36");
        assert_eq!(Paper::best_fit(16, &locale).unwrap().name(), "16x20");
        assert_eq!(Paper::best_fit(32, &locale).unwrap().name(), "22x28");
    }

    #[test]
    fn test_best_fit_iso() {
        let locale = Locale::parse("nl").unwrap();
        assert_eq!(Paper::best_fit(48, &locale).unwrap().name(), "a1");
        assert_eq!(Paper::best_fit(16, &locale).unwrap().name(), "a2");
    }

    #[test]
    fn test_best_fit_too_many_teams() {
        let locale = Locale::parse("en_US").unwrap();
        assert_eq!(
            Paper::best_fit(64, &locale),
            Err(PaperError::NoBestFit { teams: 64 })
        );
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!(Orientation::parse("Portrait").unwrap(), Orientation::Portrait);
        assert!(Orientation::parse("sideways").is_err());
    }

    #[test]
    fn test_frame_without_crop() {
        let frame = PageFrame::new(&Paper::parse("tabloid").unwrap(), Orientation::Landscape, None);
        assert_eq!(frame.page, BoundingBox::new(0.0, 0.0, 17.0, 11.0));
        assert!(!frame.is_cropped());
        assert!(frame.mark_segments().is_empty());
    }

    #[test]
    fn test_frame_with_crop() {
        let paper = Paper::parse("24x36").unwrap();
        let crop = Paper::parse("22x34").unwrap();
        let frame = PageFrame::new(&paper, Orientation::Portrait, Some(&crop));

        assert_eq!(frame.inside, BoundingBox::new(1.0, 1.0, 22.0, 34.0));
        assert_eq!(frame.crop_marks, BoundingBox::new(0.5, 0.5, 23.0, 35.0));

        let marks = frame.mark_segments();
        assert_eq!(marks.len(), 8);
        assert_eq!(marks[0], Segment::new(0.0, 1.0, 0.5, 1.0));
        assert_eq!(marks[7], Segment::new(23.0, 35.5, 23.0, 36.0));
    }
}
