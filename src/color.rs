//! RGB colors and the HSV resaturation used to derive group color variants

use std::fmt;

use crate::bracket::BracketError;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `#rgb` or one of the handful of CSS names the poster uses
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Color::rgb(0, 0, 0),
            "white" => Color::rgb(255, 255, 255),
            "grey" | "gray" => Color::rgb(128, 128, 128),
            "lightgrey" | "lightgray" => Color::rgb(211, 211, 211),
            "darkgrey" | "darkgray" => Color::rgb(169, 169, 169),
            "darkslategrey" | "darkslategray" => Color::rgb(47, 79, 79),
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "magenta" => Color::rgb(255, 0, 255),
            _ => return None,
        };
        Some(named)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Hue, saturation and value, each in `0.0..=1.0`
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let v = max;
        if max == min {
            return (0.0, 0.0, v);
        }
        let delta = max - min;
        let s = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        ((h / 6.0).rem_euclid(1.0), s, v)
    }

    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let to_u8 = |x: f64| (x * 255.0).round().clamp(0.0, 255.0) as u8;
        if s == 0.0 {
            return Color::rgb(to_u8(v), to_u8(v), to_u8(v));
        }
        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Color::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    pub fn is_saturated(self) -> bool {
        self.to_hsv().1 > 0.0
    }

    /// Scale and offset saturation and value, clamping both into range
    pub fn resaturate(self, adjust: Resaturate) -> Self {
        let (h, s, v) = self.to_hsv();
        let s = (s * adjust.scale_s + adjust.delta_s).clamp(0.0, 1.0);
        let v = (v * adjust.scale_v + adjust.delta_v).clamp(0.0, 1.0);
        Color::from_hsv(h, s, v)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Saturation/value adjustment applied by [`Color::resaturate`]
#[derive(Debug, Clone, Copy)]
pub struct Resaturate {
    pub scale_s: f64,
    pub delta_s: f64,
    pub scale_v: f64,
    pub delta_v: f64,
}

impl Default for Resaturate {
    fn default() -> Self {
        Self {
            scale_s: 1.0,
            delta_s: 0.0,
            scale_v: 1.0,
            delta_v: 0.0,
        }
    }
}

/// A group's base color plus its darker and lighter variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupColors {
    pub base: Color,
    pub darker: Color,
    pub lighter: Color,
}

impl GroupColors {
    pub fn derive(base: Color) -> Self {
        if base.is_saturated() {
            Self {
                base,
                darker: base.resaturate(Resaturate {
                    delta_s: 0.5,
                    ..Default::default()
                }),
                lighter: base.resaturate(Resaturate {
                    scale_v: 1.5,
                    scale_s: 0.5,
                    ..Default::default()
                }),
            }
        } else {
            Self {
                base,
                darker: base.resaturate(Resaturate {
                    scale_v: 0.75,
                    ..Default::default()
                }),
                lighter: base.resaturate(Resaturate {
                    delta_v: 0.2,
                    ..Default::default()
                }),
            }
        }
    }

    pub fn parse(group: char, s: &str) -> Result<Self, BracketError> {
        Color::parse(s)
            .map(Self::derive)
            .ok_or_else(|| BracketError::BadColor {
                group,
                value: s.to_string(),
            })
    }
}
