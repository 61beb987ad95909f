//! Poster palette
//!
//! Named color tokens for everything on the poster that is not a group
//! color: ink, paper, captions, crop marks and the tints of elimination cell
//! borders. A stylesheet file overrides any subset of the built-in palette.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::bracket::Stage;
use crate::color::Color;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("color '{token}' has unreadable value '{value}'")]
    BadColor { token: String, value: String },
}

/// A palette of named poster colors
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Color token -> color
    pub colors: BTreeMap<String, Color>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Built-in palette: black ink on white, greys stepping lighter toward the final
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"

[colors]
ink = "#000000"
paper = "#ffffff"
text-light = "#ffffff"

# group standings
team-name = "#2f4f4f"
tally-dot = "#000000"

# stage headings above the calendar and bracket
caption = "#d3d3d3"
caption-rule = "#000000"

# score digits are white with a dark outline
score = "#ffffff"
score-halo = "#000000"

crop-marks = "#808080"

# elimination cell borders, darkslategrey to lightgrey in even steps
stage-round32 = "#585858"
stage-round16 = "#585858"
stage-quarters = "#818181"
stage-semis = "#aaaaaa"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        let colors = parsed
            .colors
            .into_iter()
            .map(|(token, value)| match Color::parse(&value) {
                Some(color) => Ok((token, color)),
                None => Err(StylesheetError::BadColor { token, value }),
            })
            .collect::<Result<_, _>>()?;

        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors,
        })
    }

    /// Load overrides from a file on top of the default palette
    pub fn with_overrides(path: &Path) -> Result<Self, StylesheetError> {
        let overrides = Self::from_file(path)?;
        let mut stylesheet = Self::default();
        stylesheet.name = overrides.name.or(stylesheet.name);
        stylesheet.colors.extend(overrides.colors);
        Ok(stylesheet)
    }

    /// Resolve a color token
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<Color> {
        self.colors.get(token).copied()
    }

    /// Resolve a color token, falling back to the default palette and then ink
    pub fn color(&self, token: &str) -> Color {
        self.resolve(token)
            .or_else(|| Self::default().resolve(token))
            .unwrap_or(Color::BLACK)
    }

    /// Border tint for elimination cells of `stage`, if that stage has one
    pub fn stage_border(&self, stage: Stage) -> Option<Color> {
        self.resolve(&format!("stage-{}", stage.key()))
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
