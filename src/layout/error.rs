//! Error types for page layout

use thiserror::Error;

fn describe_overflow(x: &Option<f64>, y: &Option<f64>) -> String {
    match (x, y) {
        (Some(x), Some(y)) => format!("{:.3}in horizontally and {:.3}in vertically", x, y),
        (Some(x), None) => format!("{:.3}in horizontally", x),
        (None, Some(y)) => format!("{:.3}in vertically", y),
        (None, None) => "an unknown amount".to_string(),
    }
}

/// Errors that can occur during layout computation
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Content that does not fit the canvas after every fallback strategy
    #[error("content overflows the page by {}", describe_overflow(.x, .y))]
    Overflow { x: Option<f64>, y: Option<f64> },

    /// Layout input that cannot produce a layout at all
    #[error("invalid layout for '{element}': {reason}")]
    InvalidLayout { element: String, reason: String },
}

impl LayoutError {
    /// Create an overflow error; magnitudes are positive shortfalls in inches
    pub fn overflow(x: Option<f64>, y: Option<f64>) -> Self {
        Self::Overflow { x, y }
    }

    /// Create an invalid layout error
    pub fn invalid_layout(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            element: element.into(),
            reason: reason.into(),
        }
    }
}
