//! Error types for loading and validating schedules

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Failed to read schedule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse schedule TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A match row whose start time is not RFC 3339
    #[error("match {id}: bad start time '{value}'")]
    BadStartTime { id: u32, value: String },

    /// A required entry is missing from the properties table
    #[error("missing property '{key}'")]
    MissingProperty { key: String },

    /// Two rows share a match id
    #[error("duplicate match id {id}")]
    DuplicateMatch { id: u32 },
}

impl ScheduleError {
    /// Create a missing property error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingProperty { key: key.into() }
    }
}
