//! Error types for localization

use thiserror::Error;

/// Errors that can occur while resolving locales, strings or timezones
#[derive(Debug, Error)]
pub enum LocaleError {
    /// No text for the key in the locale, its language, or the default language
    #[error("no string for '{key}' in locale '{locale}'")]
    MissingString { key: String, locale: String },

    #[error("invalid locale '{value}'")]
    InvalidLocale { value: String },

    #[error("unknown timezone '{name}'")]
    UnknownTimezone { name: String },

    #[error("failed to read strings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse strings: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LocaleError {
    /// Create a missing string error
    pub fn missing(key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::MissingString {
            key: key.into(),
            locale: locale.into(),
        }
    }
}
