//! Configuration for SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "tp-" for "tp-day")
    pub class_prefix: Option<String>,

    /// Cap height as a fraction of font size
    pub cap_height_ratio: f64,

    /// Average glyph advance as a fraction of font size
    pub glyph_width_ratio: f64,

    /// Decimal places kept in coordinates
    pub precision: usize,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("tp-".to_string()),
            cap_height_ratio: 0.7,
            glyph_width_ratio: 0.55,
            precision: 4,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the font metric ratios used to measure text
    pub fn with_font_ratios(mut self, cap_height: f64, glyph_width: f64) -> Self {
        self.cap_height_ratio = cap_height;
        self.glyph_width_ratio = glyph_width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("tp-".to_string()));
        assert_eq!(config.cap_height_ratio, 0.7);
        assert_eq!(config.glyph_width_ratio, 0.55);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-")
            .with_font_ratios(0.65, 0.5);

        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert_eq!(config.cap_height_ratio, 0.65);
        assert_eq!(config.glyph_width_ratio, 0.5);

        let bare = SvgConfig::new().without_class_prefix();
        assert_eq!(bare.class_prefix, None);
    }
}
