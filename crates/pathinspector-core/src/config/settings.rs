//! Application configuration loaded from a TOML file.
//!
//! Every field has a default, so Path Inspector runs without a config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capacity::GlyphMetrics;
use crate::error::{CoreError, CoreResult};
use crate::fs::MarkerPolicy;

/// Top-level application configuration.
///
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// General browsing preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Show dot-files in the tree and in folder previews.
    #[serde(default)]
    pub show_hidden: bool,
}

/// Preview pane behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// When capped text previews get the `\n...` marker.
    #[serde(default)]
    pub text_marker: MarkerPolicy,
}

/// Layout and font metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Share of the width given to the tree panel.
    #[serde(default = "default_panel_ratio")]
    pub panel_ratio: f64,
    /// Average glyph width in pixels; `0` derives it from the terminal.
    #[serde(default)]
    pub glyph_width_px: u32,
    /// Line height in pixels; `0` derives it from the terminal.
    #[serde(default)]
    pub line_height_px: u32,
}

impl UiConfig {
    /// Configured glyph metrics, if both dimensions are set.
    pub fn glyph_metrics(&self) -> Option<GlyphMetrics> {
        (self.glyph_width_px > 0 && self.line_height_px > 0)
            .then(|| GlyphMetrics::new(self.glyph_width_px, self.line_height_px))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            panel_ratio: default_panel_ratio(),
            glyph_width_px: 0,
            line_height_px: 0,
        }
    }
}

fn default_panel_ratio() -> f64 {
    0.4
}
