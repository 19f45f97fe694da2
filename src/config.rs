//! Generator configuration.
//!
//! A [`GeneratorConfig`] captures everything a run needs: where files go,
//! which sizes to draw, the output format and the color theme. It
//! serializes to camelCase JSON and every field has a default, so a config
//! file only needs to name what it overrides.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "outputDir": "assets/icons",
//!   "sizes": [16, 32, 48, 64, 96, 128],
//!   "format": "png",
//!   "theme": {
//!     "outerDisk": { "r": 255, "g": 140, "b": 0, "a": 255 }
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use reticle_icons::{GeneratorConfig, OutputFormat};
//!
//! let config = GeneratorConfig::from_json(r#"{ "sizes": [24], "format": "svg" }"#).unwrap();
//! assert_eq!(config.sizes, vec![24]);
//! assert_eq!(config.format, OutputFormat::Svg);
//! assert_eq!(config.output_dir.to_str(), Some("assets/icons"));
//! ```

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::OutputFormat;
use crate::error::{Error, Result};
use crate::layout::DEFAULT_SIZES;
use crate::theme::IconTheme;

/// Directory icons are written to unless configured otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "assets/icons";

/// Settings for one generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Directory the icons are written to. Created if missing.
    pub output_dir: PathBuf,

    /// Icon sizes in pixels, generated in this order.
    pub sizes: Vec<u32>,

    /// File format of the written icons.
    pub format: OutputFormat,

    /// Colors the icons are painted with.
    pub theme: IconTheme,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sizes: DEFAULT_SIZES.to_vec(),
            format: OutputFormat::default(),
            theme: IconTheme::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replaces the size list.
    pub fn with_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_theme(mut self, theme: IconTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns the configured sizes, rejecting any zero.
    pub fn validated_sizes(&self) -> Result<Vec<NonZeroU32>> {
        self.sizes
            .iter()
            .map(|&size| NonZeroU32::new(size).ok_or(Error::InvalidSize(size)))
            .collect()
    }

    /// Checks the configuration without running anything.
    pub fn validate(&self) -> Result<()> {
        self.validated_sizes().map(|_| ())
    }

    /// Path of the file written for `size`.
    pub fn output_path(&self, size: u32) -> PathBuf {
        self.output_dir
            .join(format!("icon-{size}.{}", self.format.extension()))
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
