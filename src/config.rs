//! Tool configuration module.
//!
//! Handles loading and validating `picpress.toml`. All keys are optional;
//! a missing file means stock defaults. Unknown keys are rejected to
//! catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [transform]
//! max_width = 1200          # Width cap for the main image (never upscales)
//! quality = 85              # JPEG/WebP quality (1-100)
//! format = "jpeg"           # Output format: "jpeg" or "webp"
//!
//! [watermark]
//! text = ""                 # Watermark text; empty disables the overlay
//! position = "bottom-right" # Corner: top-left/top-right/bottom-left/bottom-right
//! opacity = 180             # Text alpha, 0-255
//! # font_size = 32          # Explicit size 1-256; omit to auto-size
//! # logo = "logo.png"       # Logo overlay instead of text (mutually exclusive)
//! logo_scale = 0.18         # Logo width as a fraction of image width
//!
//! [thumbnail]
//! enabled = false           # Also derive a thumb_-prefixed preview
//! width = 300               # Exact thumbnail width
//!
//! [destination]
//! folder = "images/"        # Repo folder; {year}/{month}/{custom} expand
//! custom = ""               # Fills {custom}, slugified
//! repo = ""                 # GitHub repo as "username/repo" (for URLs)
//! branch = "main"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::imaging::{
    MAX_FONT_SIZE, OutputFormat, Position, PrepareOptions, Quality, WatermarkSpec,
};

/// Filename looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "picpress.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `picpress.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PressConfig {
    /// Resize and encode settings for the main image.
    pub transform: TransformConfig,
    /// Text or logo overlay settings.
    pub watermark: WatermarkConfig,
    /// Thumbnail derivation settings.
    pub thumbnail: ThumbnailConfig,
    /// Where prepared files land in the target repository.
    pub destination: DestinationConfig,
}

impl PressConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transform.max_width == 0 {
            return Err(ConfigError::Validation(
                "transform.max_width must be positive".into(),
            ));
        }
        if self.transform.quality == 0 || self.transform.quality > 100 {
            return Err(ConfigError::Validation(
                "transform.quality must be 1-100".into(),
            ));
        }
        if OutputFormat::from_name(&self.transform.format).is_none() {
            return Err(ConfigError::Validation(format!(
                "transform.format must be \"jpeg\" or \"webp\", got \"{}\"",
                self.transform.format
            )));
        }
        if self.thumbnail.width == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.width must be positive".into(),
            ));
        }
        if !self.watermark.text.is_empty() && self.watermark.logo.is_some() {
            return Err(ConfigError::Validation(
                "watermark.text and watermark.logo are mutually exclusive".into(),
            ));
        }
        if let Some(size) = self.watermark.font_size {
            if !(1..=MAX_FONT_SIZE).contains(&size) {
                return Err(ConfigError::Validation(format!(
                    "watermark.font_size must be 1-{MAX_FONT_SIZE}, got {size}"
                )));
            }
        }
        if !(self.watermark.logo_scale > 0.0 && self.watermark.logo_scale <= 1.0) {
            return Err(ConfigError::Validation(
                "watermark.logo_scale must be within (0, 1]".into(),
            ));
        }
        if self.destination.folder.contains("{custom}") && self.destination.custom.is_empty() {
            return Err(ConfigError::Validation(
                "destination.folder uses {custom} but destination.custom is empty".into(),
            ));
        }
        if !self.destination.repo.is_empty() && !self.destination.repo.contains('/') {
            return Err(ConfigError::Validation(
                "destination.repo must look like \"username/repo\"".into(),
            ));
        }
        Ok(())
    }

    /// Build the per-invocation pipeline options from this config.
    pub fn to_options(&self) -> Result<PrepareOptions, ConfigError> {
        let quality = Quality::new(self.transform.quality)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        let format = OutputFormat::from_name(&self.transform.format).ok_or_else(|| {
            ConfigError::Validation(format!(
                "transform.format must be \"jpeg\" or \"webp\", got \"{}\"",
                self.transform.format
            ))
        })?;

        let position = Position::parse_lenient(&self.watermark.position);
        let watermark = if self.watermark.logo.is_some() {
            Some(WatermarkSpec::Logo {
                scale: self.watermark.logo_scale,
                position,
            })
        } else if !self.watermark.text.is_empty() {
            Some(WatermarkSpec::Text {
                text: self.watermark.text.clone(),
                opacity: self.watermark.opacity,
                font_size: self.watermark.font_size,
                position,
            })
        } else {
            None
        };

        Ok(PrepareOptions {
            max_width: self.transform.max_width,
            quality,
            format,
            watermark,
            thumbnail_width: self.thumbnail.enabled.then_some(self.thumbnail.width),
        })
    }
}

/// Resize and encode settings for the main image.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Width cap in pixels; images at or under it pass through unresized.
    pub max_width: u32,
    /// Encoding quality (1 = worst, 100 = best).
    pub quality: u8,
    /// Output format name: `"jpeg"` or `"webp"`.
    pub format: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            quality: 85,
            format: "jpeg".to_string(),
        }
    }
}

/// Text or logo overlay settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkConfig {
    /// Watermark text. Empty string disables the text overlay.
    pub text: String,
    /// Corner name; unknown names fall back to bottom-right.
    pub position: String,
    /// Text alpha, 0 (invisible) to 255 (solid).
    pub opacity: u8,
    /// Explicit font pixel size, 1-256. Omit to derive `max(20, width / 40)`.
    pub font_size: Option<u32>,
    /// Path to a logo image used as the overlay instead of text.
    pub logo: Option<String>,
    /// Logo width as a fraction of the base image width.
    pub logo_scale: f64,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: "bottom-right".to_string(),
            opacity: 180,
            font_size: None,
            logo: None,
            logo_scale: 0.18,
        }
    }
}

/// Thumbnail derivation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailConfig {
    /// Whether to also derive a `thumb_`-prefixed preview per image.
    pub enabled: bool,
    /// Exact width of the preview (upscales small sources).
    pub width: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 300,
        }
    }
}

/// Where prepared files land in the target repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DestinationConfig {
    /// Repo folder template. `{year}`, `{month}` and `{custom}` expand at
    /// run time; the month is unpadded (`8`, not `08`).
    pub folder: String,
    /// Value for the `{custom}` placeholder, slugified before use.
    pub custom: String,
    /// Target repository as `username/repo`. Needed to derive raw/CDN
    /// URLs; may stay empty for purely local staging checks.
    pub repo: String,
    /// Branch the staged tree is meant to be pushed to.
    pub branch: String,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            folder: "images/".to_string(),
            custom: String::new(),
            repo: String::new(),
            branch: "main".to_string(),
        }
    }
}

impl DestinationConfig {
    /// The repo slug, or a validation error when it was never set.
    pub fn require_repo(&self) -> Result<&str, ConfigError> {
        if self.repo.is_empty() {
            return Err(ConfigError::Validation(
                "destination.repo is not set (expected \"username/repo\")".into(),
            ));
        }
        Ok(&self.repo)
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load configuration from an explicit file, or from `picpress.toml` in
/// the working directory, or fall back to stock defaults.
///
/// An explicit `--config` path must exist; the implicit default file is
/// optional.
pub fn load_config(path: Option<&Path>) -> Result<PressConfig, ConfigError> {
    let content = match path {
        Some(p) => Some(fs::read_to_string(p)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                Some(fs::read_to_string(default)?)
            } else {
                None
            }
        }
    };
    let config = match content {
        Some(text) => toml::from_str::<PressConfig>(&text)?,
        None => PressConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `picpress.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# picpress configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Main image transform
# ---------------------------------------------------------------------------
[transform]
# Width cap in pixels. Wider images are scaled down (aspect preserved);
# narrower images pass through untouched.
max_width = 1200

# Encoding quality (1 = worst, 100 = best).
quality = 85

# Output format: "jpeg" or "webp".
format = "jpeg"

# ---------------------------------------------------------------------------
# Watermark
# ---------------------------------------------------------------------------
[watermark]
# Text drawn in white over each image. Empty disables the overlay.
# text = "© MyBrand"
text = ""

# Corner: top-left, top-right, bottom-left, bottom-right.
# Anything else falls back to bottom-right.
position = "bottom-right"

# Text alpha, 0-255.
opacity = 180

# Explicit font pixel size, 1-256. Omit to derive max(20, width / 40).
# font_size = 32

# Logo overlay instead of text (the two are mutually exclusive).
# logo = "logo.png"

# Logo width as a fraction of the image width.
logo_scale = 0.18

# ---------------------------------------------------------------------------
# Thumbnail
# ---------------------------------------------------------------------------
[thumbnail]
# Also derive a thumb_-prefixed preview per image.
enabled = false

# Exact preview width. Small sources are upscaled to match.
width = 300

# ---------------------------------------------------------------------------
# Destination
# ---------------------------------------------------------------------------
[destination]
# Repo folder. {year}, {month} and {custom} expand at run time; the month
# is unpadded (8, not 08). Examples:
#   folder = "images/"
#   folder = "images/{year}/{month}/"
#   folder = "images/{custom}/"
folder = "images/"

# Value for the {custom} placeholder, slugified before use.
custom = ""

# Target repository as "username/repo". Needed to derive raw/CDN URLs.
# repo = "username/repo"

# Branch the staged tree is meant to be pushed to.
branch = "main"
"##
}
