//! Parameter types for the preparation pipeline.
//!
//! These types describe *what* to do to an image, not *how*. They are built
//! once per invocation (from config or by a library caller) and validated at
//! construction time: out-of-range values are a precondition error, never
//! silently adjusted, so a bad configuration fails before any pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality, 1-100. Constructor rejects 0 and >100.
//! - [`OutputFormat`]: JPEG (alpha discarded) or WebP (alpha preserved).
//! - [`Position`]: four-corner watermark placement; unknown names fall back
//!   to bottom-right.
//! - [`WatermarkSpec`]: text or logo overlay, at most one per invocation.
//!   Explicit text sizes accept 1-[`MAX_FONT_SIZE`].
//! - [`PrepareOptions`]: the full per-invocation option set with a
//!   [`validate`](PrepareOptions::validate) precondition check.

use thiserror::Error;

/// Upper bound for an explicit watermark font size (a 32x blowup of the
/// 8px bitmap glyphs). Auto-derived sizes (`font_size: None`) scale with
/// the image width instead and are not subject to this bound.
pub const MAX_FONT_SIZE: u32 = 256;

/// Rejected option values. Raised at construction/validation, before any
/// decode or transform runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("quality must be between 1 and 100, got {0}")]
    QualityOutOfRange(u8),
    #[error("max_width must be positive")]
    ZeroMaxWidth,
    #[error("thumbnail width must be positive")]
    ZeroThumbnailWidth,
    #[error("watermark text must not be empty")]
    EmptyWatermarkText,
    #[error("watermark font size must be 1-{max}, got {0}", max = MAX_FONT_SIZE)]
    FontSizeOutOfRange(u32),
    #[error("logo scale must be within (0, 1], got {0}")]
    LogoScaleOutOfRange(f64),
}

/// Quality setting for lossy image encoding (1-100).
///
/// The inner value is private: a constructed `Quality` is always in range,
/// so encoders take it without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Result<Self, OptionsError> {
        if value == 0 || value > 100 {
            return Err(OptionsError::QualityOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Three-channel JPEG; any alpha is discarded at encode time.
    #[default]
    Jpeg,
    /// Lossy WebP; alpha is preserved if present.
    Webp,
}

impl OutputFormat {
    /// Filename extension for staged output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }

    /// Parse a config-file format name. Accepts the common JPEG spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }
}

/// Watermark corner placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Position {
    /// Parse a position name, falling back to bottom-right for anything
    /// unrecognized (including case variants; names are exact).
    pub fn parse_lenient(name: &str) -> Self {
        match name {
            "top-left" => Position::TopLeft,
            "top-right" => Position::TopRight,
            "bottom-left" => Position::BottomLeft,
            "bottom-right" => Position::BottomRight,
            _ => Position::BottomRight,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
        }
    }
}

/// Watermark overlay: either text rendered with the built-in font, or a
/// caller-supplied logo image. The logo buffer itself travels separately
/// (it is caller-owned and read-only to the pipeline).
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkSpec {
    Text {
        text: String,
        /// Alpha for the white text, 0 (invisible) to 255 (solid).
        opacity: u8,
        /// Explicit pixel size; `None` derives `max(20, width / 40)`.
        font_size: Option<u32>,
        position: Position,
    },
    Logo {
        /// Logo width as a fraction of the base width, in (0, 1].
        scale: f64,
        position: Position,
    },
}

/// Full option set for one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOptions {
    /// Width cap for the main image; never upscales.
    pub max_width: u32,
    pub quality: Quality,
    pub format: OutputFormat,
    pub watermark: Option<WatermarkSpec>,
    /// `Some(w)` additionally derives a thumbnail at exactly `w` wide.
    pub thumbnail_width: Option<u32>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            max_width: 1200,
            quality: Quality::default(),
            format: OutputFormat::default(),
            watermark: None,
            thumbnail_width: None,
        }
    }
}

impl PrepareOptions {
    /// Precondition check run before any pixel work.
    ///
    /// `Quality` is already valid by construction; everything reachable
    /// through public fields is checked here.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_width == 0 {
            return Err(OptionsError::ZeroMaxWidth);
        }
        if self.thumbnail_width == Some(0) {
            return Err(OptionsError::ZeroThumbnailWidth);
        }
        match &self.watermark {
            Some(WatermarkSpec::Text {
                text, font_size, ..
            }) => {
                if text.is_empty() {
                    return Err(OptionsError::EmptyWatermarkText);
                }
                if let Some(size) = *font_size {
                    if !(1..=MAX_FONT_SIZE).contains(&size) {
                        return Err(OptionsError::FontSizeOutOfRange(size));
                    }
                }
            }
            Some(WatermarkSpec::Logo { scale, .. }) => {
                if !(*scale > 0.0 && *scale <= 1.0) {
                    return Err(OptionsError::LogoScaleOutOfRange(*scale));
                }
            }
            None => {}
        }
        Ok(())
    }
}
