//! High-level pipeline operations.
//!
//! These functions combine the per-step modules into the two entry points
//! callers use: [`prepare`] runs decode → orientation fix → width cap →
//! optional watermark → encode, and [`thumbnail`] derives an exact-width
//! preview from an already prepared buffer. Options are validated up
//! front, so a bad option set fails before any pixel work starts.
//!
//! The thumbnail is cut from the prepared image (after resize and
//! watermark), so the preview shows what the published image actually
//! looks like.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;

use super::calculations::{fit_to_width, thumbnail_dimensions};
use super::codec::{self, CodecError};
use super::orientation;
use super::params::{OptionsError, OutputFormat, PrepareOptions, Quality, WatermarkSpec};
use super::watermark;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("options request a logo watermark but no logo image was supplied")]
    MissingLogo,
}

/// An encoded output buffer plus the dimensions it was encoded at.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Full pipeline: raw bytes in, encoded bytes out.
pub fn prepare(
    raw: &[u8],
    opts: &PrepareOptions,
    logo: Option<&DynamicImage>,
) -> Result<EncodedImage, PipelineError> {
    let img = prepare_image(raw, opts, logo)?;
    encode(&img, opts.format, opts.quality)
}

/// Pipeline minus the final encode: decode, bake EXIF orientation, cap
/// the width, overlay the watermark. Callers that also want a thumbnail
/// reuse the returned buffer instead of running the chain twice.
pub fn prepare_image(
    raw: &[u8],
    opts: &PrepareOptions,
    logo: Option<&DynamicImage>,
) -> Result<DynamicImage, PipelineError> {
    opts.validate()?;
    let img = codec::decode(raw)?;
    let img = orientation::normalize(raw, img);
    let img = cap_width(img, opts.max_width);
    overlay_watermark(img, opts, logo)
}

/// Exact-width preview of a prepared buffer. Unlike the main resize this
/// upscales small sources, so every preview comes out at the same width.
pub fn thumbnail(
    img: &DynamicImage,
    target_width: u32,
    format: OutputFormat,
    quality: Quality,
) -> Result<EncodedImage, PipelineError> {
    if target_width == 0 {
        return Err(OptionsError::ZeroThumbnailWidth.into());
    }
    let (w, h) = thumbnail_dimensions(img.dimensions(), target_width);
    let thumb = img.resize_exact(w, h, FilterType::Lanczos3);
    encode(&thumb, format, quality)
}

/// Encode a prepared buffer, recording its dimensions alongside.
pub fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
) -> Result<EncodedImage, PipelineError> {
    let (width, height) = img.dimensions();
    let bytes = codec::encode(img, format, quality)?;
    Ok(EncodedImage {
        bytes,
        width,
        height,
    })
}

fn cap_width(img: DynamicImage, max_width: u32) -> DynamicImage {
    match fit_to_width(img.dimensions(), max_width) {
        Some((w, h)) => img.resize_exact(w, h, FilterType::Lanczos3),
        None => img,
    }
}

fn overlay_watermark(
    img: DynamicImage,
    opts: &PrepareOptions,
    logo: Option<&DynamicImage>,
) -> Result<DynamicImage, PipelineError> {
    match &opts.watermark {
        None => Ok(img),
        Some(WatermarkSpec::Text {
            text,
            opacity,
            font_size,
            position,
        }) => Ok(watermark::apply_text(
            img, text, *opacity, *font_size, *position,
        )),
        Some(WatermarkSpec::Logo { scale, position }) => {
            let logo = logo.ok_or(PipelineError::MissingLogo)?;
            Ok(watermark::apply_logo(img, logo, *scale, *position))
        }
    }
}
