//! Decode and encode, in memory.
//!
//! The pipeline never hands an open file to the image libraries: process
//! code reads bytes, these functions turn bytes into [`DynamicImage`] and
//! back. JPEG goes through the `image` crate's encoder; WebP goes through
//! libwebp (the `webp` crate) because the `image` crate only writes
//! lossless WebP and the pipeline wants lossy output at a caller-chosen
//! quality.
//!
//! JPEG output is always three-channel: any alpha is dropped by the RGB
//! conversion before encoding. WebP keeps alpha.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use thiserror::Error;

use super::params::{OutputFormat, Quality};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("unreadable or unsupported image data: {0}")]
    Decode(#[source] image::ImageError),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[source] image::ImageError),
}

/// Decode raw file bytes into pixels. The format is sniffed from the
/// bytes themselves; the filename extension is never consulted.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CodecError> {
    image::load_from_memory(bytes).map_err(CodecError::Decode)
}

/// Gate check: true only when the bytes decode fully. A correct header
/// followed by truncated pixel data is invalid.
pub fn is_valid_image(bytes: &[u8]) -> bool {
    decode(bytes).is_ok()
}

/// Encode as baseline JPEG at the given quality, converting to RGB first.
pub fn encode_jpeg(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
    let rgb = img.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality.value());
    encoder.encode_image(&rgb).map_err(CodecError::Jpeg)?;
    Ok(out.into_inner())
}

/// Encode as lossy WebP at the given quality. Alpha is preserved.
pub fn encode_webp(img: &DynamicImage, quality: Quality) -> Vec<u8> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let encoder = webp::Encoder::from_rgba(&rgba, width, height);
    encoder.encode(quality.value() as f32).to_vec()
}

/// Encode in the requested output format.
pub fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, CodecError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(img, quality),
        OutputFormat::Webp => Ok(encode_webp(img, quality)),
    }
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use super::*;
    use crate::test_helpers::{jpeg_bytes, png_rgba_bytes};

    #[test]
    fn decode_reads_jpeg_and_png() {
        assert_eq!(decode(&jpeg_bytes(40, 30)).unwrap().dimensions(), (40, 30));
        assert_eq!(
            decode(&png_rgba_bytes(20, 10)).unwrap().dimensions(),
            (20, 10)
        );
    }

    #[test]
    fn decode_rejects_non_image_bytes() {
        assert!(decode(b"plain text, not pixels").is_err());
    }

    #[test]
    fn valid_image_gate() {
        assert!(is_valid_image(&jpeg_bytes(16, 16)));
        assert!(is_valid_image(&png_rgba_bytes(16, 16)));
        assert!(!is_valid_image(&[]));
        assert!(!is_valid_image(b"GIF89a but not really"));
    }

    #[test]
    fn truncated_file_is_invalid() {
        // valid magic number, missing pixel data
        let bytes = jpeg_bytes(64, 64);
        assert!(!is_valid_image(&bytes[..20]));
    }

    #[test]
    fn jpeg_round_trips_dimensions() {
        let img = decode(&png_rgba_bytes(33, 21)).unwrap();
        let encoded = encode_jpeg(&img, Quality::default()).unwrap();
        assert_eq!(&encoded[..2], &[0xFF, 0xD8]);
        assert_eq!(decode(&encoded).unwrap().dimensions(), (33, 21));
    }

    #[test]
    fn jpeg_drops_alpha_channel() {
        let img = decode(&png_rgba_bytes(12, 12)).unwrap();
        let encoded = encode_jpeg(&img, Quality::default()).unwrap();
        assert_eq!(decode(&encoded).unwrap().color(), image::ColorType::Rgb8);
    }

    #[test]
    fn lower_quality_means_smaller_jpeg() {
        let img = decode(&jpeg_bytes(128, 128)).unwrap();
        let small = encode_jpeg(&img, Quality::new(10).unwrap()).unwrap();
        let large = encode_jpeg(&img, Quality::new(95).unwrap()).unwrap();
        assert!(small.len() < large.len());
    }

    #[test]
    fn webp_output_is_riff_container() {
        let img = decode(&jpeg_bytes(48, 32)).unwrap();
        let encoded = encode_webp(&img, Quality::default());
        assert_eq!(&encoded[..4], b"RIFF");
        assert_eq!(&encoded[8..12], b"WEBP");
        assert_eq!(decode(&encoded).unwrap().dimensions(), (48, 32));
    }

    #[test]
    fn encode_dispatches_on_format() {
        let img = decode(&jpeg_bytes(24, 24)).unwrap();
        let jpeg = encode(&img, OutputFormat::Jpeg, Quality::default()).unwrap();
        let webp = encode(&img, OutputFormat::Webp, Quality::default()).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&webp[..4], b"RIFF");
    }
}
