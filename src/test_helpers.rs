//! Shared test utilities for the picpress test suite.
//!
//! Builds small in-memory image files so tests can exercise the real decode
//! and EXIF paths without fixture files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let raw = jpeg_with_orientation(32, 24, 6);
//! let img = crate::imaging::prepare_image(&raw, &Default::default(), None).unwrap();
//! // 32x24 tagged "rotate 90 CW" comes out upright at 24x32
//! ```

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};

// =========================================================================
// Encoded image builders
// =========================================================================

/// A baseline JPEG with no EXIF segment.
///
/// Pixel content is a dark XOR texture (all channels below 16): dark enough
/// that a white watermark is unambiguous in any corner, textured enough that
/// encode quality visibly changes the file size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let v = ((x ^ y) % 16) as u8;
        Rgb([v, v, v])
    });
    let mut out = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut out, 90);
    encoder.encode_image(&img).unwrap();
    out.into_inner()
}

/// A PNG with a real alpha channel (alpha 200, so flattening is observable).
pub fn png_rgba_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            128,
            200,
        ])
    });
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&img, width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
    out
}

// =========================================================================
// EXIF splicing
// =========================================================================

/// A JPEG carrying an EXIF orientation tag.
///
/// Splices a minimal APP1 segment (little-endian TIFF, one IFD0 entry for
/// tag 0x0112) directly after the SOI marker of [`jpeg_bytes`] output. JPEG
/// decoders skip the segment; EXIF readers find the tag.
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let base = jpeg_bytes(width, height);

    // APP1 length 0x22 = 2 (length field) + 6 (Exif header) + 26 (TIFF block)
    let mut app1: Vec<u8> = vec![0xFF, 0xE1, 0x00, 0x22];
    app1.extend_from_slice(b"Exif\0\0");
    // TIFF header: "II" + 42 + offset of IFD0
    app1.extend_from_slice(b"II\x2A\x00");
    app1.extend_from_slice(&8u32.to_le_bytes());
    // IFD0: one entry
    app1.extend_from_slice(&1u16.to_le_bytes());
    app1.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
    app1.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    app1.extend_from_slice(&1u32.to_le_bytes()); // count
    app1.extend_from_slice(&orientation.to_le_bytes());
    app1.extend_from_slice(&[0, 0]); // value padding
    app1.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

    let mut out = Vec::with_capacity(base.len() + app1.len());
    out.extend_from_slice(&base[..2]); // SOI
    out.extend_from_slice(&app1);
    out.extend_from_slice(&base[2..]);
    out
}
