//! EXIF orientation handling.
//!
//! Phone cameras store photos in sensor order and record the intended
//! rotation in EXIF tag 0x0112. A viewer that honors the tag shows the
//! photo upright; raw pixel access does not. The pipeline bakes the
//! rotation into the pixels once, right after decode, so every later
//! stage (resize, watermark, thumbnail) works on an upright image.
//!
//! Reading is deliberately forgiving: missing EXIF, a missing tag, or a
//! malformed segment all read as orientation 1 (upright) and the image
//! passes through untouched.

use std::io::Cursor;

use image::DynamicImage;

/// Read the EXIF orientation value (1-8) from raw file bytes.
///
/// Returns 1 for anything that cannot be read: no EXIF segment, no
/// orientation tag, or a container format without EXIF support.
pub fn read_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let Ok(reader) = exif::Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };
    reader
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1)
}

/// Bake an EXIF orientation value into the pixel data.
///
/// Values 2-8 cover the mirror/rotate combinations from the EXIF spec;
/// 1 and anything out of range leave the image unchanged.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Read the orientation from the raw bytes and bake it into an already
/// decoded image in one step.
pub fn normalize(bytes: &[u8], img: DynamicImage) -> DynamicImage {
    apply_orientation(img, read_orientation(bytes))
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, Rgba, RgbaImage};

    use super::*;
    use crate::test_helpers::{jpeg_bytes, jpeg_with_orientation};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 2x1 image: red on the left, blue on the right.
    fn two_pixel_row() -> DynamicImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, RED);
        img.put_pixel(1, 0, BLUE);
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn orientation_one_is_identity() {
        let out = apply_orientation(two_pixel_row(), 1);
        assert_eq!(out.to_rgba8().get_pixel(0, 0), &RED);
        assert_eq!(out.to_rgba8().get_pixel(1, 0), &BLUE);
    }

    #[test]
    fn out_of_range_values_are_identity() {
        for value in [0, 9, 42] {
            let out = apply_orientation(two_pixel_row(), value);
            assert_eq!(out.dimensions(), (2, 1));
            assert_eq!(out.to_rgba8().get_pixel(0, 0), &RED);
        }
    }

    #[test]
    fn orientation_two_mirrors_horizontally() {
        let out = apply_orientation(two_pixel_row(), 2);
        assert_eq!(out.to_rgba8().get_pixel(0, 0), &BLUE);
        assert_eq!(out.to_rgba8().get_pixel(1, 0), &RED);
    }

    #[test]
    fn orientation_three_rotates_half_turn() {
        let out = apply_orientation(two_pixel_row(), 3);
        assert_eq!(out.to_rgba8().get_pixel(0, 0), &BLUE);
        assert_eq!(out.to_rgba8().get_pixel(1, 0), &RED);
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        for value in [5, 6, 7, 8] {
            let out = apply_orientation(two_pixel_row(), value);
            assert_eq!(out.dimensions(), (1, 2), "orientation {value}");
        }
    }

    #[test]
    fn orientation_six_rotates_clockwise() {
        // upright pixels read top-to-bottom red, blue after a 90° CW turn
        let out = apply_orientation(two_pixel_row(), 6).to_rgba8();
        assert_eq!(out.get_pixel(0, 0), &RED);
        assert_eq!(out.get_pixel(0, 1), &BLUE);
    }

    #[test]
    fn read_returns_one_for_garbage() {
        assert_eq!(read_orientation(b"not an image"), 1);
        assert_eq!(read_orientation(&[]), 1);
    }

    #[test]
    fn read_returns_one_without_exif_segment() {
        assert_eq!(read_orientation(&jpeg_bytes(32, 24)), 1);
    }

    #[test]
    fn read_finds_embedded_tag() {
        for value in [1u16, 3, 6, 8] {
            let bytes = jpeg_with_orientation(32, 24, value);
            assert_eq!(read_orientation(&bytes), u32::from(value));
        }
    }

    #[test]
    fn normalize_bakes_rotation_from_bytes() {
        // 32x24 source tagged "rotate 90 CW" comes out 24x32
        let bytes = jpeg_with_orientation(32, 24, 6);
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(normalize(&bytes, img).dimensions(), (24, 32));
    }
}
