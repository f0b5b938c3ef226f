//! Watermark overlays: corner-anchored text or a scaled logo image.
//!
//! Text is rendered in white from the built-in 8x8 bitmap font, scaled up
//! nearest-neighbor to the requested pixel size and alpha-blended at the
//! caller's opacity. Characters outside the font's ASCII range render as
//! `?`. The canvas is converted to RGBA before drawing so the blend
//! behaves the same for every input format; JPEG output flattens the
//! alpha again at encode time.
//!
//! Logo overlays are resized to a fraction of the base width (keeping the
//! logo's own aspect ratio) and composited with their alpha channel.
//!
//! Placement for both kinds comes from [`anchor_point`]: the overlay sits
//! in the chosen corner, inset by the width-proportional margin.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::calculations::{anchor_point, auto_font_size, scaled_logo_dimensions, watermark_margin};
use super::params::Position;

/// Edge length of one unscaled font glyph.
const GLYPH_SIZE: u32 = 8;

/// Integer upscale factor for a requested pixel size. Sizes under 8
/// still render at the font's native size.
fn glyph_scale(font_size: u32) -> u32 {
    (font_size / GLYPH_SIZE).max(1)
}

/// Pixel footprint of `text` rendered at `font_size`.
pub fn text_extent(text: &str, font_size: u32) -> (u32, u32) {
    let scale = glyph_scale(font_size);
    let chars = text.chars().count() as u32;
    (chars * GLYPH_SIZE * scale, GLYPH_SIZE * scale)
}

/// Draw `text` in white over the image at the given corner.
///
/// `font_size` of `None` derives the size from the image width, matching
/// the margin so the mark scales with the photo. `opacity` 0 is a no-op.
pub fn apply_text(
    img: DynamicImage,
    text: &str,
    opacity: u8,
    font_size: Option<u32>,
    position: Position,
) -> DynamicImage {
    let mut canvas = img.into_rgba8();
    let (width, height) = canvas.dimensions();
    let size = font_size.unwrap_or_else(|| auto_font_size(width));
    let margin = watermark_margin(width);
    let extent = text_extent(text, size);
    let (x0, y0) = anchor_point(position, (width, height), extent, margin);
    draw_text(&mut canvas, text, glyph_scale(size), opacity, x0, y0);
    DynamicImage::ImageRgba8(canvas)
}

/// Composite a logo into the given corner, resized to `scale` times the
/// base width. The logo's alpha channel is honored.
pub fn apply_logo(
    img: DynamicImage,
    logo: &DynamicImage,
    scale: f64,
    position: Position,
) -> DynamicImage {
    let mut canvas = img.into_rgba8();
    let (width, height) = canvas.dimensions();
    let (logo_w, logo_h) = scaled_logo_dimensions(logo.dimensions(), width, scale);
    let scaled = logo
        .resize_exact(logo_w, logo_h, FilterType::Lanczos3)
        .into_rgba8();
    let margin = watermark_margin(width);
    let (x0, y0) = anchor_point(position, (width, height), (logo_w, logo_h), margin);
    image::imageops::overlay(&mut canvas, &scaled, i64::from(x0), i64::from(y0));
    DynamicImage::ImageRgba8(canvas)
}

fn draw_text(canvas: &mut RgbaImage, text: &str, scale: u32, opacity: u8, x0: u32, y0: u32) {
    if opacity == 0 {
        return;
    }
    let (width, height) = canvas.dimensions();
    let mut cursor_x = x0;
    for ch in text.chars() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            // bit 0 is the leftmost column of the glyph row
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = cursor_x + col * scale + dx;
                        let y = y0 + row as u32 * scale + dy;
                        if x < width && y < height {
                            blend_white(canvas.get_pixel_mut(x, y), opacity);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_SIZE * scale;
    }
}

/// "Over" blend of white at the given alpha onto one pixel.
fn blend_white(dst: &mut Rgba<u8>, alpha: u8) {
    let a = u16::from(alpha);
    let inv = 255 - a;
    let blend = |c: u8| ((u16::from(c) * inv + 255 * a) / 255) as u8;
    let out_alpha = a + (u16::from(dst[3]) * inv + 127) / 255;
    *dst = Rgba([
        blend(dst[0]),
        blend(dst[1]),
        blend(dst[2]),
        out_alpha.min(255) as u8,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::MAX_FONT_SIZE;

    fn canvas(width: u32, height: u32, gray: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([gray, gray, gray, 255]),
        ))
    }

    /// Max channel value inside a rectangle.
    fn brightest(img: &DynamicImage, x0: u32, y0: u32, w: u32, h: u32) -> u8 {
        let rgba = img.to_rgba8();
        let mut max = 0;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                let px = rgba.get_pixel(x, y);
                max = max.max(px[0]).max(px[1]).max(px[2]);
            }
        }
        max
    }

    #[test]
    fn extent_scales_with_font_size() {
        assert_eq!(text_extent("abc", 8), (24, 8));
        assert_eq!(text_extent("ab", 40), (80, 40));
        assert_eq!(text_extent("x", 16), (16, 16));
        // largest size options validation lets through
        assert_eq!(text_extent("ab", MAX_FONT_SIZE), (512, 256));
    }

    #[test]
    fn extent_floors_tiny_sizes_at_native_glyphs() {
        assert_eq!(text_extent("abcd", 3), (32, 8));
    }

    #[test]
    fn extent_counts_chars_not_bytes() {
        assert_eq!(text_extent("©", 8), (8, 8));
    }

    #[test]
    fn text_lands_in_bottom_right_corner() {
        // width 200 gives margin 4; "W" at size 16 is a 16x16 box,
        // so the anchor is (180, 80)
        let out = apply_text(canvas(200, 100, 0), "W", 255, Some(16), Position::BottomRight);
        assert_eq!(brightest(&out, 180, 80, 16, 16), 255);
        assert_eq!(brightest(&out, 0, 0, 40, 40), 0);
    }

    #[test]
    fn text_lands_in_top_left_corner() {
        let out = apply_text(canvas(200, 100, 0), "W", 255, Some(16), Position::TopLeft);
        assert_eq!(brightest(&out, 4, 4, 16, 16), 255);
        assert_eq!(brightest(&out, 150, 60, 40, 30), 0);
    }

    #[test]
    fn zero_opacity_changes_nothing() {
        let before = canvas(64, 64, 30);
        let after = apply_text(before.clone(), "mark", 0, Some(16), Position::BottomRight);
        assert_eq!(before.to_rgba8().as_raw(), after.to_rgba8().as_raw());
    }

    #[test]
    fn partial_opacity_blends_toward_white() {
        // over-blend of white at alpha 128 onto gray 100 gives 177
        let out = apply_text(canvas(50, 50, 100), "W", 128, Some(8), Position::TopLeft);
        assert_eq!(brightest(&out, 1, 1, 8, 8), 177);
    }

    #[test]
    fn unknown_glyph_renders_as_question_mark() {
        let from_kanji = apply_text(canvas(64, 64, 0), "日", 255, Some(8), Position::TopLeft);
        let from_ascii = apply_text(canvas(64, 64, 0), "?", 255, Some(8), Position::TopLeft);
        assert_eq!(
            from_kanji.to_rgba8().as_raw(),
            from_ascii.to_rgba8().as_raw()
        );
    }

    #[test]
    fn oversized_text_is_clipped_not_panicking() {
        let out = apply_text(canvas(20, 10, 0), "long text", 255, Some(64), Position::BottomRight);
        assert_eq!(out.dimensions(), (20, 10));
    }

    #[test]
    fn logo_lands_scaled_in_corner() {
        // scale 0.18 of width 200 is a 36-wide logo; 40x20 source keeps
        // its ratio and comes out 36x18, anchored at (160, 78)
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            20,
            Rgba([255, 0, 0, 255]),
        ));
        let out = apply_logo(canvas(200, 100, 0), &logo, 0.18, Position::BottomRight);
        let rgba = out.to_rgba8();
        let center = rgba.get_pixel(160 + 18, 78 + 9);
        assert!(center[0] > 200, "logo center should be red, got {center:?}");
        assert_eq!(center[1], 0);
        assert_eq!(rgba.get_pixel(10, 10), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn transparent_logo_changes_nothing() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 0])));
        let before = canvas(200, 100, 60);
        let after = apply_logo(before.clone(), &logo, 0.18, Position::TopRight);
        assert_eq!(before.to_rgba8().as_raw(), after.to_rgba8().as_raw());
    }
}
