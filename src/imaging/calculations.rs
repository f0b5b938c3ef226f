//! Pure calculation functions for resize, thumbnail, and watermark placement.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::Position;

/// Calculate downsize-only fit dimensions for a width cap.
///
/// # Returns
/// * `None`: the image is already within `max_width`; no resize happens
/// * `Some((width, height))`: target dimensions, width scaled to `max_width`
///   and height scaled by the same ratio, rounded to the nearest pixel
pub fn fit_to_width(source: (u32, u32), max_width: u32) -> Option<(u32, u32)> {
    let (w, h) = source;
    if w <= max_width {
        return None;
    }
    let ratio = max_width as f64 / w as f64;
    Some((max_width, (h as f64 * ratio).round() as u32))
}

/// Calculate thumbnail dimensions for an exact target width.
///
/// Unlike [`fit_to_width`] there is no "already small enough" guard: the
/// output width is always exactly `target_width`, upscaling if needed.
pub fn thumbnail_dimensions(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (w, h) = source;
    let ratio = target_width as f64 / w as f64;
    (target_width, (h as f64 * ratio).round() as u32)
}

/// Default watermark font size for an image width: `max(20, width / 40)`.
///
/// Larger images get proportionally larger watermark text; small images
/// bottom out at 20px so the text stays legible.
pub fn auto_font_size(width: u32) -> u32 {
    (width / 40).max(20)
}

/// Watermark margin: 2% of the image width, truncated.
pub fn watermark_margin(width: u32) -> u32 {
    (width as f64 * 0.02) as u32
}

/// Calculate logo overlay dimensions from the base width and a scale factor.
///
/// Logo width becomes `round(base_width * scale)`; height follows the logo's
/// own aspect ratio. Degenerate combinations (tiny base, tiny scale) clamp to
/// 1px so a later resize never sees a zero dimension.
pub fn scaled_logo_dimensions(logo: (u32, u32), base_width: u32, scale: f64) -> (u32, u32) {
    let (logo_w, logo_h) = logo;
    let target_w = ((base_width as f64 * scale).round() as u32).max(1);
    let ratio = target_w as f64 / logo_w as f64;
    let target_h = ((logo_h as f64 * ratio).round() as u32).max(1);
    (target_w, target_h)
}

/// Calculate the top-left anchor for an overlay box in one of the four
/// corners, inset by `margin`.
///
/// | position | anchor (x, y) |
/// |---|---|
/// | top-left | (margin, margin) |
/// | top-right | (base_w - obj_w - margin, margin) |
/// | bottom-left | (margin, base_h - obj_h - margin) |
/// | bottom-right | (base_w - obj_w - margin, base_h - obj_h - margin) |
///
/// Coordinates clamp at zero when the box plus margin exceeds the base, so an
/// oversized overlay pins to the top/left edge instead of underflowing.
pub fn anchor_point(
    position: Position,
    base: (u32, u32),
    object: (u32, u32),
    margin: u32,
) -> (u32, u32) {
    let (base_w, base_h) = base;
    let (obj_w, obj_h) = object;
    let right = base_w.saturating_sub(obj_w.saturating_add(margin));
    let bottom = base_h.saturating_sub(obj_h.saturating_add(margin));

    match position {
        Position::TopLeft => (margin, margin),
        Position::TopRight => (right, margin),
        Position::BottomLeft => (margin, bottom),
        Position::BottomRight => (right, bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // fit_to_width tests
    // =========================================================================

    #[test]
    fn fit_smaller_image_is_identity() {
        assert_eq!(fit_to_width((800, 600), 1200), None);
    }

    #[test]
    fn fit_equal_width_is_identity() {
        assert_eq!(fit_to_width((1200, 900), 1200), None);
    }

    #[test]
    fn fit_larger_image_scales_down() {
        // 3000x2000 capped at 1200 → ratio 0.4 → 1200x800
        assert_eq!(fit_to_width((3000, 2000), 1200), Some((1200, 800)));
    }

    #[test]
    fn fit_portrait_scales_by_width_only() {
        // width drives the ratio even when height is the longer edge
        assert_eq!(fit_to_width((1500, 3000), 1200), Some((1200, 2400)));
    }

    #[test]
    fn fit_height_rounds_to_nearest() {
        // 1000x333 capped at 500 → height 166.5 rounds to 167
        assert_eq!(fit_to_width((1000, 333), 500), Some((500, 167)));
    }

    // =========================================================================
    // thumbnail_dimensions tests
    // =========================================================================

    #[test]
    fn thumbnail_downscales() {
        assert_eq!(thumbnail_dimensions((1200, 800), 300), (300, 200));
    }

    #[test]
    fn thumbnail_upscales_small_sources() {
        // no minimum-size guard: 150 wide grows to 300
        assert_eq!(thumbnail_dimensions((150, 100), 300), (300, 200));
    }

    #[test]
    fn thumbnail_exact_width_is_unchanged() {
        assert_eq!(thumbnail_dimensions((300, 451), 300), (300, 451));
    }

    #[test]
    fn thumbnail_height_rounds_to_nearest() {
        // 1000x333 at 300 → height 99.9 rounds to 100
        assert_eq!(thumbnail_dimensions((1000, 333), 300), (300, 100));
    }

    // =========================================================================
    // auto_font_size / watermark_margin tests
    // =========================================================================

    #[test]
    fn font_scales_with_width() {
        assert_eq!(auto_font_size(1200), 30);
        assert_eq!(auto_font_size(3000), 75);
    }

    #[test]
    fn font_floor_is_20() {
        assert_eq!(auto_font_size(400), 20);
        assert_eq!(auto_font_size(800), 20); // exactly at the floor
        assert_eq!(auto_font_size(840), 21);
    }

    #[test]
    fn margin_is_two_percent_truncated() {
        assert_eq!(watermark_margin(1000), 20);
        assert_eq!(watermark_margin(1030), 20); // 20.6 truncates
        assert_eq!(watermark_margin(999), 19); // 19.98 truncates
    }

    // =========================================================================
    // scaled_logo_dimensions tests
    // =========================================================================

    #[test]
    fn logo_scales_to_fraction_of_base() {
        // base 1000 at 0.18 → 180 wide; 500x250 logo keeps 2:1 → 180x90
        assert_eq!(scaled_logo_dimensions((500, 250), 1000, 0.18), (180, 90));
    }

    #[test]
    fn logo_height_follows_own_aspect() {
        // 333x111 logo (3:1) at base 1000, scale 0.1 → 100x33
        assert_eq!(scaled_logo_dimensions((333, 111), 1000, 0.1), (100, 33));
    }

    #[test]
    fn logo_width_rounds_to_nearest() {
        // 853 * 0.18 = 153.54 rounds up; truncation would stop at 153
        assert_eq!(scaled_logo_dimensions((100, 100), 853, 0.18).0, 154);
        // 851 * 0.18 = 153.18 rounds down
        assert_eq!(scaled_logo_dimensions((100, 100), 851, 0.18).0, 153);
    }

    #[test]
    fn degenerate_logo_clamps_to_one_pixel() {
        assert_eq!(scaled_logo_dimensions((100, 50), 10, 0.01), (1, 1));
    }

    // =========================================================================
    // anchor_point tests
    // =========================================================================

    #[test]
    fn anchor_top_left() {
        assert_eq!(
            anchor_point(Position::TopLeft, (1000, 800), (100, 30), 20),
            (20, 20)
        );
    }

    #[test]
    fn anchor_top_right() {
        assert_eq!(
            anchor_point(Position::TopRight, (1000, 800), (100, 30), 20),
            (880, 20)
        );
    }

    #[test]
    fn anchor_bottom_left() {
        assert_eq!(
            anchor_point(Position::BottomLeft, (1000, 800), (100, 30), 20),
            (20, 750)
        );
    }

    #[test]
    fn anchor_bottom_right() {
        // 1000-100-20 = 880, 800-30-20 = 750
        assert_eq!(
            anchor_point(Position::BottomRight, (1000, 800), (100, 30), 20),
            (880, 750)
        );
    }

    #[test]
    fn anchor_clamps_when_overlay_exceeds_base() {
        assert_eq!(
            anchor_point(Position::BottomRight, (50, 50), (100, 30), 1),
            (0, 19)
        );
    }
}
