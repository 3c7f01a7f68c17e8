use tracing::debug;

use crate::core::buffer::PixelBuffer;
use crate::core::processing::scan::{is_column_border, is_row_border};
use crate::types::{BorderExtents, Tolerance};

/// Four-sided inward border scan.
///
/// Sides are scanned in a fixed order (top, bottom, left, right) and each side
/// samples its own reference color, so two-tone mats trim correctly. The left and
/// right references come from the first content row found by the top scan.
pub fn detect_borders(buffer: &PixelBuffer, tolerance: Tolerance) -> BorderExtents {
    let (w, h) = buffer.dimensions();

    let top_color = buffer.pixel(0, 0);
    let mut top = 0;
    while top < h && is_row_border(buffer, top, top_color, tolerance) {
        top += 1;
    }

    if top == h {
        debug!("Every row matches {}; no content found", top_color);
        return BorderExtents {
            top: h,
            bottom: h,
            left: 0,
            right: w,
        };
    }

    let bottom_color = buffer.pixel(0, h - 1);
    let mut bottom = h;
    while bottom > top && is_row_border(buffer, bottom - 1, bottom_color, tolerance) {
        bottom -= 1;
    }

    let left_color = buffer.pixel(0, top);
    let mut left = 0;
    while left < w && is_column_border(buffer, left, left_color, tolerance) {
        left += 1;
    }

    let right_color = buffer.pixel(w - 1, top);
    let mut right = w;
    while right > left && is_column_border(buffer, right - 1, right_color, tolerance) {
        right -= 1;
    }

    debug!(
        top,
        bottom,
        left,
        right,
        "Border scan on {}x{} (tolerance {})",
        w,
        h,
        tolerance
    );

    BorderExtents {
        top,
        bottom,
        left,
        right,
    }
}
