use crate::core::buffer::{CHANNELS, PixelBuffer};
use crate::types::{Color, Tolerance};

/// Mismatching pixels a line of `len` pixels may contain and still count as
/// border: `max(2, floor(len * 0.02))`. Absorbs lossy-compression noise.
#[inline]
pub fn mismatch_budget(len: u32) -> u32 {
    (len / 50).max(2)
}

/// Whether row `y` is homogeneous with `reference` within `tolerance`.
///
/// Stops as soon as the mismatch budget is exceeded.
pub fn is_row_border(buffer: &PixelBuffer, y: u32, reference: Color, tolerance: Tolerance) -> bool {
    let budget = mismatch_budget(buffer.width());
    let mut mismatches = 0u32;
    for px in buffer.row(y).chunks_exact(CHANNELS) {
        let color = Color::from_rgba([px[0], px[1], px[2], px[3]]);
        if !color.matches(reference, tolerance) {
            mismatches += 1;
            if mismatches > budget {
                return false;
            }
        }
    }
    true
}

/// Column analogue of [`is_row_border`], budgeted on the buffer height.
pub fn is_column_border(
    buffer: &PixelBuffer,
    x: u32,
    reference: Color,
    tolerance: Tolerance,
) -> bool {
    let budget = mismatch_budget(buffer.height());
    let mut mismatches = 0u32;
    for y in 0..buffer.height() {
        if !buffer.pixel(x, y).matches(reference, tolerance) {
            mismatches += 1;
            if mismatches > budget {
                return false;
            }
        }
    }
    true
}
