use tracing::{debug, info};

use crate::core::buffer::PixelBuffer;
use crate::core::processing::border::detect_borders;
use crate::error::Result;
use crate::types::{BorderExtents, CropRect, Tolerance};

/// Extra inset applied to every side that had a border, to shave the thin
/// fringe that tends to survive the tolerance scan.
pub const CROP_MARGIN: u32 = 10;

/// Turns detected border extents into a crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropResolver {
    pub margin: u32,
}

impl Default for CropResolver {
    fn default() -> Self {
        Self {
            margin: CROP_MARGIN,
        }
    }
}

impl CropResolver {
    pub fn new(margin: u32) -> Self {
        Self { margin }
    }

    /// Apply the margin to trimmed sides and clamp against the opposite bound.
    ///
    /// Returns the full frame when the result would be empty, inverted or
    /// outside the buffer; cropping never destroys an ambiguous image.
    pub fn resolve_extents(&self, ext: BorderExtents, width: u32, height: u32) -> CropRect {
        let m = self.margin;

        let top = if ext.top > 0 { ext.top.saturating_add(m) } else { ext.top };
        let bottom = if ext.bottom < height {
            height.min(ext.bottom.saturating_sub(m)).max(top.saturating_add(1))
        } else {
            ext.bottom
        };
        let left = if ext.left > 0 { ext.left.saturating_add(m) } else { ext.left };
        let right = if ext.right < width {
            width.min(ext.right.saturating_sub(m)).max(left.saturating_add(1))
        } else {
            ext.right
        };

        if right <= left || bottom <= top || right > width || bottom > height {
            debug!(
                top,
                bottom,
                left,
                right,
                "Degenerate crop for {}x{}; keeping full frame",
                width,
                height
            );
            return CropRect::full(width, height);
        }

        CropRect {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Scan `buffer` and resolve the crop rectangle.
    pub fn resolve(&self, buffer: &PixelBuffer, tolerance: Tolerance) -> CropRect {
        let ext = detect_borders(buffer, tolerance);
        self.resolve_extents(ext, buffer.width(), buffer.height())
    }

    /// Trim the border from `source`. A full-frame result hands `source` back
    /// untouched.
    pub fn crop(&self, source: PixelBuffer, tolerance: Tolerance) -> Result<PixelBuffer> {
        let (w, h) = source.dimensions();
        let rect = self.resolve(&source, tolerance);
        if rect.is_full_frame(w, h) {
            info!("No border trimmed from {}x{}", w, h);
            return Ok(source);
        }
        info!(
            "Cropping {}x{} to {} ({}x{})",
            w,
            h,
            rect,
            rect.width(),
            rect.height()
        );
        source.crop(&rect)
    }
}
