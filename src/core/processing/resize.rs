use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::{debug, info};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::ResampleQuality;

/// Default output height for normalized images.
pub const DEFAULT_TARGET_HEIGHT: u32 = 500;

/// Output dimensions for scaling `(width, height)` to `target_height`, keeping the
/// aspect ratio up to rounding of the width (never below one pixel).
pub fn target_dimensions(width: u32, height: u32, target_height: u32) -> (u32, u32) {
    let scale = target_height as f64 / height as f64;
    let new_width = (width as f64 * scale).round().max(1.0) as u32;
    (new_width, target_height)
}

fn filter_for(quality: ResampleQuality) -> FilterType {
    match quality {
        ResampleQuality::Bilinear => FilterType::Bilinear,
        ResampleQuality::Bicubic => FilterType::CatmullRom,
        ResampleQuality::Lanczos3 => FilterType::Lanczos3,
    }
}

/// Resample an RGBA buffer to exactly `width` x `height`.
pub fn resample(
    buffer: &PixelBuffer,
    width: u32,
    height: u32,
    quality: ResampleQuality,
) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(Error::ZeroSize {
            size: width.min(height) as usize,
        });
    }

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter_for(quality)));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        buffer.width(),
        buffer.height(),
        buffer.samples().to_vec(),
        PixelType::U8x4,
    )
    .map_err(|e| Error::Resize(e.to_string()))?;
    let mut dst_image = Image::new(width, height, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(|e| Error::Resize(e.to_string()))?;

    debug!(
        "Resampled {}x{} -> {}x{} ({})",
        buffer.width(),
        buffer.height(),
        width,
        height,
        quality
    );
    PixelBuffer::new(width, height, dst_image.into_vec())
}

/// Scale `buffer` so its height equals `target_height`.
pub fn resize_to_height(buffer: PixelBuffer, target_height: u32) -> Result<PixelBuffer> {
    if target_height == 0 {
        return Err(Error::ZeroSize { size: 0 });
    }

    let (cols, rows) = buffer.dimensions();
    let (new_cols, new_rows) = target_dimensions(cols, rows, target_height);

    // If already at the requested size, skip resizing
    if (new_cols, new_rows) == (cols, rows) {
        debug!("Already {}x{}; skipping resize", cols, rows);
        return Ok(buffer);
    }

    info!(
        "Original size: {}x{}, New size: {}x{}",
        cols, rows, new_cols, new_rows
    );
    resample(&buffer, new_cols, new_rows, ResampleQuality::Lanczos3)
}
