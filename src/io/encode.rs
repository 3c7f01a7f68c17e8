use image::ImageFormat;

use crate::core::buffer::PixelBuffer;
use crate::error::Result;
use crate::io::writers::jpeg::encode_rgba_jpeg;
use crate::io::writers::raster::encode_rgba_lossless;
use crate::io::writers::tiff::encode_rgba_tiff;
use crate::types::OutputFormat;

/// Serializes a pixel buffer into a file format.
pub trait Encoder {
    /// `quality` is a 0.0-1.0 hint; lossless formats ignore it.
    fn encode(&self, buffer: &PixelBuffer, format: OutputFormat, quality: f32) -> Result<Vec<u8>>;
}

/// Dispatches to the format writers in [`crate::io::writers`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoder;

impl Encoder for StandardEncoder {
    fn encode(&self, buffer: &PixelBuffer, format: OutputFormat, quality: f32) -> Result<Vec<u8>> {
        let (cols, rows) = buffer.dimensions();
        let data = buffer.samples();
        match format {
            OutputFormat::Jpeg => encode_rgba_jpeg(cols, rows, data, quality),
            OutputFormat::Png => encode_rgba_lossless(cols, rows, data, ImageFormat::Png),
            OutputFormat::Webp => encode_rgba_lossless(cols, rows, data, ImageFormat::WebP),
            OutputFormat::Tiff => encode_rgba_tiff(cols, rows, data),
        }
    }
}
