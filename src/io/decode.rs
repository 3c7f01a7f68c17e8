use tracing::debug;

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// File extensions the standard decoder is expected to handle.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "tif", "tiff", "bmp", "gif",
];

/// Turns encoded file bytes into an RGBA pixel buffer.
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;
}

/// Decoder backed by the `image` crate; the format is sniffed from the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl Decoder for StandardDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let img = image::load_from_memory(bytes).map_err(Error::decode)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!("Decoded {} bytes into {}x{}", bytes.len(), width, height);
        PixelBuffer::new(width, height, rgba.into_raw()).map_err(Error::decode)
    }
}

/// Whether `path` carries one of [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn has_supported_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::raster::encode_rgba_lossless;
    use std::path::Path;

    #[test]
    fn garbage_is_a_decode_error() {
        let err = StandardDecoder.decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn png_decodes_to_rgba() {
        let samples: Vec<u8> = (0..3 * 2 * 4).map(|v| v as u8).collect();
        let png = encode_rgba_lossless(3, 2, &samples, image::ImageFormat::Png).unwrap();
        let buf = StandardDecoder.decode(&png).unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.samples(), samples.as_slice());
    }

    #[test]
    fn extension_filter() {
        assert!(has_supported_extension(Path::new("a/b/scan.JPG")));
        assert!(has_supported_extension(Path::new("x.tiff")));
        assert!(!has_supported_extension(Path::new("notes.txt")));
        assert!(!has_supported_extension(Path::new("README")));
    }
}
