use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Encode RGBA samples through the `image` crate (lossless PNG or WebP).
pub fn encode_rgba_lossless(
    cols: u32,
    rows: u32,
    rgba_data: &[u8],
    format: ImageFormat,
) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(cols, rows, rgba_data.to_vec()).ok_or_else(|| {
        Error::Encode(format!("{} bytes do not form a {}x{} RGBA image", rgba_data.len(), cols, rows))
    })?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).map_err(Error::encode)?;
    Ok(out.into_inner())
}
