use std::io::Cursor;

use tiff::encoder::{TiffEncoder, colortype};

use crate::error::{Error, Result};

/// Encode RGBA samples as an uncompressed 8-bit RGBA TIFF.
pub fn encode_rgba_tiff(cols: u32, rows: u32, rgba_data: &[u8]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut cursor).map_err(Error::encode)?;
        encoder
            .write_image::<colortype::RGBA8>(cols, rows, rgba_data)
            .map_err(Error::encode)?;
    }
    Ok(cursor.into_inner())
}
