use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

/// JPEG dimensions are stored as 16-bit values.
const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

/// Map a 0.0-1.0 quality hint onto the encoder's 1-100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Flatten RGBA onto a black background: each color channel is scaled by alpha.
pub fn composite_on_black(rgba_data: &[u8]) -> Vec<u8> {
    rgba_data
        .chunks_exact(4)
        .flat_map(|px| {
            let a = px[3] as u16;
            let blend = |c: u8| ((c as u16 * a + 127) / 255) as u8;
            [blend(px[0]), blend(px[1]), blend(px[2])]
        })
        .collect()
}

/// Encode RGBA samples as baseline JPEG. Transparency is flattened onto black.
pub fn encode_rgba_jpeg(cols: u32, rows: u32, rgba_data: &[u8], quality: f32) -> Result<Vec<u8>> {
    if cols > MAX_JPEG_DIMENSION || rows > MAX_JPEG_DIMENSION {
        return Err(Error::Encode(format!(
            "{}x{} exceeds the JPEG limit of {} pixels per side",
            cols, rows, MAX_JPEG_DIMENSION
        )));
    }
    let rgb = composite_on_black(rgba_data);
    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, jpeg_quality(quality));
    encoder
        .encode(&rgb, cols as u16, rows as u16, ColorType::Rgb)
        .map_err(Error::encode)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_maps_onto_one_to_hundred() {
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.92), 92);
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(7.0), 100);
    }

    #[test]
    fn alpha_scales_color_channels() {
        let rgb = composite_on_black(&[255, 0, 0, 0, 200, 100, 50, 255, 200, 100, 50, 128]);
        assert_eq!(rgb, [0, 0, 0, 200, 100, 50, 100, 50, 25]);
    }

    #[test]
    fn writes_jfif_markers() {
        let data = vec![128u8; 16 * 8 * 4];
        let bytes = encode_rgba_jpeg(16, 8, &data, 0.8).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }
}
