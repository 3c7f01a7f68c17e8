//! Immutable RGBA pixel storage shared by every processing stage.
use crate::error::{Error, Result};
use crate::types::{Color, CropRect};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Width, height and interleaved RGBA samples (R, G, B, A per pixel, row-major).
///
/// Read-only once constructed; transforms produce new buffers.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples. Fails unless both dimensions are non-zero and
    /// `samples.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidBuffer(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if samples.len() != expected {
            return Err(Error::InvalidBuffer(format!(
                "{}x{} RGBA needs {} bytes, got {}",
                width,
                height,
                expected,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let px = color.to_rgba();
        let samples = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self::new(width, height, samples)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Color,
    {
        let mut samples = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y).to_rgba());
            }
        }
        Self::new(width, height, samples)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Color at `(x, y)`.
    pub fn sample(&self, x: u32, y: u32) -> Result<Color> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.pixel(x, y))
    }

    /// Unchecked-by-contract access for scanners that already iterate in range.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Color {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Color::from_rgba([
            self.samples[i],
            self.samples[i + 1],
            self.samples[i + 2],
            self.samples[i + 3],
        ])
    }

    /// RGBA bytes of row `y`.
    #[inline]
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.samples[start..start + stride]
    }

    /// Copy out the region described by `rect`.
    pub fn crop(&self, rect: &CropRect) -> Result<Self> {
        if rect.left >= rect.right
            || rect.top >= rect.bottom
            || rect.right > self.width
            || rect.bottom > self.height
        {
            return Err(Error::InvalidBuffer(format!(
                "crop rectangle {} does not fit a {}x{} buffer",
                rect, self.width, self.height
            )));
        }

        let out_w = rect.width() as usize;
        let out_h = rect.height() as usize;
        let mut out = vec![0u8; out_w * out_h * CHANNELS];
        // Copy per row using slice copies to minimize per-pixel indexing
        for (i, y) in (rect.top..rect.bottom).enumerate() {
            let src = &self.row(y)
                [rect.left as usize * CHANNELS..rect.right as usize * CHANNELS];
            let dst_offset = i * out_w * CHANNELS;
            out[dst_offset..dst_offset + out_w * CHANNELS].copy_from_slice(src);
        }
        Self::new(rect.width(), rect.height(), out)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.samples.len())
            .finish()
    }
}
