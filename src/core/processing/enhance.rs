//! Optional enhancement pass: 2x bicubic magnification followed by a fixed,
//! non-adaptive contrast and brightness lift.
//!
//! This is a deterministic visual heuristic. It does not recover detail and is
//! not content-aware sharpening.
use tracing::info;

use crate::core::buffer::{CHANNELS, PixelBuffer};
use crate::core::processing::resize::resample;
use crate::error::{Error, Result};
use crate::types::ResampleQuality;

pub const ENHANCE_SCALE: u32 = 2;
pub const ENHANCE_CONTRAST: f32 = 1.1;
pub const ENHANCE_BRIGHTNESS: f32 = 1.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enhancer {
    pub scale: u32,
    pub contrast: f32,
    pub brightness: f32,
}

impl Default for Enhancer {
    fn default() -> Self {
        Self {
            scale: ENHANCE_SCALE,
            contrast: ENHANCE_CONTRAST,
            brightness: ENHANCE_BRIGHTNESS,
        }
    }
}

impl Enhancer {
    /// Magnify by `scale` in both axes, then apply the tone adjustment.
    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        let (w, h) = buffer.dimensions();
        let (out_w, out_h) = match (w.checked_mul(self.scale), h.checked_mul(self.scale)) {
            (Some(ow), Some(oh)) => (ow, oh),
            _ => {
                return Err(Error::InvalidArgument {
                    arg: "scale",
                    value: self.scale.to_string(),
                });
            }
        };
        info!(
            contrast = self.contrast,
            brightness = self.brightness,
            "Enhancing {}x{} -> {}x{}",
            w,
            h,
            out_w,
            out_h
        );

        let magnified = resample(buffer, out_w, out_h, ResampleQuality::Bicubic)?;
        self.adjust_tone(magnified)
    }

    /// Contrast about mid-grey, then brightness as a multiplier. Alpha is kept.
    pub fn adjust_tone(&self, buffer: PixelBuffer) -> Result<PixelBuffer> {
        let lut = tone_table(self.contrast, self.brightness);
        let (w, h) = buffer.dimensions();
        let mut samples = buffer.into_samples();
        for px in samples.chunks_exact_mut(CHANNELS) {
            px[0] = lut[px[0] as usize];
            px[1] = lut[px[1] as usize];
            px[2] = lut[px[2] as usize];
        }
        PixelBuffer::new(w, h, samples)
    }
}

fn tone_table(contrast: f32, brightness: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let c = (contrast * (v as f32 - 128.0) + 128.0).clamp(0.0, 255.0);
        *out = (c * brightness).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
