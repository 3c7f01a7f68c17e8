use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::processing::resize::DEFAULT_TARGET_HEIGHT;
use crate::error::{Error, Result};
use crate::types::{OutputFormat, Tolerance};

/// Per-image transform options consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    pub tolerance: Tolerance,
    pub enhance: bool,
    pub target_height: u32,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance(10),
            enhance: false,
            target_height: DEFAULT_TARGET_HEIGHT,
        }
    }
}

/// Processing parameters suitable for config files and presets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    /// Per-channel match threshold for border scanning (0-255)
    pub tolerance: Tolerance,
    pub format: OutputFormat,
    /// Encoding quality hint, 0.0-1.0; lossless formats ignore it
    pub quality: f32,
    /// Run the 2x enhancement pass before resizing
    pub enhance: bool,
    /// Output height in pixels
    pub target_height: u32,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            tolerance: Tolerance(10),
            format: OutputFormat::Jpeg,
            quality: 0.92,
            enhance: false,
            target_height: DEFAULT_TARGET_HEIGHT,
        }
    }
}

impl ProcessingParams {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(Error::InvalidArgument {
                arg: "quality",
                value: self.quality.to_string(),
            });
        }
        if self.target_height == 0 {
            return Err(Error::ZeroSize { size: 0 });
        }
        Ok(())
    }

    pub fn options(&self) -> ProcessingOptions {
        ProcessingOptions {
            tolerance: self.tolerance,
            enhance: self.enhance,
            target_height: self.target_height,
        }
    }

    /// Load a preset written with [`ProcessingParams::to_json_file`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: ProcessingParams = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
