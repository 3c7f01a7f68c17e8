use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// An RGBA color, one byte per channel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True when every channel, alpha included, is within `tolerance` of `other`.
    #[inline]
    pub fn matches(self, other: Color, tolerance: Tolerance) -> bool {
        let t = tolerance.0;
        self.r.abs_diff(other.r) <= t
            && self.g.abs_diff(other.g) <= t
            && self.b.abs_diff(other.b) <= t
            && self.a.abs_diff(other.a) <= t
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Maximum per-channel absolute difference for two colors to match.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tolerance(pub u8);

impl From<u8> for Tolerance {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open pixel region `[left, right) x [top, bottom)`.
///
/// Always satisfies `left < right <= width` and `top < bottom <= height` for the
/// buffer it was resolved against.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CropRect {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            top: 0,
            left: 0,
            right: width,
            bottom: height,
        }
    }

    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub const fn is_full_frame(&self, width: u32, height: u32) -> bool {
        self.top == 0 && self.left == 0 && self.right == width && self.bottom == height
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}..{}) x [{}..{})",
            self.left, self.right, self.top, self.bottom
        )
    }
}

/// Raw border extents as found by the four-sided scan, before margins.
///
/// `top <= bottom <= height` and `left <= right <= width`; equality on either
/// axis means no content was found along it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct BorderExtents {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// Interpolation used when resampling a buffer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleQuality {
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl std::fmt::Display for ResampleQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleQuality::Bilinear => write!(f, "Bilinear"),
            ResampleQuality::Bicubic => write!(f, "Bicubic"),
            ResampleQuality::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[serde(alias = "image/jpeg", alias = "jpg")]
    Jpeg, // Lossy, honours quality
    #[serde(alias = "image/png")]
    Png,
    #[serde(alias = "image/webp")]
    Webp, // Lossless only
    #[serde(alias = "image/tiff", alias = "tif")]
    Tiff,
}

impl OutputFormat {
    /// MIME-style type identifier.
    pub const fn mime(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Tiff => "image/tiff",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Accepts a MIME type (`image/png`) or a short name/extension (`png`, `jpg`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "image/png" | "png" => Some(OutputFormat::Png),
            "image/webp" | "webp" => Some(OutputFormat::Webp),
            "image/tiff" | "tiff" | "tif" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::parse(s).ok_or_else(|| crate::Error::InvalidArgument {
            arg: "format",
            value: s.to_string(),
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}
