use clap::Parser;
use std::path::PathBuf;

use trimpro::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "trimpro",
    version,
    about = "Trim uniform borders from photos and normalize them to a fixed height"
)]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input directory containing images (batch mode, at most 200 are processed)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long, conflicts_with = "archive")]
    pub output_dir: Option<PathBuf>,

    /// Write batch outputs into a single tar.gz instead of a directory. A
    /// directory path gets `processed_images.tar.gz` inside it.
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// JSON preset with processing parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective parameters as a JSON preset and continue
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Per-channel border match tolerance (0-255)
    #[arg(short, long)]
    pub tolerance: Option<u8>,

    /// Output format (jpeg, png, webp or tiff)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Encoding quality between 0.0 and 1.0 (JPEG only)
    #[arg(short, long)]
    pub quality: Option<f32>,

    /// Run the 2x enhancement pass before resizing
    #[arg(long, default_value_t = false)]
    pub enhance: bool,

    /// Skip the enhancement pass even if the preset enables it
    #[arg(long, conflicts_with = "enhance")]
    pub no_enhance: bool,

    /// Output height in pixels
    #[arg(long)]
    pub target_height: Option<u32>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: stop at the first image that fails instead of skipping it
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}
