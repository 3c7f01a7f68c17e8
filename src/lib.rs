#![doc = r#"
TRIMPRO — a batch photo border trimmer.

This crate detects the uniform-color border around a photograph (a scan bed's
background, a photo mat), crops it away with a small safety margin, optionally runs
a 2x enhancement pass, and normalizes the result to a fixed height. It powers the
TRIMPRO CLI and can be embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases and may evolve as the
crate stabilizes. Breaking changes can occur.

Add dependency
--------------
```toml
[dependencies]
trimpro = "0.1"
```

Quick start: process a file to a file
-------------------------------------
```rust,no_run
use std::path::Path;
use trimpro::{process_file_to_path, OutputFormat, ProcessingParams, Tolerance};

fn main() -> trimpro::Result<()> {
    let params = ProcessingParams {
        tolerance: Tolerance(12),
        format: OutputFormat::Jpeg,
        quality: 0.9,
        enhance: false,
        target_height: 500,
    };

    process_file_to_path(
        Path::new("/scans/IMG_0001.png"),
        Path::new("/out/IMG_0001.jpg"),
        &params,
    )
}
```

Work on pixel buffers directly
------------------------------
```rust
use trimpro::{Color, ImageJob, Pipeline, PixelBuffer, ProcessingOptions, Tolerance};

fn main() -> trimpro::Result<()> {
    // 120x90 photo inside a 20px white mat
    let mat = Color::new(255, 255, 255, 255);
    let photo = Color::new(40, 80, 160, 255);
    let source = PixelBuffer::from_fn(120, 90, |x, y| {
        if x < 20 || y < 20 || x >= 100 || y >= 70 { mat } else { photo }
    })?;

    let options = ProcessingOptions {
        tolerance: Tolerance(8),
        enhance: false,
        target_height: 60,
    };
    let out = Pipeline::default().process(vec![ImageJob::new("mat.png", source, options)]);

    // 20px border + 10px margin on every side leaves 60x30, scaled to 60 tall
    assert_eq!(out[0].buffer.dimensions(), (120, 60));
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use trimpro::{process_directory_to_archive, process_directory_to_path, ProcessingParams};

fn main() -> trimpro::Result<()> {
    let params = ProcessingParams::default();

    let report = process_directory_to_path(
        Path::new("/scans"),
        Path::new("/out"),
        &params,
        true, // continue_on_error
    )?;
    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);

    process_directory_to_archive(
        Path::new("/scans"),
        Path::new("/out/processed_images.tar.gz"),
        &params,
        true,
    )?;
    Ok(())
}
```

Error handling
--------------
All public functions return `trimpro::Result<T>`; match on `trimpro::Error` to handle
specific cases. In batches, decode and encode failures are scoped to the image that
caused them and reported alongside the successful outputs.

```rust,no_run
use trimpro::{process_bytes, Error, ProcessingParams};

fn main() {
    match process_bytes("broken.jpg", vec![0, 1, 2], &ProcessingParams::default()) {
        Ok(img) => println!("{} bytes", img.bytes.len()),
        Err(Error::Decode(e)) => eprintln!("could not decode: {e}"),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

The enhancement pass
--------------------
`enhance` is a fixed 2x bicubic magnification followed by a x1.1 contrast and x1.02
brightness lift. It is a deterministic visual tweak, not a learned upscaler, and
it does not recover detail.

Useful modules
--------------
- [`api`] — high-level entry points and batch helpers.
- [`core`] — pixel buffer, border scan, crop, enhance, resize, pipeline.
- [`io`] — decoder, encoders, and archiver.
- [`types`] — colors, tolerance, rectangles, output formats.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::buffer::PixelBuffer;
pub use core::params::{ProcessingOptions, ProcessingParams};
pub use error::{Error, Result};
pub use types::{BorderExtents, Color, CropRect, OutputFormat, ResampleQuality, Tolerance};

// Stages
pub use core::processing::border::detect_borders;
pub use core::processing::crop::{CROP_MARGIN, CropResolver};
pub use core::processing::enhance::Enhancer;
pub use core::processing::pipeline::{ImageJob, Pipeline, ProcessedImage};
pub use core::processing::resize::{
    DEFAULT_TARGET_HEIGHT, resample, resize_to_height, target_dimensions,
};
pub use core::processing::scan::{is_column_border, is_row_border, mismatch_budget};

// Collaborators
pub use io::{
    ArchiveEntry, Archiver, Decoder, Encoder, StandardDecoder, StandardEncoder, TarGzArchiver,
};

// High-level API re-exports
pub use api::{
    BatchOutcome, BatchReport, EncodedImage, ImageFailure, MAX_BATCH_SIZE, SourceImage,
    iterate_image_files, output_file_name, process_batch, process_bytes,
    process_directory_to_archive, process_directory_to_path, process_file_to_path,
};
