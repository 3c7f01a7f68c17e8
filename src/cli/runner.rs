use tracing::info;
use tracing_subscriber::EnvFilter;

use trimpro::io::DEFAULT_ARCHIVE_NAME;
use trimpro::{
    ProcessingParams, process_directory_to_archive, process_directory_to_path,
    process_file_to_path,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Start from the `--config` preset (or defaults) and apply explicit flags.
pub fn resolve_params(args: &CliArgs) -> Result<ProcessingParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading preset: {:?}", path);
            ProcessingParams::from_json_file(path)?
        }
        None => ProcessingParams::default(),
    };

    if let Some(tolerance) = args.tolerance {
        params.tolerance = tolerance.into();
    }
    if let Some(format) = args.format {
        params.format = format;
    }
    if let Some(quality) = args.quality {
        if !(0.0..=1.0).contains(&quality) {
            return Err(AppError::InvalidQuality { quality });
        }
        params.quality = quality;
    }
    if args.enhance {
        params.enhance = true;
    } else if args.no_enhance {
        params.enhance = false;
    }
    if let Some(height) = args.target_height {
        if height == 0 {
            return Err(AppError::ZeroHeight { height });
        }
        params.target_height = height;
    }

    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let params = resolve_params(&args)?;
    info!(
        "Parameters: tolerance={} format={} quality={} enhance={} target_height={}",
        params.tolerance, params.format, params.quality, params.enhance, params.target_height
    );

    if let Some(path) = &args.save_config {
        params.to_json_file(path)?;
        info!("Saved preset: {:?}", path);
    }

    if let Some(input_dir) = args.input_dir {
        let continue_on_error = !args.fail_fast;
        let report = if let Some(mut archive) = args.archive {
            if archive.is_dir() {
                archive.push(DEFAULT_ARCHIVE_NAME);
            }
            info!("Archive: {:?}", archive);
            process_directory_to_archive(&input_dir, &archive, &params, continue_on_error)?
        } else {
            let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
                arg: "--output-dir or --archive".to_string(),
            })?;
            info!("Output directory: {:?}", output_dir);
            process_directory_to_path(&input_dir, &output_dir, &params, continue_on_error)?
        };

        println!(
            "processed={} skipped={} errors={}",
            report.processed, report.skipped, report.errors
        );
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = match args.output {
            Some(output) => output,
            None => input.with_extension(params.format.extension()),
        };
        if output == input {
            return Err(AppError::OutputIsInput {
                path: input.display().to_string(),
            }
            .into());
        }

        process_file_to_path(&input, &output, &params)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }

    Ok(())
}
