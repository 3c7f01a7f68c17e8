use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid quality: {quality}. Must be between 0.0 and 1.0")]
    InvalidQuality { quality: f32 },

    #[error("Target height must be greater than 0, got: {height}")]
    ZeroHeight { height: u32 },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Output path would overwrite the input: {path}")]
    OutputIsInput { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Trimpro(#[from] trimpro::Error),
}
