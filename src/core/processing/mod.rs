//! Transform stages: row/column scanning, border detection, crop resolution,
//! enhancement, resizing, and the pipeline that chains them.
pub mod border;
pub mod crop;
pub mod enhance;
pub mod pipeline;
pub mod resize;
pub mod scan;
