//! Core processing building blocks: the pixel buffer, border scanning and crop
//! resolution, enhancement, resizing, and the per-image pipeline. These are pure
//! in-memory primitives consumed by the high-level `api` module.
pub mod buffer;
pub mod params;
pub mod processing;
