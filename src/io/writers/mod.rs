//! Format writers: JPEG (`jpeg-encoder`), TIFF (`tiff`), and lossless PNG/WebP
//! through the `image` crate. Each turns RGBA samples into encoded bytes.
pub mod jpeg;
pub mod raster;
pub mod tiff;
