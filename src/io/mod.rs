//! I/O layer around the in-memory core: the `Decoder`, `Encoder` and `Archiver`
//! seams with their standard implementations, and the per-format `writers`.
pub mod archive;
pub use archive::{ArchiveEntry, Archiver, DEFAULT_ARCHIVE_NAME, TarGzArchiver};

pub mod decode;
pub use decode::{Decoder, StandardDecoder};

pub mod encode;
pub use encode::{Encoder, StandardEncoder};

pub mod writers;
