use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::info;

use crate::error::{Error, Result};

/// Default file name for a packaged batch.
pub const DEFAULT_ARCHIVE_NAME: &str = "processed_images.tar.gz";

/// One file to place in an archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Packages many named outputs into one archive.
pub trait Archiver {
    fn archive(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>>;
}

/// Gzip-compressed tarball, entries in the order given.
#[derive(Debug, Clone, Copy)]
pub struct TarGzArchiver {
    pub compression: Compression,
}

impl Default for TarGzArchiver {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
        }
    }
}

impl Archiver for TarGzArchiver {
    fn archive(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
        let mut tar_bytes = Vec::new();
        {
            let gz = GzEncoder::new(&mut tar_bytes, self.compression);
            let mut tar = tar::Builder::new(gz);
            let mtime = chrono::Utc::now().timestamp().max(0) as u64;

            for entry in entries {
                let mut header = tar::Header::new_gnu();
                header.set_size(entry.bytes.len() as u64);
                header.set_mode(0o644);
                header.set_mtime(mtime);
                header.set_cksum();
                tar.append_data(&mut header, &entry.name, entry.bytes.as_slice())
                    .map_err(|e| Error::Archive(format!("{}: {}", entry.name, e)))?;
            }

            tar.into_inner()
                .and_then(|gz| gz.finish())
                .map_err(|e| Error::Archive(e.to_string()))?;
        }

        info!(
            entries = entries.len(),
            size_bytes = tar_bytes.len(),
            "Archive created"
        );
        Ok(tar_bytes)
    }
}
