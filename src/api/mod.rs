//! High-level, ergonomic library API: process encoded images in memory, run
//! order-stable parallel batches, and batch helpers for directories and archives.
//! Prefer these entrypoints over the low-level `core` modules when integrating TRIMPRO.
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::params::ProcessingParams;
use crate::core::processing::pipeline::{ImageJob, Pipeline};
use crate::error::{Error, Result};
use crate::io::archive::{ArchiveEntry, Archiver, TarGzArchiver};
use crate::io::decode::{Decoder, StandardDecoder, has_supported_extension};
use crate::io::encode::{Encoder, StandardEncoder};
use crate::types::OutputFormat;

/// Upper bound on inputs per batch. Enforced by the directory helpers and the
/// CLI; the pipeline itself accepts any number of jobs.
pub const MAX_BATCH_SIZE: usize = 200;

/// Name of the JSON sidecar written next to batch outputs.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// An encoded input file, named as the user supplied it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Encoded output for one source.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Name of the source this was produced from
    pub name: String,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// File name for this output: source stem plus the format's extension.
    pub fn file_name(&self) -> String {
        output_file_name(&self.name, self.format)
    }
}

/// A source that did not make it through decode, transform or encode.
#[derive(Debug)]
pub struct ImageFailure {
    pub name: String,
    pub error: Error,
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Everything a batch produced, in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub encoded: Vec<EncodedImage>,
    pub failures: Vec<ImageFailure>,
}

impl BatchOutcome {
    pub fn report(&self) -> BatchReport {
        BatchReport {
            processed: self.encoded.len(),
            skipped: 0,
            errors: self.failures.len(),
        }
    }
}

/// `photo.scan.png` + JPEG -> `photo.scan.jpg`. Names without a stem keep the
/// whole name.
pub fn output_file_name(name: &str, format: OutputFormat) -> String {
    let base = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| name.to_string());
    format!("{}.{}", base, format.extension())
}

/// File names for `images`, with `-1`, `-2`, ... appended to repeated stems so
/// no output overwrites another.
pub fn unique_file_names(images: &[EncodedImage]) -> Vec<String> {
    let mut taken = HashSet::new();
    images
        .iter()
        .map(|img| {
            let candidate = img.file_name();
            if taken.insert(candidate.clone()) {
                return candidate;
            }
            let stem = candidate
                .strip_suffix(&format!(".{}", img.format.extension()))
                .unwrap_or(&candidate)
                .to_string();
            let mut n = 1;
            loop {
                let next = format!("{}-{}.{}", stem, n, img.format.extension());
                if taken.insert(next.clone()) {
                    return next;
                }
                n += 1;
            }
        })
        .collect()
}

/// Decode, transform and encode a single source.
pub fn process_source<D, E>(
    pipeline: &Pipeline,
    source: SourceImage,
    params: &ProcessingParams,
    decoder: &D,
    encoder: &E,
) -> Result<EncodedImage>
where
    D: Decoder + ?Sized,
    E: Encoder + ?Sized,
{
    let SourceImage { name, bytes } = source;
    let decoded = decoder.decode(&bytes)?;
    drop(bytes);

    let processed = pipeline.process_job(ImageJob::new(name, decoded, params.options()))?;
    let encoded = encoder.encode(&processed.buffer, params.format, params.quality)?;
    Ok(EncodedImage {
        name: processed.name,
        format: params.format,
        width: processed.buffer.width(),
        height: processed.buffer.height(),
        bytes: encoded,
    })
}

/// Run `work` over `items` in parallel. Each result lands in the slot of its
/// input index, so the output order never depends on completion order.
fn run_indexed<T, F>(items: Vec<T>, work: F) -> BatchOutcome
where
    T: Send,
    F: Fn(T) -> (String, Result<EncodedImage>) + Sync + Send,
{
    let mut slots: Vec<Option<(String, Result<EncodedImage>)>> =
        (0..items.len()).map(|_| None).collect();
    slots
        .par_iter_mut()
        .zip(items.into_par_iter())
        .for_each(|(slot, item)| *slot = Some(work(item)));

    let mut outcome = BatchOutcome::default();
    for (name, result) in slots.into_iter().flatten() {
        match result {
            Ok(image) => outcome.encoded.push(image),
            Err(error) => {
                warn!("Error processing {}: {}", name, error);
                outcome.failures.push(ImageFailure { name, error });
            }
        }
    }
    outcome
}

/// Process every source independently and in parallel. A failing source is
/// reported in `failures` and does not affect the others. Invalid `params`
/// reject the whole batch before any source is touched.
pub fn process_batch<D, E>(
    sources: Vec<SourceImage>,
    params: &ProcessingParams,
    decoder: &D,
    encoder: &E,
) -> Result<BatchOutcome>
where
    D: Decoder + Sync + ?Sized,
    E: Encoder + Sync + ?Sized,
{
    params.validate()?;
    let pipeline = Pipeline::default();
    info!("Processing batch of {} images", sources.len());
    Ok(run_indexed(sources, |source| {
        let name = source.name.clone();
        let result = process_source(&pipeline, source, params, decoder, encoder);
        (name, result)
    }))
}

/// Process encoded bytes in memory with the standard decoder and encoder.
pub fn process_bytes(name: &str, bytes: Vec<u8>, params: &ProcessingParams) -> Result<EncodedImage> {
    params.validate()?;
    let source = SourceImage {
        name: name.to_string(),
        bytes,
    };
    process_source(
        &Pipeline::default(),
        source,
        params,
        &StandardDecoder,
        &StandardEncoder,
    )
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Process one image file to an output path using ProcessingParams
pub fn process_file_to_path(input: &Path, output: &Path, params: &ProcessingParams) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let encoded = process_bytes(&source_name(input), bytes, params)?;
    std::fs::write(output, &encoded.bytes)?;
    info!(
        "Wrote {:?} ({}x{}, {})",
        output, encoded.width, encoded.height, encoded.format
    );
    Ok(())
}

/// Image files directly inside `input_dir`, sorted by file name.
pub fn iterate_image_files(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_supported_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter())
}

/// Read and process up to [`MAX_BATCH_SIZE`] images from `input_dir`. Returns the
/// outcome plus the number of directory entries that were skipped.
fn process_directory(input_dir: &Path, params: &ProcessingParams) -> Result<(BatchOutcome, usize)> {
    params.validate()?;

    let entries = std::fs::read_dir(input_dir)?.count();
    let mut files: Vec<PathBuf> = iterate_image_files(input_dir)?.collect();
    let mut skipped = entries.saturating_sub(files.len());
    if files.len() > MAX_BATCH_SIZE {
        warn!(
            "{} images found; only the first {} are processed",
            files.len(),
            MAX_BATCH_SIZE
        );
        skipped += files.len() - MAX_BATCH_SIZE;
        files.truncate(MAX_BATCH_SIZE);
    }
    info!(
        "Starting batch processing from directory: {:?} ({} images, {} skipped)",
        input_dir,
        files.len(),
        skipped
    );

    let pipeline = Pipeline::default();
    let outcome = run_indexed(files, |path| {
        let name = source_name(&path);
        let result = std::fs::read(&path).map_err(Error::from).and_then(|bytes| {
            let source = SourceImage {
                name: name.clone(),
                bytes,
            };
            process_source(&pipeline, source, params, &StandardDecoder, &StandardEncoder)
        });
        (name, result)
    });
    Ok((outcome, skipped))
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    source: &'a str,
    file: &'a str,
    width: u32,
    height: u32,
    bytes: usize,
}

#[derive(Serialize)]
struct ManifestFailure<'a> {
    source: &'a str,
    error: String,
}

#[derive(Serialize)]
struct BatchManifest<'a> {
    generated_at: String,
    trimpro_version: &'static str,
    params: &'a ProcessingParams,
    report: BatchReport,
    outputs: Vec<ManifestEntry<'a>>,
    failures: Vec<ManifestFailure<'a>>,
}

/// JSON description of a finished batch: parameters, counters, and one record
/// per output and per failure, in input order.
pub fn batch_manifest_json(
    outcome: &BatchOutcome,
    file_names: &[String],
    params: &ProcessingParams,
    report: BatchReport,
) -> Result<String> {
    let manifest = BatchManifest {
        generated_at: chrono::Utc::now().to_rfc3339(),
        trimpro_version: env!("CARGO_PKG_VERSION"),
        params,
        report,
        outputs: outcome
            .encoded
            .iter()
            .zip(file_names)
            .map(|(img, file)| ManifestEntry {
                source: &img.name,
                file,
                width: img.width,
                height: img.height,
                bytes: img.bytes.len(),
            })
            .collect(),
        failures: outcome
            .failures
            .iter()
            .map(|f| ManifestFailure {
                source: &f.name,
                error: f.error.to_string(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&manifest)?)
}

fn first_failure(outcome: BatchOutcome) -> Option<Error> {
    outcome.failures.into_iter().next().map(|f| f.error)
}

/// Process all images in `input_dir` into `output_dir` using `params`.
/// If `continue_on_error` is true, errors are logged in the report and processing continues; otherwise, the first error (in input order) is returned and nothing is written.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ProcessingParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    let (outcome, skipped) = process_directory(input_dir, params)?;
    if !continue_on_error && !outcome.failures.is_empty() {
        return Err(first_failure(outcome).unwrap_or_else(|| Error::Processing("batch failed".into())));
    }

    let names = unique_file_names(&outcome.encoded);
    let report = BatchReport {
        skipped,
        ..outcome.report()
    };
    let manifest = batch_manifest_json(&outcome, &names, params, report)?;

    // Everything is staged next to its destination first; temp files that are
    // never persisted are removed on drop.
    std::fs::create_dir_all(output_dir)?;
    let mut staged = Vec::with_capacity(names.len() + 1);
    for (image, file_name) in outcome.encoded.iter().zip(&names) {
        staged.push((stage_in(output_dir, &image.bytes)?, output_dir.join(file_name)));
    }
    staged.push((
        stage_in(output_dir, manifest.as_bytes())?,
        output_dir.join(MANIFEST_FILE_NAME),
    ));
    for (tmp, output_path) in staged {
        tmp.persist(&output_path).map_err(|e| Error::Io(e.error))?;
        info!("Wrote {:?}", output_path);
    }

    info!(
        "Batch processing complete! processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

fn stage_in(dir: &Path, bytes: &[u8]) -> Result<tempfile::NamedTempFile> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    Ok(tmp)
}

/// Package encoded images (plus a manifest) into one archive, written atomically.
pub fn write_archive<A: Archiver + ?Sized>(
    archiver: &A,
    outcome: &BatchOutcome,
    params: &ProcessingParams,
    report: BatchReport,
    archive_path: &Path,
) -> Result<()> {
    let names = unique_file_names(&outcome.encoded);
    let mut entries: Vec<ArchiveEntry> = outcome
        .encoded
        .iter()
        .zip(&names)
        .map(|(img, name)| ArchiveEntry {
            name: name.clone(),
            bytes: img.bytes.clone(),
        })
        .collect();
    entries.push(ArchiveEntry {
        name: MANIFEST_FILE_NAME.to_string(),
        bytes: batch_manifest_json(outcome, &names, params, report)?.into_bytes(),
    });
    let bytes = archiver.archive(&entries)?;

    let parent = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;
    stage_in(parent, &bytes)?
        .persist(archive_path)
        .map_err(|e| Error::Io(e.error))?;
    info!("Created archive: {:?}", archive_path);
    Ok(())
}

/// Process all images in `input_dir` and package the outputs into a tar.gz at
/// `archive_path`. Same error policy as [`process_directory_to_path`].
pub fn process_directory_to_archive(
    input_dir: &Path,
    archive_path: &Path,
    params: &ProcessingParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    let (outcome, skipped) = process_directory(input_dir, params)?;
    if !continue_on_error && !outcome.failures.is_empty() {
        return Err(first_failure(outcome).unwrap_or_else(|| Error::Processing("batch failed".into())));
    }
    let report = BatchReport {
        skipped,
        ..outcome.report()
    };
    write_archive(&TarGzArchiver::default(), &outcome, params, report, archive_path)?;
    Ok(report)
}
