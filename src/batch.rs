//! Input resolution and output naming.
//!
//! Turns a single file or a source directory into [`ConversionJob`]s. In
//! directory mode the destination is a `TIFF` subdirectory beneath the
//! source, created up front, with each output named after the source file's
//! base name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::{ConversionError, Result};

/// Batch outputs land in this subdirectory of the source directory.
pub const OUTPUT_SUBDIR: &str = "TIFF";

/// One source file paired with its destination. Immutable; consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<(PathBuf, ConversionError)>,
}

impl BatchSummary {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, source: PathBuf, error: ConversionError) {
        self.failures.push((source, error));
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Derive the output file name from a source path: final path segment,
/// everything from the first `.` dropped, `.tif` appended.
///
/// The first-dot split is deliberate: multi-dot names collapse to the
/// leading component (`a.b.c.CR2` becomes `a.tif`), which is what the
/// downstream tooling expects.
pub fn derive_tiff_name(source: &Path) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = file_name.split('.').next().unwrap_or_default();
    format!("{base}.tif")
}

/// Resolve single-file mode: the input must name an existing regular file.
pub fn single_job(input: &Path, output: &Path) -> Result<ConversionJob> {
    if !input.is_file() {
        return Err(ConversionError::InputNotFound(input.to_path_buf()));
    }
    Ok(ConversionJob {
        source: input.to_path_buf(),
        destination: output.to_path_buf(),
    })
}

/// Resolve batch mode: enumerate every regular file in `directory` and pair
/// it with a destination under `directory/TIFF/`, creating that directory
/// if needed.
///
/// With an empty `extensions` list every file is a candidate and
/// non-images fail later at decode; a non-empty list filters case-
/// insensitively on the trailing extension.
pub fn resolve_batch(directory: &Path, extensions: &[String]) -> Result<Vec<ConversionJob>> {
    if !directory.is_dir() {
        return Err(ConversionError::InputNotFound(directory.to_path_buf()));
    }

    let output_dir = directory.join(OUTPUT_SUBDIR);
    fs::create_dir_all(&output_dir).map_err(|e| {
        ConversionError::OutputDirCreateError(format!("{}: {}", output_dir.display(), e))
    })?;

    let mut sources: Vec<PathBuf> = fs::read_dir(directory)
        .map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", directory.display(), e))
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| matches_extension(path, extensions))
        .collect();
    sources.sort();

    debug!(
        "Resolved {} candidate file(s) in {}",
        sources.len(),
        directory.display()
    );

    Ok(sources
        .into_iter()
        .map(|source| {
            let destination = output_dir.join(derive_tiff_name(&source));
            ConversionJob {
                source,
                destination,
            }
        })
        .collect())
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    extensions.iter().any(|e| e.to_ascii_lowercase() == ext)
}
