use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{error, info, warn};

use crate::batch::{self, BatchSummary};
use crate::cli::args::{ConvertImgArgs, ConvertImgsArgs};
use crate::image_pipeline::{ConversionError, RawToTiffPipeline, Result};

/// Single-file mode: convert one RAW file to an explicit destination.
/// The first error terminates the run.
pub fn run_single(args: ConvertImgArgs) -> Result<()> {
    let job = batch::single_job(&args.input, &args.output)?;
    let pipeline = RawToTiffPipeline::new(args.options.to_config())?;

    pipeline.convert_file(&job.source, &job.destination)?;
    if !args.options.no_verify {
        verify_output(&job.destination)?;
    }

    info!("Wrote {}", job.destination.display());
    Ok(())
}

/// Batch mode: convert every candidate file in the directory, isolating
/// per-file failures unless `--fail-fast` was given, and report a summary.
pub fn run_batch(args: ConvertImgsArgs) -> Result<BatchSummary> {
    let jobs = batch::resolve_batch(&args.directory, &args.extensions)?;
    let pipeline = RawToTiffPipeline::new(args.options.to_config())?;

    let mut summary = BatchSummary {
        total: jobs.len(),
        ..Default::default()
    };

    info!(
        "Converting {} file(s) from {}",
        summary.total,
        args.directory.display()
    );

    for (index, job) in jobs.iter().enumerate() {
        info!(
            "[{}/{}] {}",
            index + 1,
            summary.total,
            job.source.display()
        );

        let result = pipeline
            .convert_file(&job.source, &job.destination)
            .and_then(|()| {
                if args.options.no_verify {
                    Ok(())
                } else {
                    verify_output(&job.destination)
                }
            });

        match result {
            Ok(()) => summary.record_success(),
            Err(e) => {
                error!("{}: {}", job.source.display(), e);
                summary.record_failure(job.source.clone(), e);
                if args.fail_fast {
                    warn!("Aborting batch after first failure");
                    break;
                }
            }
        }
    }

    report(&summary);
    Ok(summary)
}

fn report(summary: &BatchSummary) {
    info!(
        "Batch complete: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed()
    );
    for (path, error) in &summary.failures {
        warn!("{} did NOT convert: {}", path.display(), error);
    }
}

/// Re-open a written file and confirm it parses as a TIFF.
fn verify_output(path: &Path) -> Result<()> {
    let file = File::open(path)
        .map_err(|e| ConversionError::WriteError(format!("{}: {}", path.display(), e)))?;
    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file)).map_err(|e| {
        ConversionError::EncodeError(format!(
            "{} is not a readable TIFF: {}",
            path.display(),
            e
        ))
    })?;
    decoder.dimensions().map_err(|e| {
        ConversionError::EncodeError(format!(
            "{} is not a readable TIFF: {}",
            path.display(),
            e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::cli::args::ConvertOptions;

    use super::*;

    fn batch_args(directory: PathBuf, fail_fast: bool) -> ConvertImgsArgs {
        ConvertImgsArgs {
            directory,
            fail_fast,
            extensions: Vec::new(),
            options: ConvertOptions::default(),
        }
    }

    #[test]
    fn single_mode_surfaces_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConvertImgArgs {
            input: dir.path().join("missing.CR2"),
            output: dir.path().join("out.tif"),
            options: ConvertOptions::default(),
        };

        let err = run_single(args).unwrap_err();
        assert!(matches!(err, ConversionError::InputNotFound(_)));
    }

    #[test]
    fn single_mode_reports_decode_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.CR2");
        fs::write(&input, b"definitely not sensor data").unwrap();

        let args = ConvertImgArgs {
            input,
            output: dir.path().join("out.tif"),
            options: ConvertOptions::default(),
        };

        let err = run_single(args).unwrap_err();
        assert!(matches!(err, ConversionError::DecodeError(_)));
    }

    #[test]
    fn batch_isolates_per_file_failures() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.CR2", "b.CR2", "c.CR2"] {
            fs::write(dir.path().join(name), b"not an image").unwrap();
        }

        let summary = run_batch(batch_args(dir.path().to_path_buf(), false)).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed(), 3);
        for (_, error) in &summary.failures {
            assert_eq!(error.kind(), "DecodeError");
        }
    }

    #[test]
    fn batch_fail_fast_stops_after_first_error() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.CR2", "b.CR2", "c.CR2"] {
            fs::write(dir.path().join(name), b"not an image").unwrap();
        }

        let summary = run_batch(batch_args(dir.path().to_path_buf(), true)).unwrap();
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.succeeded, 0);
    }

    #[test]
    fn batch_on_missing_directory_errors_out() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_batch(batch_args(dir.path().join("nope"), false)).unwrap_err();
        assert!(matches!(err, ConversionError::InputNotFound(_)));
    }

    #[test]
    fn verify_rejects_non_tiff_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tif");
        fs::write(&path, b"II*\0truncated").unwrap();

        let err = verify_output(&path).unwrap_err();
        assert!(matches!(err, ConversionError::EncodeError(_)));
    }
}
