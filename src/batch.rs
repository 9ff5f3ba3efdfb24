//! The batch driver: archive discovery and failure-isolated conversion.
//!
//! One archive is the unit of work and of failure. Any error below this module
//! is caught, recorded as a per-archive failure entry, and never aborts the
//! rest of the batch. The only fatal condition is an empty batch.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::convert::{self, Conversion};
use crate::error::{Error, Result};
use crate::opts::Opts;

/// File extension of a recording archive, matched case-insensitively.
pub const ARCHIVE_EXTENSION: &str = "whisper";

/// One failed archive: path plus the rendered error.
#[derive(Debug, Clone)]
pub struct Failure {
    pub source: PathBuf,
    pub message: String,
}

/// The aggregate result of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub conversions: Vec<Conversion>,
    pub failures: Vec<Failure>,
}

impl BatchSummary {
    /// Whether at least one archive failed; drives the process exit status.
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Find every archive under `input`.
///
/// A single file is taken as-is when its extension matches; a directory is
/// walked recursively, depth-first, in platform listing order (not sorted).
/// Zero matches fail the whole run.
pub fn discover(input: &Path) -> Result<Vec<PathBuf>> {
    let file_type = fs::metadata(input)?.file_type();

    let mut archives = Vec::new();
    if file_type.is_file() {
        if is_archive(input) {
            archives.push(input.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(input) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && is_archive(entry.path()) {
                archives.push(entry.into_path());
            }
        }
    }

    if archives.is_empty() {
        return Err(Error::NoArchivesFound(input.to_path_buf()));
    }
    Ok(archives)
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

/// Run the whole batch, invoking `report` once per archive as it completes.
///
/// The callback receives the source path and a borrowed per-archive outcome so
/// frontends can stream one line per archive; the same information is also
/// collected into the returned summary.
pub fn run_with_progress<F>(input: &Path, opts: &Opts, mut report: F) -> Result<BatchSummary>
where
    F: FnMut(&Path, std::result::Result<&Conversion, &Error>),
{
    let archives = discover(input)?;
    tracing::info!(count = archives.len(), input = %input.display(), "starting batch");

    let mut summary = BatchSummary::default();
    for path in archives {
        match convert::convert_archive(&path, opts) {
            Ok(conversion) => {
                tracing::info!(
                    source = %path.display(),
                    transcript = %conversion.transcript_path.display(),
                    segments = conversion.segment_count,
                    "converted archive"
                );
                report(&path, Ok(&conversion));
                summary.conversions.push(conversion);
            }
            Err(err) => {
                tracing::warn!(source = %path.display(), error = %err, "archive failed");
                report(&path, Err(&err));
                summary.failures.push(Failure {
                    source: path,
                    message: err.to_string(),
                });
            }
        }
    }
    Ok(summary)
}

/// [`run_with_progress`] without a progress callback.
pub fn run(input: &Path, opts: &Opts) -> Result<BatchSummary> {
    run_with_progress(input, opts, |_, _| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_archive(Path::new("a/rec.whisper")));
        assert!(is_archive(Path::new("a/rec.WHISPER")));
        assert!(!is_archive(Path::new("a/rec.zip")));
        assert!(!is_archive(Path::new("a/whisper")));
    }

    #[test]
    fn empty_directory_fails_discovery() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoArchivesFound(_)));
        Ok(())
    }

    #[test]
    fn single_file_with_wrong_extension_fails_discovery() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("not-an-archive.zip");
        std::fs::write(&path, b"")?;
        let err = discover(&path).unwrap_err();
        assert!(matches!(err, Error::NoArchivesFound(_)));
        Ok(())
    }

    #[test]
    fn discovery_recurses_into_subdirectories() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("2024").join("drafts");
        std::fs::create_dir_all(&nested)?;
        std::fs::write(nested.join("one.whisper"), b"")?;
        std::fs::write(dir.path().join("two.WHISPER"), b"")?;
        std::fs::write(dir.path().join("ignored.txt"), b"")?;

        let found = discover(dir.path())?;
        assert_eq!(found.len(), 2);
        Ok(())
    }
}
