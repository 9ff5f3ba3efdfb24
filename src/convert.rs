//! The per-archive conversion pipeline.
//!
//! Wires the lower-level pieces together for one archive: read the container,
//! build the transcript document, resolve output paths, and (unless dry-run)
//! write both artifacts. Everything constructed here is discarded once the
//! [`Conversion`] record is returned; the only state that outlives a call is
//! whatever landed on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive;
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::placement;
use crate::timestamp;
use crate::transcript;

/// The per-archive result record.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Path of the source archive.
    pub source: PathBuf,

    /// Resolved path of the extracted audio file.
    pub audio_path: PathBuf,

    /// Resolved path of the transcript JSON document.
    pub transcript_path: PathBuf,

    /// Number of segments that survived filtering.
    pub segment_count: usize,

    /// Last surviving segment's end minus the first's start, in seconds.
    /// Zero when no segments survived.
    pub duration_seconds: f64,
}

/// Convert one archive.
///
/// In dry-run mode the same path resolution runs (including the live collision
/// probe), but no directory is created and no file is written.
pub fn convert_archive(path: &Path, opts: &Opts) -> Result<Conversion> {
    let payload = archive::read_archive(path)?;
    let document = transcript::build(&payload.metadata);

    let base = placement::base_name(&payload.metadata, path);
    let ext = placement::audio_extension(&payload.metadata, &payload.audio);
    // Disambiguate the creation timestamp once so both outputs share a bucket
    // even when the tie-break sits on a boundary.
    let created = payload
        .metadata
        .date_created
        .as_ref()
        .and_then(timestamp::resolve_epoch);
    let audio_dir = placement::bucket_dir(&opts.audio_dir, created, opts.flat);
    let transcript_dir = placement::bucket_dir(&opts.transcript_dir, created, opts.flat);
    tracing::debug!(
        base = %base,
        ext = %ext,
        audio_dir = %audio_dir.display(),
        transcript_dir = %transcript_dir.display(),
        "resolved placement"
    );

    if !opts.dry_run {
        create_dir(&audio_dir)?;
        create_dir(&transcript_dir)?;
    }

    let audio_path = placement::unique_path(&audio_dir, &base, &ext);
    let transcript_path = placement::unique_path(&transcript_dir, &base, "json");

    if !opts.dry_run {
        fs::write(&audio_path, &payload.audio).map_err(|source| Error::Write {
            path: audio_path.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&transcript_path, json).map_err(|source| Error::Write {
            path: transcript_path.clone(),
            source,
        })?;
    }

    let duration_seconds = match (document.segments.first(), document.segments.last()) {
        (Some(first), Some(last)) => last.end - first.start,
        _ => 0.0,
    };

    Ok(Conversion {
        source: path.to_path_buf(),
        audio_path,
        transcript_path,
        segment_count: document.segments.len(),
        duration_seconds,
    })
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })
}
