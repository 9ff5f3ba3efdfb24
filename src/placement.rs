//! Deterministic output placement.
//!
//! Three decisions are made here for every archive:
//! - the shared base name for both output files (slug chain with a
//!   timestamped fallback)
//! - the destination directory (`year/month` bucket from the disambiguated
//!   creation timestamp, `unsorted` when no confident guess exists, no bucket
//!   in flat mode)
//! - the collision-free file name (`base.ext`, then `base-1.ext`, `base-2.ext`,
//!   … probed against live filesystem state)
//!
//! The collision probe is check-then-write and assumes this process is the
//! sole writer to its output directories for the duration of a run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};

use crate::metadata::MetadataDocument;
use crate::slug::slugify;
use crate::sniff;

/// Bucket directory used when the creation timestamp cannot be disambiguated.
pub const UNSORTED_BUCKET: &str = "unsorted";

/// Derive the shared base name for an archive's output files.
///
/// Chain: slug of the original media filename, else slug of the archive's own
/// file stem, else a timestamped fallback that cannot collide across runs.
pub fn base_name(metadata: &MetadataDocument, archive_path: &Path) -> String {
    if let Some(name) = metadata.original_media_filename.as_deref() {
        let slug = slugify(name);
        if !slug.is_empty() {
            return slug;
        }
    }
    if let Some(stem) = archive_path.file_stem().and_then(|s| s.to_str()) {
        let slug = slugify(stem);
        if !slug.is_empty() {
            return slug;
        }
    }
    format!("recording-{}", Utc::now().timestamp_micros())
}

/// Decide the audio file extension: a sane declared extension wins, otherwise
/// the payload's magic bytes are sniffed.
pub fn audio_extension(metadata: &MetadataDocument, payload: &[u8]) -> String {
    metadata
        .original_media_file_extension
        .as_deref()
        .and_then(sniff::sanitize_extension)
        .unwrap_or_else(|| sniff::sniff_audio_extension(payload).to_string())
}

/// Resolve the destination directory under `root` for an archive created at
/// the given (already epoch-disambiguated) instant.
///
/// Callers resolve the raw timestamp once per archive and pass the same
/// instant for every output root, so the audio and transcript files always
/// share one bucket.
pub fn bucket_dir(root: &Path, created: Option<DateTime<Utc>>, flat: bool) -> PathBuf {
    if flat {
        return root.to_path_buf();
    }
    match created {
        Some(dt) => root
            .join(dt.year().to_string())
            .join(format!("{:02}", dt.month())),
        None => root.join(UNSORTED_BUCKET),
    }
}

/// Find the first free `base.ext` / `base-N.ext` name in `dir`.
///
/// The suffix sequence is deterministic and monotonic (1, 2, 3, …), so
/// repeated runs over a growing output directory never overwrite earlier
/// conversions.
pub fn unique_path(dir: &Path, base: &str, ext: &str) -> PathBuf {
    let first = dir.join(format!("{base}.{ext}"));
    if !first.exists() {
        return first;
    }
    let mut n = 1u64;
    loop {
        let candidate = dir.join(format!("{base}-{n}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
