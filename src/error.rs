use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Decant's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Decant's crate-wide error type.
///
/// Two tiers matter to callers:
/// - `NoArchivesFound` is fatal: the batch driver refuses to run an empty batch.
/// - Everything else is scoped to a single archive and is caught by the batch
///   driver, recorded as a per-archive failure, and never aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no archives found under '{0}'")]
    NoArchivesFound(PathBuf),

    #[error("'{path}' has no 'metadata.json' entry")]
    MissingMetadata { path: PathBuf },

    #[error("'{path}' has no 'originalAudio' entry")]
    MissingAudioPayload { path: PathBuf },

    #[error("malformed metadata in '{path}': {source}")]
    MalformedMetadata {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read archive '{path}': {source}")]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
