//! Reading a recording archive.
//!
//! An archive is a zip container with exactly two entries we care about:
//! `metadata.json` (the UTF-8 metadata document) and `originalAudio` (raw
//! audio bytes, left uninterpreted). Everything else in the container is
//! ignored. Reading is side-effect free.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::metadata::MetadataDocument;

/// Name of the metadata entry inside an archive.
pub const METADATA_ENTRY: &str = "metadata.json";

/// Name of the audio payload entry inside an archive.
pub const AUDIO_ENTRY: &str = "originalAudio";

/// The two payloads extracted from one archive.
#[derive(Debug)]
pub struct ArchivePayload {
    pub metadata: MetadataDocument,
    pub audio: Vec<u8>,
}

/// Open the archive at `path` and extract its metadata document and audio
/// payload.
///
/// Fails with [`Error::MissingMetadata`] / [`Error::MissingAudioPayload`] when
/// a required entry is absent, and [`Error::MalformedMetadata`] when the
/// metadata entry is not valid JSON.
pub fn read_archive(path: &Path) -> Result<ArchivePayload> {
    let file = File::open(path)?;
    let mut zip = ZipArchive::new(file).map_err(|source| Error::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata_bytes =
        read_entry(&mut zip, METADATA_ENTRY, path)?.ok_or_else(|| Error::MissingMetadata {
            path: path.to_path_buf(),
        })?;
    let metadata: MetadataDocument =
        serde_json::from_slice(&metadata_bytes).map_err(|source| Error::MalformedMetadata {
            path: path.to_path_buf(),
            source,
        })?;

    let audio =
        read_entry(&mut zip, AUDIO_ENTRY, path)?.ok_or_else(|| Error::MissingAudioPayload {
            path: path.to_path_buf(),
        })?;

    Ok(ArchivePayload { metadata, audio })
}

/// Upper bound on the buffer capacity reserved from an entry's declared size.
/// The declared size is untrusted; a corrupt header must not be able to force
/// a huge allocation before any byte is read. Larger payloads still work,
/// `read_to_end` grows the buffer as real bytes arrive.
const ENTRY_PREALLOC_CAP: u64 = 16 * 1024 * 1024;

fn prealloc(declared_size: u64) -> usize {
    declared_size.min(ENTRY_PREALLOC_CAP) as usize
}

/// Read one named entry to a buffer, distinguishing "entry absent" (`Ok(None)`)
/// from a corrupt container (`Err`).
fn read_entry<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
    path: &Path,
) -> Result<Option<Vec<u8>>> {
    match zip.by_name(name) {
        Ok(mut entry) => {
            let mut buf = Vec::with_capacity(prealloc(entry.size()));
            entry.read_to_end(&mut buf)?;
            Ok(Some(buf))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(source) => Err(Error::Archive {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prealloc_clamps_untrusted_declared_sizes() {
        assert_eq!(prealloc(0), 0);
        assert_eq!(prealloc(4096), 4096);
        assert_eq!(prealloc(ENTRY_PREALLOC_CAP), ENTRY_PREALLOC_CAP as usize);
        assert_eq!(prealloc(u64::MAX), ENTRY_PREALLOC_CAP as usize);
    }
}
