use std::path::PathBuf;

/// Options that control how archives are converted and placed.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The CLI maps user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs, embedding apps) can construct options
///   programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// Directory that receives extracted audio payloads.
    pub audio_dir: PathBuf,

    /// Directory that receives transcript JSON documents.
    pub transcript_dir: PathBuf,

    /// Skip the `year/month` bucketing and write directly into the output
    /// directories.
    pub flat: bool,

    /// Resolve and report output paths without creating directories or writing
    /// any file.
    pub dry_run: bool,
}
