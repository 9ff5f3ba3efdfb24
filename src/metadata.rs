//! The raw metadata document embedded in a recording archive.
//!
//! These types mirror the producer's JSON as faithfully as possible rather than
//! the output schema. Fields the producer has been known to omit or to emit
//! with surprising types (timestamps as numbers *or* strings, offsets as
//! arbitrary JSON) are kept as raw [`Value`]s and interpreted later, so that a
//! quirky-but-readable archive never fails deserialization outright.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The parsed `metadata.json` entry of an archive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataDocument {
    /// Human-entered title of the recording, e.g. `"Episode 1!"`.
    pub original_media_filename: Option<String>,

    /// Declared extension of the original audio, e.g. `"m4a"`. Preferred over
    /// sniffing the payload when present and sane.
    pub original_media_file_extension: Option<String>,

    /// Quality-tier identifier of the transcription model.
    pub model_tier: Option<String>,

    /// Engine name, used when no tier identifier is present.
    pub engine: Option<String>,

    /// Creation timestamp. Unit and epoch base vary across producer versions,
    /// so this stays raw; see [`crate::timestamp::resolve_epoch`].
    pub date_created: Option<Value>,

    /// Update timestamp, same caveats as `date_created`.
    pub date_updated: Option<Value>,

    /// Optional archive-wide start-time offset added to every segment and word.
    pub start_time: Option<StartOffset>,

    /// Speaker list, passed through to the transcript document verbatim.
    pub speakers: Vec<Value>,

    /// Raw segments, in producer order.
    pub transcripts: Vec<RawSegment>,
}

impl MetadataDocument {
    /// The model identifier for the transcript document.
    ///
    /// Preference order: quality-tier id, then engine name, then `"unknown"`.
    /// Empty strings count as absent (the producer emits `""` for both fields
    /// on some older archives).
    pub fn model(&self) -> String {
        self.model_tier
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.engine.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("unknown")
            .to_string()
    }

    /// The global offset in milliseconds, zero when no offset is declared.
    pub fn global_offset_ms(&self) -> f64 {
        self.start_time
            .map(|offset| offset.total_milliseconds())
            .unwrap_or(0.0)
    }
}

/// Structured start-time offset: hours/minutes/seconds/milliseconds, each
/// optional and defaulting to zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct StartOffset {
    pub hours: Option<f64>,
    pub minutes: Option<f64>,
    pub seconds: Option<f64>,
    pub milliseconds: Option<f64>,
}

impl StartOffset {
    /// Collapse the structured offset into total milliseconds.
    pub fn total_milliseconds(&self) -> f64 {
        self.hours.unwrap_or(0.0) * 3_600_000.0
            + self.minutes.unwrap_or(0.0) * 60_000.0
            + self.seconds.unwrap_or(0.0) * 1_000.0
            + self.milliseconds.unwrap_or(0.0)
    }
}

/// A raw transcript segment as the producer wrote it.
///
/// `start`/`end` are millisecond offsets relative to the archive, before the
/// global offset is applied. They stay as raw values here: the builder drops
/// the whole segment when either bound is not a finite number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSegment {
    pub id: Option<Value>,
    pub start: Option<Value>,
    pub end: Option<Value>,
    pub text: Option<String>,
    pub speaker: Option<SpeakerRef>,
    pub words: Vec<RawWord>,
}

/// A speaker reference embedded in a segment. Referenced by id from segments,
/// never owned by them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeakerRef {
    pub id: Option<Value>,
    pub name: Option<String>,
}

/// A raw per-word timing entry. A word missing either offset is dropped by the
/// builder, not clamped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawWord {
    pub start: Option<Value>,
    pub end: Option<Value>,
    pub text: Option<String>,
}
