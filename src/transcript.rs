//! Building the portable transcript document from raw archive metadata.
//!
//! The output schema is flat and boring on purpose: downstream note-taking
//! consumers only understand second-based timings, trimmed text, and nullable
//! speakers. All of the producer's quirks (millisecond offsets, partial
//! timings, embedded speaker objects) are normalized away here.
//!
//! One deliberate non-normalization: `createdAt`/`updatedAt` are passed through
//! verbatim, still in whatever ambiguous encoding the producer used. Epoch
//! disambiguation is only applied for directory bucketing; downstream
//! consumers get the raw values untouched.

use serde::Serialize;
use serde_json::Value;

use crate::metadata::{MetadataDocument, SpeakerRef};
use crate::timestamp;

/// Constant producer tag written into every transcript document.
pub const SOURCE_TAG: &str = "macwhisper";

/// The flat transcript document consumed by note-taking workflows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptDocument {
    pub source: &'static str,
    pub model: String,
    pub created_at: Option<Value>,
    pub updated_at: Option<Value>,
    pub speakers: Vec<Value>,
    pub segments: Vec<Segment>,
}

/// A normalized segment: second-based bounds, trimmed text, nullable speaker.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub id: Value,
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// `null` (not omitted) when the raw segment carried no speaker reference.
    pub speaker: Option<SpeakerRef>,
    pub words: Vec<Word>,
}

/// A normalized word timing entry.
#[derive(Debug, Clone, Serialize)]
pub struct Word {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Build the transcript document for one archive.
///
/// Drop rules:
/// - a segment missing a finite start *or* end is dropped entirely
/// - a word missing either offset is dropped, never clamped
///
/// Segment identity is the source id when present, else the zero-based index
/// in the *pre-filter* sequence, so ids stay stable when siblings are dropped.
pub fn build(metadata: &MetadataDocument) -> TranscriptDocument {
    let offset_ms = metadata.global_offset_ms();

    let segments = metadata
        .transcripts
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let start = timestamp::offset_seconds(raw.start.as_ref(), offset_ms)?;
            let end = timestamp::offset_seconds(raw.end.as_ref(), offset_ms)?;

            let words = raw
                .words
                .iter()
                .filter_map(|word| {
                    let start = timestamp::offset_seconds(word.start.as_ref(), offset_ms)?;
                    let end = timestamp::offset_seconds(word.end.as_ref(), offset_ms)?;
                    Some(Word {
                        start,
                        end,
                        text: word.text.clone().unwrap_or_default(),
                    })
                })
                .collect();

            Some(Segment {
                id: raw.id.clone().unwrap_or_else(|| Value::from(index)),
                start,
                end,
                text: raw.text.as_deref().map(str::trim).unwrap_or_default().to_string(),
                speaker: raw.speaker.clone(),
                words,
            })
        })
        .collect();

    TranscriptDocument {
        source: SOURCE_TAG,
        model: metadata.model(),
        created_at: metadata.date_created.clone(),
        updated_at: metadata.date_updated.clone(),
        speakers: metadata.speakers.clone(),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(json: serde_json::Value) -> MetadataDocument {
        serde_json::from_value(json).expect("test metadata should deserialize")
    }

    #[test]
    fn converts_millis_to_seconds_and_trims_text() {
        let doc = build(&metadata(json!({
            "transcripts": [{"start": 1000, "end": 2000, "text": " Hello "}]
        })));
        assert_eq!(doc.segments.len(), 1);
        let seg = &doc.segments[0];
        assert_eq!(seg.start, 1.0);
        assert_eq!(seg.end, 2.0);
        assert_eq!(seg.text, "Hello");
        assert!(seg.speaker.is_none());
    }

    #[test]
    fn drops_segments_with_partial_bounds() {
        let doc = build(&metadata(json!({
            "transcripts": [
                {"start": 0, "end": 500, "text": "kept"},
                {"start": 600, "text": "no end"},
                {"end": 900, "text": "no start"},
                {"start": "1000", "end": 2000, "text": "stringly start"},
                {"start": 1000, "end": 2000, "text": "kept too"}
            ]
        })));
        let texts: Vec<&str> = doc.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["kept", "kept too"]);
    }

    #[test]
    fn segment_ids_use_prefilter_index() {
        let doc = build(&metadata(json!({
            "transcripts": [
                {"start": 0, "text": "dropped"},
                {"start": 100, "end": 200},
                {"id": "abc", "start": 300, "end": 400}
            ]
        })));
        assert_eq!(doc.segments[0].id, json!(1));
        assert_eq!(doc.segments[1].id, json!("abc"));
    }

    #[test]
    fn words_require_both_offsets() {
        let doc = build(&metadata(json!({
            "transcripts": [{
                "start": 0, "end": 1000,
                "words": [
                    {"start": 0, "end": 400, "text": "yes"},
                    {"start": 400, "text": "half"},
                    {"end": 900, "text": "other half"},
                    {"text": "none"}
                ]
            }]
        })));
        let words = &doc.segments[0].words;
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "yes");
    }

    #[test]
    fn applies_global_offset_to_segments_and_words() {
        let doc = build(&metadata(json!({
            "startTime": {"minutes": 1, "milliseconds": 500},
            "transcripts": [{
                "start": 1000, "end": 2000,
                "words": [{"start": 1000, "end": 1500, "text": "hi"}]
            }]
        })));
        let seg = &doc.segments[0];
        assert_eq!(seg.start, 61.5);
        assert_eq!(seg.end, 62.5);
        assert_eq!(seg.words[0].start, 61.5);
        assert_eq!(seg.words[0].end, 62.0);
    }

    #[test]
    fn timestamps_and_speakers_pass_through_verbatim() {
        let doc = build(&metadata(json!({
            "dateCreated": "978307200",
            "dateUpdated": 1700000000000i64,
            "speakers": [{"id": "s1", "name": "Ana"}],
            "transcripts": []
        })));
        assert_eq!(doc.created_at, Some(json!("978307200")));
        assert_eq!(doc.updated_at, Some(json!(1700000000000i64)));
        assert_eq!(doc.speakers, vec![json!({"id": "s1", "name": "Ana"})]);
    }

    #[test]
    fn absent_speaker_serializes_as_null() -> anyhow::Result<()> {
        let doc = build(&metadata(json!({
            "transcripts": [{"start": 0, "end": 100}]
        })));
        let value = serde_json::to_value(&doc)?;
        assert_eq!(value["segments"][0]["speaker"], json!(null));
        assert_eq!(value["source"], json!(SOURCE_TAG));
        Ok(())
    }
}
