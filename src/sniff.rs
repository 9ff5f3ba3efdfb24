//! Audio container sniffing.
//!
//! This is a tiny signature → extension lookup over the first bytes of the
//! payload, not a media-type library. Only three signatures matter for the
//! archives we see in practice; everything else falls back to `m4a`, the
//! producer's dominant container.

/// Number of leading payload bytes consulted by the sniffer.
pub const SNIFF_LEN: usize = 12;

/// Default extension when neither metadata nor the payload identify the format.
pub const FALLBACK_EXTENSION: &str = "m4a";

/// Sniff the audio payload's file extension from its magic bytes.
pub fn sniff_audio_extension(payload: &[u8]) -> &'static str {
    let head = &payload[..payload.len().min(SNIFF_LEN)];
    if head.starts_with(b"RIFF") {
        return "wav";
    }
    if head.len() >= 8 && &head[4..8] == b"ftyp" {
        return "m4a";
    }
    if head.starts_with(b"ID3") {
        return "mp3";
    }
    FALLBACK_EXTENSION
}

/// Sanitize an extension declared in metadata: strip dots and anything
/// non-alphanumeric, lowercase. Returns `None` when nothing survives, in which
/// case callers sniff the payload instead.
pub fn sanitize_extension(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_riff_as_wav() {
        assert_eq!(sniff_audio_extension(b"RIFF$\x00\x00\x00WAVE"), "wav");
    }

    #[test]
    fn recognizes_ftyp_as_m4a() {
        assert_eq!(sniff_audio_extension(b"\x00\x00\x00 ftypM4A "), "m4a");
    }

    #[test]
    fn recognizes_id3_as_mp3() {
        assert_eq!(sniff_audio_extension(b"ID3\x04\x00\x00\x00\x00\x00\x00"), "mp3");
    }

    #[test]
    fn unknown_payloads_fall_back_to_m4a() {
        assert_eq!(sniff_audio_extension(b"OggS\x00\x02\x00\x00\x00\x00\x00\x00"), "m4a");
        assert_eq!(sniff_audio_extension(b""), "m4a");
        assert_eq!(sniff_audio_extension(b"RI"), "m4a");
    }

    #[test]
    fn sanitizes_declared_extensions() {
        assert_eq!(sanitize_extension(".M4A").as_deref(), Some("m4a"));
        assert_eq!(sanitize_extension("wav").as_deref(), Some("wav"));
        assert_eq!(sanitize_extension(" .mp3 ").as_deref(), Some("mp3"));
        assert_eq!(sanitize_extension("..."), None);
        assert_eq!(sanitize_extension(""), None);
    }
}
