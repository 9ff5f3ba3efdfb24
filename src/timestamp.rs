//! Timestamp normalization.
//!
//! Two independent jobs live here:
//! - **Offset application**: turning an archive-relative millisecond value plus
//!   the archive's global offset into the second-based value the transcript
//!   document uses.
//! - **Epoch disambiguation**: resolving a creation/update timestamp whose unit
//!   and epoch base are unknown. Different producer versions have written
//!   seconds or milliseconds, against the Unix epoch or against a platform
//!   epoch 978307200 seconds later (2001-01-01T00:00:00Z). The format does not
//!   self-describe, so we try all four readings and pick the most plausible.
//!
//! Disambiguation is deliberately a pure function returning an `Option`, not a
//! parser that errors: "no confident guess" is an expected outcome and callers
//! fall back to an `unsorted` bucket.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde_json::Value;

/// Seconds between the Unix epoch and the platform epoch (2001-01-01T00:00:00Z).
pub const PLATFORM_EPOCH_OFFSET_SECS: f64 = 978_307_200.0;

/// Calendar years considered plausible for a recording timestamp.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 2000..=2100;

/// Apply the archive's global offset to a raw millisecond value and convert to
/// seconds.
///
/// Returns `None` when the source is absent or not a finite number; callers
/// drop the owning segment or word entirely rather than emitting partial data.
pub fn offset_seconds(raw: Option<&Value>, offset_ms: f64) -> Option<f64> {
    let ms = raw?.as_f64().filter(|n| n.is_finite())?;
    Some((ms + offset_ms) / 1000.0)
}

/// Resolve an ambiguous creation/update timestamp to a calendar instant.
///
/// Accepts JSON numbers and numeric strings. Returns `None` when no finite,
/// positive reading exists.
pub fn resolve_epoch(raw: &Value) -> Option<DateTime<Utc>> {
    resolve_epoch_at(raw, Utc::now())
}

/// [`resolve_epoch`] with an explicit "now", for deterministic callers.
///
/// The tie-break between otherwise plausible readings picks the one closest to
/// `now`, so tests pin it instead of racing the wall clock.
pub fn resolve_epoch_at(raw: &Value, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let n = numeric(raw)?;

    // All four readings, as milliseconds since the Unix epoch.
    let candidates = [
        n * 1000.0,                                // Unix seconds
        n,                                         // Unix milliseconds
        (n + PLATFORM_EPOCH_OFFSET_SECS) * 1000.0, // platform seconds
        n + PLATFORM_EPOCH_OFFSET_SECS * 1000.0,   // platform milliseconds
    ];

    let viable: Vec<DateTime<Utc>> = candidates
        .into_iter()
        .filter(|ms| ms.is_finite() && *ms > 0.0)
        .filter_map(|ms| Utc.timestamp_millis_opt(ms as i64).single())
        .collect();
    if viable.is_empty() {
        return None;
    }

    let in_range: Vec<DateTime<Utc>> = viable
        .iter()
        .copied()
        .filter(|dt| PLAUSIBLE_YEARS.contains(&dt.year()))
        .collect();
    let pool = if in_range.is_empty() { viable } else { in_range };

    let now_ms = now.timestamp_millis();
    pool.into_iter()
        .min_by_key(|dt| (dt.timestamp_millis() - now_ms).abs())
}

fn numeric(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}
