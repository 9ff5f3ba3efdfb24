//! `decant` — a small, focused converter for speech-to-text recording archives.
//!
//! This crate provides:
//! - Archive reading (one metadata document + one raw audio payload per container)
//! - Timestamp normalization (global offset application, epoch disambiguation)
//! - Transcript building (raw per-segment metadata → a flat, portable JSON document)
//! - Deterministic output placement (slugs, date buckets, collision-safe names)
//! - A batch driver that converts whole directory trees without stopping on one bad file
//!
//! The library is designed to be used by both the bundled CLI and embedding
//! applications, with an emphasis on predictable file placement and minimal surprises.

// High-level API (most consumers should start here).
pub mod batch;
pub mod convert;
pub mod opts;

// Container reading and the raw metadata document.
pub mod archive;
pub mod metadata;

// Timestamp normalization: offset application and epoch disambiguation.
pub mod timestamp;

// Transcript document construction.
pub mod transcript;

// Output placement: slugs, payload sniffing, buckets, collision-safe paths.
pub mod placement;
pub mod slug;
pub mod sniff;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub mod error;

pub use error::{Error, Result};
