// this_file: backends/scriva-engine-dw/src/lib.rs

//! DirectWrite-shaped glyph engine for the Scriva pipeline
//!
//! This backend answers the framework's glyph questions by delegating
//! to a platform font service with DirectWrite's shape: an opaque
//! factory, a font object, and a face object reached through the
//! capability traits in `scriva_core::traits`. What lives here is the
//! detail-sensitive glue those delegations need to be *correct*:
//!
//! - UTF-16 surrogate merging and bidi mirroring before glyph lookup
//! - design-unit to 26.6 logical-pixel conversion, with the
//!   integer-metrics rounding policy applied in exactly the right spots
//! - per-glyph and per-run bounding boxes from design-space metrics
//! - the outline-sink callback protocol that turns vendor curve events
//!   into a portable [`scriva_core::path::GlyphPath`]
//! - ClearType coverage analysis, repacked into RGB or gamma-corrected
//!   alpha bitmaps
//!
//! ## Error posture
//!
//! The framework contract is sentinel-based: operations fail as
//! `false`, an empty bitmap, or a zeroed box, with the cause sent to
//! the `log` facade. A failed face construction leaves the engine live
//! but feature-unavailable. See `scriva_core::error` for the boundary
//! error type.
//!
//! ## Concurrency
//!
//! Single-threaded, synchronous, call-and-return. Capability handles
//! are shared `Arc`s; callers sharing one engine across threads must
//! serialize externally, since the platform objects underneath may not
//! be reentrant.

pub mod engine;
pub mod outline;
pub mod raster;
pub mod scanner;

pub use engine::{sfnt_tag, DirectWriteEngine};
pub use outline::PathSink;
