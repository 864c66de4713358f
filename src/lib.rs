//! # mille - Alignment Record Writer
//!
//! `mille` produces the binary (or text) record files consumed by the
//! Millepede-II global alignment fit. Each record collects the measurements of
//! one track: residuals, uncertainties, and the derivatives with respect to
//! local (per-track) and global (per-detector-element) parameters.
//!
//! ## Key Features
//!
//! - **Buffered record assembly**: measurements accumulate in memory and are
//!   written as one record on [`flush`](writer::RecordWriter::flush).
//!
//! - **Capacity guard**: a record never grows past its configured capacity;
//!   rejected measurements are counted in the record's in-band error counter.
//!
//! - **Two encodings**: little-endian binary for production, whitespace
//!   separated text for debugging.
//!
//! - **Track conversion**: turns fitted tracks stored as Parquet into records,
//!   with configurable quality cuts and label hierarchy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mille::writer::{RecordWriter, WriterConfig};
//!
//! let mut writer = RecordWriter::create("mp2input.bin", WriterConfig::binary())?;
//!
//! // One measurement: two local derivatives, one global parameter labelled 42
//! writer
//!     .append_measurement(&[0.0, 2.5], &[1.0], &[42], 0.01, 0.001)
//!     .ok();
//! writer.flush()?;
//!
//! let stats = writer.close()?;
//! println!("Wrote {} records", stats.records_written);
//! # Ok::<(), mille::writer::WriterError>(())
//! ```
//!
//! ## Record Layout
//!
//! A record is two parallel arrays of `n` entries, preceded by the word count
//! `2n`:
//!
//! | Position | Value | Label |
//! |----------|-------|-------|
//! | 0 | `0.0` | error counter |
//! | residual | residual | `0` |
//! | local | derivative | local index `1..` |
//! | sigma | sigma | `0` |
//! | global | derivative | global label `1..=2^31-1` |
//!
//! Binary records are `i32 word count, f32[n] values, i32[n] labels`, all
//! little-endian. Text records are three lines holding the same numbers.
//!
//! ## Architecture
//!
//! - [`writer`]: record assembly and encoding
//! - [`reader`]: decoding of record files for inspection
//! - [`tracks`]: conversion of fitted tracks into records

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod reader;
pub mod tracks;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::reader::{FileSummary, ReaderError, Record, RecordReader};
    pub use crate::tracks::{
        AlignmentConfig, ConversionStats, Hierarchy, SelectionCuts, Track, TrackConverter,
        TrackError, TrackReader,
    };
    pub use crate::writer::{
        Encoding, Entry, RecordSet, RecordWriter, Rejected, WriterConfig, WriterError,
        WriterStats,
    };
}
