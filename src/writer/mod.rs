//! # Alignment Record Writer
//!
//! This module provides the buffered writer for Millepede-II input records.
//!
//! ## Design Principles
//!
//! 1. **One record per set**: Measurements of one track are accumulated in memory
//!    and written as a single framed record on [`RecordWriter::flush`].
//!
//! 2. **Bounded buffer**: A set never grows beyond [`WriterConfig::capacity`]
//!    entries. Appends that would overflow are rejected as a whole and counted in
//!    the record's error counter instead of being truncated.
//!
//! 3. **Explicit entries**: Entries are kept as typed [`Entry`] values and only
//!    flattened to the positional `(value, label)` layout when the record is written.
//!
//! 4. **Two encodings**: Little-endian binary (read by `pede`) and a three-line text
//!    form for debugging.
//!
//! ## Record Layout
//!
//! ```text
//! i32        word count (= 2 * entries)
//! f32[n]     values, position 0 = 0.0
//! i32[n]     labels, position 0 = error counter
//! ```

mod config;
mod error;
mod stats;
mod text;
mod types;
mod writer_impl;


pub use config::{Encoding, WriterConfig, DEFAULT_CAPACITY, MAX_LABEL};
pub use error::{Rejected, WriterError};
pub use stats::WriterStats;
pub use text::format_general;
pub use types::{Entry, RecordSet};
pub use writer_impl::RecordWriter;
