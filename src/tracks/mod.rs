//! # Track Conversion
//!
//! Turns fitted tracks into alignment records.
//!
//! Input is a directory of Parquet files with one row per track and per-hit
//! list columns (see [`columns`]). Each track passing the [`SelectionCuts`]
//! becomes one record; each accepted hit becomes one measurement whose global
//! labels follow the module / layer / station [`Hierarchy`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use mille::tracks::{AlignmentConfig, TrackConverter};
//! use mille::writer::RecordWriter;
//!
//! let writer = RecordWriter::open("mp2input.bin", true, false)?;
//! let converter = TrackConverter::new(AlignmentConfig::default());
//! let stats = converter.convert_directory("kfalignment/", writer)?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod columns;
mod config;
mod converter;
mod error;
mod selection;
mod sink;
mod source;
mod types;


pub use config::{AlignmentConfig, Hierarchy, SelectionCuts};
pub use converter::{ConversionStats, TrackConverter};
pub use error::TrackError;
pub use selection::MODULE_OFFSET;
pub use sink::{tracks_to_batch, write_track_file};
pub use source::{tracks_from_batch, TrackReader, DEFAULT_BATCH_SIZE};
pub use types::{Hit, Measurement, RigidBodyDerivatives, Track};
