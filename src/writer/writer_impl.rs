use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, warn};

use super::config::{Encoding, WriterConfig, MAX_LABEL};
use super::error::{Rejected, WriterError};
use super::stats::WriterStats;
use super::text::format_general;
use super::types::{Entry, RecordSet};

/// Buffered writer for Millepede-II records.
///
/// Measurements are collected into the current set with
/// [`append_measurement`](Self::append_measurement) and
/// [`append_special`](Self::append_special), then written as one record by
/// [`flush`](Self::flush).
///
/// ```rust,no_run
/// use mille::writer::RecordWriter;
///
/// let mut writer = RecordWriter::open("mp2input.bin", true, false)?;
/// writer
///     .append_measurement(&[0.0, 2.5], &[1.0], &[42], 0.01, 0.001)
///     .ok();
/// writer.flush()?;
/// let stats = writer.close()?;
/// println!("{}", stats);
/// # Ok::<(), mille::writer::WriterError>(())
/// ```
pub struct RecordWriter<W: Write> {
    sink: W,
    config: WriterConfig,
    set: Option<RecordSet>,
    stats: WriterStats,
}

impl RecordWriter<BufWriter<File>> {
    /// Create a writer to a file path
    pub fn create<P: AsRef<Path>>(path: P, config: WriterConfig) -> Result<Self, WriterError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            warn!("Could not open {} as output file: {}", path.display(), e);
            e
        })?;
        debug!(
            "Opened {} for {:?} output (keep zeros: {})",
            path.display(),
            config.encoding,
            config.keep_zeros
        );
        Ok(Self::new(BufWriter::new(file), config))
    }

    /// Create a writer to a file path with the default capacity
    pub fn open<P: AsRef<Path>>(
        path: P,
        binary: bool,
        keep_zeros: bool,
    ) -> Result<Self, WriterError> {
        let config = if binary {
            WriterConfig::binary()
        } else {
            WriterConfig::text()
        };
        Self::create(path, config.with_keep_zeros(keep_zeros))
    }
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer to any Write implementation
    pub fn new(sink: W, config: WriterConfig) -> Self {
        Self {
            sink,
            config,
            set: None,
            stats: WriterStats::default(),
        }
    }

    /// The writer's configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// The set being built, if any append started one
    pub fn current_set(&self) -> Option<&RecordSet> {
        self.set.as_ref()
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Add one measurement to the current set.
    ///
    /// Stores the residual, the non-zero local derivatives (labelled `1..=n`),
    /// sigma, and the non-zero global derivatives with their labels. A
    /// measurement with `sigma <= 0` is skipped without error. Global entries
    /// with a label outside `1..=2^31-1` are skipped individually.
    pub fn append_measurement(
        &mut self,
        local: &[f32],
        global: &[f32],
        labels: &[i64],
        residual: f32,
        sigma: f32,
    ) -> Result<(), Rejected> {
        if sigma <= 0.0 {
            self.stats.measurements_dropped += 1;
            return Ok(());
        }
        if global.len() != labels.len() {
            return Err(Rejected::LengthMismatch {
                left: global.len(),
                right: labels.len(),
            });
        }

        let keep_zeros = self.config.keep_zeros;
        let locals: Vec<Entry> = local
            .iter()
            .enumerate()
            .filter(|(_, derivative)| **derivative != 0.0 || keep_zeros)
            .map(|(i, &derivative)| Entry::Local {
                index: i as i32 + 1,
                derivative,
            })
            .collect();

        let mut globals = Vec::with_capacity(global.len());
        let mut invalid = Vec::new();
        for (&derivative, &label) in global.iter().zip(labels) {
            if derivative == 0.0 && !keep_zeros {
                continue;
            }
            match checked_label(label, keep_zeros) {
                Some(label) => globals.push(Entry::Global { label, derivative }),
                None => invalid.push(label),
            }
        }

        self.reserve(locals.len() + globals.len())?;

        for label in invalid {
            warn!("Invalid label {} <= 0 or > {}", label, MAX_LABEL);
            self.stats.invalid_labels += 1;
        }

        let set = self.set.get_or_insert_with(RecordSet::new);
        set.push(Entry::Residual(residual));
        for entry in locals {
            set.push(entry);
        }
        set.push(Entry::Sigma(sigma));
        for entry in globals {
            set.push(entry);
        }
        self.stats.measurements_stored += 1;
        Ok(())
    }

    /// Attach a block of untyped float/int pairs to the current set.
    ///
    /// Only one special block is allowed per set. Empty input is a no-op.
    pub fn append_special(&mut self, floats: &[f32], ints: &[i32]) -> Result<(), Rejected> {
        if floats.len() != ints.len() {
            return Err(Rejected::LengthMismatch {
                left: floats.len(),
                right: ints.len(),
            });
        }
        if floats.is_empty() {
            return Ok(());
        }
        if self.set.as_ref().is_some_and(|set| set.has_special) {
            warn!("Special values already stored for this record");
            return Err(Rejected::DuplicateSpecial);
        }

        let count = floats.len();
        self.reserve(count)?;

        let set = self.set.get_or_insert_with(RecordSet::new);
        set.has_special = true;
        set.push(Entry::SpecialHeader { count });
        for (&value, &label) in floats.iter().zip(ints) {
            set.push(Entry::SpecialPayload { value, label });
        }
        self.stats.special_blocks += 1;
        Ok(())
    }

    /// Write the current set as one record and start over.
    ///
    /// A set without any entries produces no output. The set is reset even if
    /// writing fails.
    pub fn flush(&mut self) -> Result<(), WriterError> {
        let Some(set) = self.set.take() else {
            return Ok(());
        };
        if set.is_empty() {
            return Ok(());
        }

        let (values, labels) = set.to_columns();
        let word_count = values
            .len()
            .checked_mul(2)
            .and_then(|words| i32::try_from(words).ok())
            .ok_or(WriterError::RecordTooLarge(values.len()))?;

        let bytes = match self.config.encoding {
            Encoding::Binary => encode_binary(word_count, &values, &labels)?,
            Encoding::Text => encode_text(word_count, &values, &labels).into_bytes(),
        };
        self.sink.write_all(&bytes)?;

        debug!(
            "Wrote record of {} entries ({} errors)",
            values.len(),
            set.error_count
        );
        self.stats.records_written += 1;
        self.stats.entries_written += values.len();
        self.stats.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Abandon the current set without writing it
    pub fn discard(&mut self) {
        if let Some(set) = self.set.take() {
            if !set.is_empty() {
                self.stats.sets_discarded += 1;
            }
        }
    }

    /// Release the sink and return the final statistics.
    ///
    /// The current set is not written; call [`flush`](Self::flush) first to keep it.
    pub fn close(mut self) -> Result<WriterStats, WriterError> {
        if self.set.as_ref().is_some_and(|set| !set.is_empty()) {
            debug!("Discarding unflushed set on close");
        }
        self.discard();

        let Self {
            mut sink, stats, ..
        } = self;
        sink.flush()?;
        Ok(stats)
    }

    /// Make room for `requested` entries plus the two structural ones.
    ///
    /// Starts a set if none is open. On failure the set's error counter is
    /// incremented and nothing else changes.
    fn reserve(&mut self, requested: usize) -> Result<(), Rejected> {
        let capacity = self.config.capacity;
        let set = self.set.get_or_insert_with(RecordSet::new);
        let stored = set.len();
        if stored + requested + 2 > capacity {
            set.error_count = set.error_count.saturating_add(1);
            self.stats.capacity_rejections += 1;
            let rejected = Rejected::Capacity {
                capacity,
                requested,
                stored,
            };
            warn!("{}", rejected);
            return Err(rejected);
        }
        Ok(())
    }
}

/// Accept labels in `1..=MAX_LABEL`, or `..=MAX_LABEL` when zeros are kept
fn checked_label(label: i64, keep_zeros: bool) -> Option<i32> {
    if label > MAX_LABEL || (label <= 0 && !keep_zeros) {
        return None;
    }
    i32::try_from(label).ok()
}

fn encode_binary(word_count: i32, values: &[f32], labels: &[i32]) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(4 + 4 * (values.len() + labels.len()));
    buf.write_i32::<LittleEndian>(word_count)?;
    for &value in values {
        buf.write_f32::<LittleEndian>(value)?;
    }
    for &label in labels {
        buf.write_i32::<LittleEndian>(label)?;
    }
    Ok(buf)
}

fn encode_text(word_count: i32, values: &[f32], labels: &[i32]) -> String {
    let mut out = String::with_capacity(16 * values.len());
    out.push_str(&word_count.to_string());
    out.push('\n');
    for &value in values {
        out.push_str(&format_general(value));
        out.push(' ');
    }
    out.push('\n');
    for &label in labels {
        out.push_str(&label.to_string());
        out.push(' ');
    }
    out.push('\n');
    out
}
