use std::fmt;
use std::io::BufRead;

use crate::writer::Entry;

use super::{ReaderError, RecordReader};

/// Summary statistics about a record file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    /// Number of records
    pub records: usize,
    /// Entries over all records, including each position 0
    pub entries: usize,
    /// Measurements (residual/sigma pairs)
    pub measurements: usize,
    /// Global derivative entries
    pub global_entries: usize,
    /// Records carrying a special block
    pub special_blocks: usize,
    /// Records whose error counter is non-zero
    pub records_with_errors: usize,
    /// Sum of all error counters
    pub total_errors: i64,
    /// Smallest and largest global label seen
    pub label_range: Option<(i32, i32)>,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records:          {}", self.records)?;
        writeln!(f, "Entries:          {}", self.entries)?;
        writeln!(f, "Measurements:     {}", self.measurements)?;
        writeln!(f, "Global entries:   {}", self.global_entries)?;
        writeln!(f, "Special blocks:   {}", self.special_blocks)?;
        writeln!(
            f,
            "Errors:           {} in {} records",
            self.total_errors, self.records_with_errors
        )?;
        match self.label_range {
            Some((min, max)) => write!(f, "Label range:      {}..={}", min, max),
            None => write!(f, "Label range:      -"),
        }
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Consume the remaining records and summarize them
    pub fn summary(self) -> Result<FileSummary, ReaderError> {
        let mut summary = FileSummary::default();

        for record in self {
            let record = record?;
            summary.records += 1;
            summary.entries += record.len();
            if record.error_count() != 0 {
                summary.records_with_errors += 1;
                summary.total_errors += i64::from(record.error_count());
            }

            for entry in record.entries()? {
                match entry {
                    Entry::Residual(_) => summary.measurements += 1,
                    Entry::Global { label, .. } => {
                        summary.global_entries += 1;
                        summary.label_range = Some(match summary.label_range {
                            Some((min, max)) => (min.min(label), max.max(label)),
                            None => (label, label),
                        });
                    }
                    Entry::SpecialHeader { .. } => summary.special_blocks += 1,
                    _ => {}
                }
            }
        }

        Ok(summary)
    }
}
