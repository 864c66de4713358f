use std::fmt;

/// Statistics from a writer's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of records written to the sink
    pub records_written: usize,
    /// Total entries written, including each record's position 0
    pub entries_written: usize,
    /// Total bytes handed to the sink
    pub bytes_written: u64,
    /// Measurements accepted into a set
    pub measurements_stored: usize,
    /// Measurements dropped for a non-positive sigma
    pub measurements_dropped: usize,
    /// Append calls rejected for lack of space
    pub capacity_rejections: usize,
    /// Global entries skipped for an out-of-range label
    pub invalid_labels: usize,
    /// Special blocks stored
    pub special_blocks: usize,
    /// Sets abandoned without being written
    pub sets_discarded: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} records ({} entries, {} bytes); {} measurements stored, {} rejected",
            self.records_written,
            self.entries_written,
            self.bytes_written,
            self.measurements_stored,
            self.capacity_rejections
        )
    }
}
