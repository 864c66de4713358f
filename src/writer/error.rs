/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error while opening, writing or closing the sink
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record exceeds what the word-count prefix can express
    #[error("Record too large: {0} entries")]
    RecordTooLarge(usize),
}

/// Reasons an append call was rejected.
///
/// A rejection never leaves partial data in the set; the writer stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// The set has no room for the requested entries
    #[error("buffer too short ({capacity}), need {requested} more entries, {stored} already stored")]
    Capacity {
        /// Configured capacity of a set
        capacity: usize,
        /// Entries the call would have added
        requested: usize,
        /// Entries already in the set, including position 0
        stored: usize,
    },

    /// A special block was already stored for this set
    #[error("special values already stored for this record")]
    DuplicateSpecial,

    /// Paired input slices differ in length
    #[error("length mismatch: {left} values but {right} labels")]
    LengthMismatch {
        /// Number of values supplied
        left: usize,
        /// Number of labels supplied
        right: usize,
    },
}
