use serde::Deserialize;

/// Default number of entries a single set may hold, including the error counter slot.
pub const DEFAULT_CAPACITY: usize = 5000;

/// Largest global label accepted by `pede`: 2^31 - 1.
pub const MAX_LABEL: i64 = i32::MAX as i64;

/// Output encoding of the record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Little-endian binary records (the format `pede` reads)
    #[default]
    Binary,
    /// Three text lines per record: word count, values, labels
    Text,
}

impl Encoding {
    /// File extension conventionally used for this encoding
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::Binary => "bin",
            Encoding::Text => "txt",
        }
    }
}

/// Configuration for the record writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Binary or text framing
    pub encoding: Encoding,

    /// Keep derivatives that are exactly zero.
    /// Also relaxes the global label check to allow labels <= 0.
    pub keep_zeros: bool,

    /// Maximum number of entries per set, including position 0
    pub capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Binary,
            keep_zeros: false,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl WriterConfig {
    /// Binary output with zero suppression (default)
    pub fn binary() -> Self {
        Self::default()
    }

    /// Text output with zero suppression
    pub fn text() -> Self {
        Self {
            encoding: Encoding::Text,
            ..Self::default()
        }
    }

    /// Set whether zero-valued derivatives are written
    pub fn with_keep_zeros(mut self, keep_zeros: bool) -> Self {
        self.keep_zeros = keep_zeros;
        self
    }

    /// Set the per-set entry capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
