use std::fmt;

use serde::Serialize;

/// A single entry of a set.
///
/// On the wire every variant becomes one `(value, label)` pair, except
/// [`Entry::SpecialHeader`] which occupies two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    /// Measured residual, opens a measurement block (label 0)
    Residual(f32),
    /// Derivative with respect to a local (per-track) parameter
    Local {
        /// 1-based index of the local parameter
        index: i32,
        /// Derivative value
        derivative: f32,
    },
    /// Measurement uncertainty, separates locals from globals (label 0)
    Sigma(f32),
    /// Derivative with respect to a global alignment parameter
    Global {
        /// Global parameter label
        label: i32,
        /// Derivative value
        derivative: f32,
    },
    /// Start of a special block: `(0, 0)` followed by `(-count, 0)`
    SpecialHeader {
        /// Number of payload pairs that follow
        count: usize,
    },
    /// Untyped payload pair inside a special block
    SpecialPayload {
        /// Floating-point payload
        value: f32,
        /// Integer payload
        label: i32,
    },
}

impl Entry {
    /// Number of `(value, label)` pairs this entry occupies on the wire
    pub fn width(&self) -> usize {
        match self {
            Entry::SpecialHeader { .. } => 2,
            _ => 1,
        }
    }

    /// Append the positional encoding of this entry
    fn flatten_into(&self, values: &mut Vec<f32>, labels: &mut Vec<i32>) {
        match *self {
            Entry::Residual(value) | Entry::Sigma(value) => {
                values.push(value);
                labels.push(0);
            }
            Entry::Local { index, derivative } => {
                values.push(derivative);
                labels.push(index);
            }
            Entry::Global { label, derivative } => {
                values.push(derivative);
                labels.push(label);
            }
            Entry::SpecialHeader { count } => {
                values.push(0.0);
                labels.push(0);
                values.push(-(count as f32));
                labels.push(0);
            }
            Entry::SpecialPayload { value, label } => {
                values.push(value);
                labels.push(label);
            }
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Residual(value) => write!(f, "residual {}", value),
            Entry::Local { index, derivative } => write!(f, "local    {:>10}  {}", index, derivative),
            Entry::Sigma(value) => write!(f, "sigma    {}", value),
            Entry::Global { label, derivative } => write!(f, "global   {:>10}  {}", label, derivative),
            Entry::SpecialHeader { count } => write!(f, "special  {} pairs", count),
            Entry::SpecialPayload { value, label } => {
                write!(f, "payload  {:>10}  {}", label, value)
            }
        }
    }
}

/// The entries of one set (usually one track), plus its error counter.
///
/// The error counter is serialized into position 0 of the record, so the
/// flattened length is always one more than the sum of entry widths.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    pub(super) error_count: i32,
    pub(super) entries: Vec<Entry>,
    pub(super) has_special: bool,
    len: usize,
}

impl RecordSet {
    /// Create an empty set holding only the error counter slot
    pub fn new() -> Self {
        Self {
            error_count: 0,
            entries: Vec::new(),
            has_special: false,
            len: 1,
        }
    }

    /// Number of append calls rejected for lack of space
    pub fn error_count(&self) -> i32 {
        self.error_count
    }

    /// Entries in append order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Whether a special block was already stored
    pub fn has_special(&self) -> bool {
        self.has_special
    }

    /// Number of wire entries, including position 0
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing besides the error counter slot is stored
    pub fn is_empty(&self) -> bool {
        self.len <= 1
    }

    pub(super) fn push(&mut self, entry: Entry) {
        self.len += entry.width();
        self.entries.push(entry);
    }

    /// Flatten to the parallel value and label arrays written on the wire
    pub fn to_columns(&self) -> (Vec<f32>, Vec<i32>) {
        let mut values = Vec::with_capacity(self.len);
        let mut labels = Vec::with_capacity(self.len);
        values.push(0.0);
        labels.push(self.error_count);
        for entry in &self.entries {
            entry.flatten_into(&mut values, &mut labels);
        }
        (values, labels)
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::new()
    }
}
