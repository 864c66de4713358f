use crate::writer::Entry;

use super::ReaderError;

/// One decoded record: the parallel value and label arrays
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<f32>,
    labels: Vec<i32>,
}

/// Position within a measurement block while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Expecting a residual or a special block
    Start,
    /// After a residual, reading local derivatives
    Locals,
    /// After sigma, reading global derivatives
    Globals,
}

impl Record {
    /// Build a record from its columns. Both must be non-empty and of equal length.
    pub fn new(values: Vec<f32>, labels: Vec<i32>) -> Result<Self, ReaderError> {
        if values.len() != labels.len() {
            return Err(ReaderError::InvalidFormat(format!(
                "{} values but {} labels",
                values.len(),
                labels.len()
            )));
        }
        if values.is_empty() {
            return Err(ReaderError::InvalidFormat(
                "record without error counter slot".to_string(),
            ));
        }
        Ok(Self { values, labels })
    }

    /// Number of entries, including position 0
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the record holds only the error counter slot
    pub fn is_empty(&self) -> bool {
        self.values.len() <= 1
    }

    /// The word count written in front of the record
    pub fn word_count(&self) -> usize {
        2 * self.values.len()
    }

    /// In-band error counter stored at position 0
    pub fn error_count(&self) -> i32 {
        self.labels.first().copied().unwrap_or(0)
    }

    /// Value column, including position 0
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Label column, including position 0
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Iterate `(value, label)` pairs, including position 0
    pub fn pairs(&self) -> impl Iterator<Item = (f32, i32)> + '_ {
        self.values.iter().copied().zip(self.labels.iter().copied())
    }

    /// Decode the positional layout back into typed entries.
    ///
    /// Label 0 alternates between residual and sigma; a `(0, 0)` pair followed by
    /// `(-n, 0)` at a block boundary opens a special block of `n` pairs.
    pub fn entries(&self) -> Result<Vec<Entry>, ReaderError> {
        let n = self.values.len();
        let mut entries = Vec::with_capacity(n);
        let mut block = Block::Start;
        let mut i = 1;

        while i < n {
            let (value, label) = (self.values[i], self.labels[i]);

            if label != 0 {
                let entry = match block {
                    Block::Start => {
                        return Err(ReaderError::InvalidFormat(format!(
                            "entry {} with label {} outside a measurement",
                            i, label
                        )))
                    }
                    Block::Locals => Entry::Local {
                        index: label,
                        derivative: value,
                    },
                    Block::Globals => Entry::Global {
                        label,
                        derivative: value,
                    },
                };
                entries.push(entry);
                i += 1;
                continue;
            }

            if block == Block::Locals {
                entries.push(Entry::Sigma(value));
                block = Block::Globals;
                i += 1;
                continue;
            }

            if let Some(count) = self.special_count(i)? {
                entries.push(Entry::SpecialHeader { count });
                for j in i + 2..i + 2 + count {
                    entries.push(Entry::SpecialPayload {
                        value: self.values[j],
                        label: self.labels[j],
                    });
                }
                i += 2 + count;
                block = Block::Start;
                continue;
            }

            entries.push(Entry::Residual(value));
            block = Block::Locals;
            i += 1;
        }

        if block == Block::Locals {
            return Err(ReaderError::InvalidFormat(
                "measurement without sigma".to_string(),
            ));
        }
        Ok(entries)
    }

    /// Payload length if a special block starts at `i`
    fn special_count(&self, i: usize) -> Result<Option<usize>, ReaderError> {
        let n = self.values.len();
        if self.values[i] != 0.0 || i + 1 >= n || self.labels[i + 1] != 0 {
            return Ok(None);
        }
        let marker = self.values[i + 1];
        if marker.is_nan() || marker >= 0.0 {
            return Ok(None);
        }
        let available = n - i - 2;
        let count = -marker;
        if count.fract() != 0.0 || count > available as f32 || count as usize > available {
            return Err(ReaderError::InvalidFormat(format!(
                "special block at {} claims {} entries, {} available",
                i, count, available
            )));
        }
        Ok(Some(count as usize))
    }
}
