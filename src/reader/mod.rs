//! # Alignment Record Reader
//!
//! Decodes record streams produced by [`RecordWriter`](crate::writer::RecordWriter),
//! in either encoding. Used for inspecting output files and for round-trip checks.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mille::reader::RecordReader;
//!
//! let reader = RecordReader::open("mp2input.bin")?;
//! for record in reader {
//!     let record = record?;
//!     println!("{} entries, {} errors", record.len(), record.error_count());
//! }
//! # Ok::<(), mille::reader::ReaderError>(())
//! ```

mod error;
mod record;
mod summary;

#[cfg(test)]
mod tests;

pub use error::ReaderError;
pub use record::Record;
pub use summary::FileSummary;

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::writer::Encoding;

/// Streaming reader over the records of one file
pub struct RecordReader<R: BufRead> {
    reader: R,
    encoding: Encoding,
    records_read: usize,
    line: String,
}

impl RecordReader<BufReader<File>> {
    /// Open a record file.
    ///
    /// Files ending in `.txt` are read as text, everything else as binary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let encoding = if path.extension().map(|e| e == "txt").unwrap_or(false) {
            Encoding::Text
        } else {
            Encoding::Binary
        };
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), encoding))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Read records of the given encoding from any buffered reader
    pub fn new(reader: R, encoding: Encoding) -> Self {
        Self {
            reader,
            encoding,
            records_read: 0,
            line: String::new(),
        }
    }

    /// Read binary records
    pub fn binary(reader: R) -> Self {
        Self::new(reader, Encoding::Binary)
    }

    /// Read text records
    pub fn text(reader: R) -> Self {
        Self::new(reader, Encoding::Text)
    }

    /// Encoding this reader decodes
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Read the next record, or `None` at a clean end of input
    pub fn read_record(&mut self) -> Result<Option<Record>, ReaderError> {
        let record = match self.encoding {
            Encoding::Binary => self.read_binary()?,
            Encoding::Text => self.read_text()?,
        };
        if record.is_some() {
            self.records_read += 1;
        }
        Ok(record)
    }

    fn read_binary(&mut self) -> Result<Option<Record>, ReaderError> {
        let mut prefix = [0u8; 4];
        match fill(&mut self.reader, &mut prefix)? {
            0 => return Ok(None),
            4 => {}
            n => {
                return Err(ReaderError::InvalidFormat(format!(
                    "record {}: truncated word count ({} bytes)",
                    self.records_read, n
                )))
            }
        }
        let n = self.entry_count(i32::from_le_bytes(prefix))?;

        // Grow with the data actually present, not with the declared count
        let expected = 8 * n as u64;
        let mut bytes = Vec::new();
        (&mut self.reader).take(expected).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < expected {
            return Err(ReaderError::InvalidFormat(format!(
                "record {}: truncated after word count {} ({} of {} bytes)",
                self.records_read,
                2 * n,
                bytes.len(),
                expected
            )));
        }

        let (value_bytes, label_bytes) = bytes.split_at(4 * n);
        let mut values = vec![0f32; n];
        let mut labels = vec![0i32; n];
        LittleEndian::read_f32_into(value_bytes, &mut values);
        LittleEndian::read_i32_into(label_bytes, &mut labels);

        Record::new(values, labels).map(Some)
    }

    fn read_text(&mut self) -> Result<Option<Record>, ReaderError> {
        let word_count = loop {
            if !self.next_line()? {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            break trimmed.parse::<i32>().map_err(|_| {
                ReaderError::InvalidFormat(format!(
                    "record {}: bad word count {:?}",
                    self.records_read, trimmed
                ))
            })?;
        };
        let n = self.entry_count(word_count)?;

        let values: Vec<f32> = self.parse_line(n, "values")?;
        let labels: Vec<i32> = self.parse_line(n, "labels")?;
        Record::new(values, labels).map(Some)
    }

    fn next_line(&mut self) -> Result<bool, ReaderError> {
        self.line.clear();
        Ok(self.reader.read_line(&mut self.line)? > 0)
    }

    fn parse_line<T: std::str::FromStr>(
        &mut self,
        n: usize,
        what: &str,
    ) -> Result<Vec<T>, ReaderError> {
        if !self.next_line()? {
            return Err(ReaderError::InvalidFormat(format!(
                "record {}: missing {} line",
                self.records_read, what
            )));
        }
        let parsed = self
            .line
            .split_whitespace()
            .map(|token| token.parse::<T>().ok())
            .collect::<Option<Vec<T>>>()
            .ok_or_else(|| {
                ReaderError::InvalidFormat(format!(
                    "record {}: unparsable {} line",
                    self.records_read, what
                ))
            })?;
        if parsed.len() != n {
            return Err(ReaderError::InvalidFormat(format!(
                "record {}: expected {} {}, found {}",
                self.records_read,
                n,
                what,
                parsed.len()
            )));
        }
        Ok(parsed)
    }

    /// Validate a word count and turn it into an entry count
    fn entry_count(&self, word_count: i32) -> Result<usize, ReaderError> {
        if word_count < 0 {
            return Err(ReaderError::InvalidFormat(format!(
                "record {}: double-precision records are not supported",
                self.records_read
            )));
        }
        if word_count == 0 || word_count % 2 != 0 {
            return Err(ReaderError::InvalidFormat(format!(
                "record {}: invalid word count {}",
                self.records_read, word_count
            )));
        }
        Ok((word_count / 2) as usize)
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Read until `buf` is full or the input ends; returns the bytes read
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
