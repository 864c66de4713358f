use super::*;
use crate::writer::{Entry, RecordWriter, WriterConfig};
use std::io::Cursor;
use tempfile::tempdir;

fn write_tracks(config: WriterConfig) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    let mut writer = RecordWriter::new(&mut buf, config);

    writer
        .append_measurement(&[0.0, 2.5], &[1.0], &[42], 0.01, 0.001)
        .unwrap();
    writer.flush()?;

    writer.append_special(&[0.5, -1.5], &[3, 0]).unwrap();
    writer
        .append_measurement(&[1.0, 0.0, 3.0], &[4.0, 5.0], &[101, 202], -0.25, 0.05)
        .unwrap();
    writer
        .append_measurement(&[], &[6.0], &[303], 0.0, 0.5)
        .unwrap();
    writer.flush()?;

    writer.close()?;
    Ok(buf)
}

#[test]
fn test_binary_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let buf = write_tracks(WriterConfig::binary())?;
    let records: Vec<Record> =
        RecordReader::new(Cursor::new(buf), Encoding::Binary).collect::<Result<_, _>>()?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].word_count(), 10);
    assert_eq!(records[0].values(), &[0.0, 0.01, 2.5, 0.001, 1.0]);
    assert_eq!(records[0].labels(), &[0, 0, 2, 0, 42]);
    assert_eq!(records[0].error_count(), 0);

    assert_eq!(
        records[1].entries()?,
        vec![
            Entry::SpecialHeader { count: 2 },
            Entry::SpecialPayload {
                value: 0.5,
                label: 3
            },
            Entry::SpecialPayload {
                value: -1.5,
                label: 0
            },
            Entry::Residual(-0.25),
            Entry::Local {
                index: 1,
                derivative: 1.0
            },
            Entry::Local {
                index: 3,
                derivative: 3.0
            },
            Entry::Sigma(0.05),
            Entry::Global {
                label: 101,
                derivative: 4.0
            },
            Entry::Global {
                label: 202,
                derivative: 5.0
            },
            Entry::Residual(0.0),
            Entry::Sigma(0.5),
            Entry::Global {
                label: 303,
                derivative: 6.0
            },
        ]
    );
    Ok(())
}

#[test]
fn test_text_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let binary = write_tracks(WriterConfig::binary())?;
    let text = write_tracks(WriterConfig::text())?;

    let from_binary: Vec<Record> =
        RecordReader::new(Cursor::new(binary), Encoding::Binary).collect::<Result<_, _>>()?;
    let from_text: Vec<Record> =
        RecordReader::new(Cursor::new(text), Encoding::Text).collect::<Result<_, _>>()?;

    assert_eq!(from_binary, from_text);
    Ok(())
}

#[test]
fn test_open_detects_encoding() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let bin_path = dir.path().join("mp2input.bin");
    std::fs::write(&bin_path, write_tracks(WriterConfig::binary())?)?;
    let txt_path = dir.path().join("mp2input.txt");
    std::fs::write(&txt_path, write_tracks(WriterConfig::text())?)?;

    let reader = RecordReader::open(&bin_path)?;
    assert_eq!(reader.encoding(), Encoding::Binary);
    assert_eq!(reader.count(), 2);

    let reader = RecordReader::open(&txt_path)?;
    assert_eq!(reader.encoding(), Encoding::Text);
    assert_eq!(reader.count(), 2);
    Ok(())
}

#[test]
fn test_summary() -> Result<(), Box<dyn std::error::Error>> {
    let buf = write_tracks(WriterConfig::binary())?;
    let summary = RecordReader::new(Cursor::new(buf), Encoding::Binary).summary()?;

    assert_eq!(summary.records, 2);
    assert_eq!(summary.entries, 5 + 14);
    assert_eq!(summary.measurements, 3);
    assert_eq!(summary.global_entries, 4);
    assert_eq!(summary.special_blocks, 1);
    assert_eq!(summary.records_with_errors, 0);
    assert_eq!(summary.label_range, Some((42, 303)));
    Ok(())
}

#[test]
fn test_error_counter_survives_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    let mut writer = RecordWriter::new(&mut buf, WriterConfig::binary().with_capacity(6));
    writer
        .append_measurement(&[1.0], &[], &[], 0.1, 0.2)
        .unwrap();
    assert!(writer
        .append_measurement(&[1.0, 2.0], &[], &[], 0.1, 0.2)
        .is_err());
    writer.flush()?;
    writer.close()?;

    let summary = RecordReader::new(Cursor::new(buf), Encoding::Binary).summary()?;
    assert_eq!(summary.records_with_errors, 1);
    assert_eq!(summary.total_errors, 1);
    Ok(())
}

#[test]
fn test_truncated_binary_record() {
    let mut buf = write_tracks(WriterConfig::binary()).unwrap();
    buf.truncate(buf.len() - 3);

    let mut reader = RecordReader::new(Cursor::new(buf), Encoding::Binary);
    assert!(reader.read_record().unwrap().is_some());
    assert!(matches!(
        reader.read_record(),
        Err(ReaderError::InvalidFormat(_))
    ));
}

#[test]
fn test_truncated_word_count() {
    let mut reader = RecordReader::new(Cursor::new(vec![10u8, 0]), Encoding::Binary);
    assert!(matches!(
        reader.read_record(),
        Err(ReaderError::InvalidFormat(_))
    ));
}

#[test]
fn test_invalid_word_counts() {
    for word_count in [0i32, 3, -4] {
        let bytes = word_count.to_le_bytes().to_vec();
        let mut reader = RecordReader::new(Cursor::new(bytes), Encoding::Binary);
        assert!(matches!(
            reader.read_record(),
            Err(ReaderError::InvalidFormat(_))
        ));
    }
}

#[test]
fn test_text_count_mismatch() {
    let text = "6\n0 0.5 0.1 \n0 0 \n";
    let mut reader = RecordReader::new(Cursor::new(text), Encoding::Text);
    assert!(matches!(
        reader.read_record(),
        Err(ReaderError::InvalidFormat(_))
    ));
}

#[test]
fn test_text_skips_blank_lines() -> Result<(), ReaderError> {
    let text = "\n4\n0 0.5 \n3 0 \n\n";
    let mut reader = RecordReader::new(Cursor::new(text), Encoding::Text);
    let record = reader.read_record()?.unwrap();
    assert_eq!(record.error_count(), 3);
    assert!(reader.read_record()?.is_none());
    Ok(())
}

#[test]
fn test_entries_reject_label_outside_measurement() {
    let record = Record::new(vec![0.0, 1.0], vec![0, 7]).unwrap();
    assert!(record.entries().is_err());

    let record = Record::new(vec![0.0, 0.3, 1.0], vec![0, 0, 1]).unwrap();
    assert!(record.entries().is_err());
}

#[test]
fn test_entries_reject_oversized_special_block() {
    let record = Record::new(vec![0.0, 0.0, -4.0, 1.0], vec![0, 0, 0, 1]).unwrap();
    assert!(record.entries().is_err());
}
