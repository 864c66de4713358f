//! Integration tests for mille
//!
//! These tests exercise the full pipeline from track files to record files and back.

use mille::reader::RecordReader;
use mille::tracks::{
    write_track_file, AlignmentConfig, Hit, RigidBodyDerivatives, Track, TrackConverter,
};
use mille::writer::{Encoding, Entry, RecordWriter, WriterConfig};
use std::fs;
use tempfile::tempdir;

fn hit(module_id: i64, phase: f64) -> Hit {
    Hit {
        module_id,
        residual: 0.02 * phase.sin(),
        sigma: 0.005,
        module: RigidBodyDerivatives {
            x: phase.cos(),
            y: 0.5,
            z: 0.75,
            rx: 0.125,
            ry: -0.125,
            rz: 0.25,
        },
        layer: RigidBodyDerivatives {
            x: 1.0,
            y: 0.0,
            z: 0.0,
            rx: 0.5 * phase.sin(),
            ry: 0.5 * phase.cos(),
            rz: 0.125,
        },
        track: [-1.0, 0.0, -100.0 * phase, 0.0, 0.5],
    }
}

fn tracks(count: usize, first: usize) -> Vec<Track> {
    (first..first + count)
        .map(|t| Track {
            chi2: 10.0 + t as f64,
            pz: if t % 4 == 3 { 50.0 } else { 800.0 },
            hits: (0..16)
                .map(|h| hit((h % 4) as i64 * 100 + 1, t as f64 + h as f64 * 0.3))
                .collect(),
        })
        .collect()
}

/// The smallest useful record, byte by byte
#[test]
fn test_binary_file_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mp2input.bin");

    let mut writer = RecordWriter::open(&path, true, false).unwrap();
    writer
        .append_measurement(&[0.0, 2.5], &[1.0], &[42], 0.01, 0.001)
        .unwrap();
    writer.flush().unwrap();
    let stats = writer.close().unwrap();
    assert_eq!(stats.bytes_written, 44);

    let mut expected = Vec::new();
    expected.extend_from_slice(&10i32.to_le_bytes());
    for value in [0.0f32, 0.01, 2.5, 0.001, 1.0] {
        expected.extend_from_slice(&value.to_le_bytes());
    }
    for label in [0i32, 0, 2, 0, 42] {
        expected.extend_from_slice(&label.to_le_bytes());
    }
    assert_eq!(fs::read(&path).unwrap(), expected);
}

#[test]
fn test_text_file_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mp2input.txt");

    let mut writer = RecordWriter::open(&path, false, false).unwrap();
    writer
        .append_measurement(&[0.0, 2.5], &[1.0], &[42], 0.01, 0.001)
        .unwrap();
    writer.flush().unwrap();
    writer
        .append_measurement(&[1e-5], &[123456.7], &[7], -3.0, 0.5)
        .unwrap();
    writer.flush().unwrap();
    writer.close().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "10\n0 0.01 2.5 0.001 1 \n0 0 2 0 42 \n\
         10\n0 -3 1e-05 0.5 123457 \n0 0 1 0 7 \n"
    );
}

#[test]
fn test_unwritable_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("mp2input.bin");
    assert!(RecordWriter::open(&path, true, false).is_err());
}

#[test]
fn test_convert_pipeline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tracks");
    fs::create_dir(&input).unwrap();
    write_track_file(input.join("run_001.parquet"), &tracks(8, 0)).unwrap();
    write_track_file(input.join("run_002.parquet"), &tracks(4, 8)).unwrap();

    let output = dir.path().join("mp2input.bin");
    let writer = RecordWriter::create(&output, WriterConfig::binary()).unwrap();
    let stats = TrackConverter::new(AlignmentConfig::default())
        .convert_directory(&input, writer)
        .unwrap();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.tracks_read, 12);
    assert_eq!(stats.tracks_selected, 9);
    assert_eq!(stats.hits_selected, 9 * 16);
    assert_eq!(stats.writer.records_written, 9);
    assert_eq!(stats.writer.bytes_written, fs::metadata(&output).unwrap().len());

    let summary = RecordReader::open(&output).unwrap().summary().unwrap();
    assert_eq!(summary.records, 9);
    assert_eq!(summary.measurements, 9 * 16);
    assert_eq!(summary.total_errors, 0);
    assert_eq!(summary.special_blocks, 0);

    // module 1001 gives the smallest label (layer 10), module 1301 the largest
    assert_eq!(summary.label_range, Some((101, 13011)));
}

#[test]
fn test_text_and_binary_agree() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tracks");
    fs::create_dir(&input).unwrap();
    write_track_file(input.join("tracks.parquet"), &tracks(6, 0)).unwrap();

    let converter = TrackConverter::default();
    for config in [WriterConfig::binary(), WriterConfig::text()] {
        let path = dir.path().join(format!("mp2input.{}", config.encoding.extension()));
        let writer = RecordWriter::create(&path, config).unwrap();
        converter.convert_directory(&input, writer).unwrap();
    }

    let binary = RecordReader::open(dir.path().join("mp2input.bin")).unwrap();
    let text = RecordReader::open(dir.path().join("mp2input.txt")).unwrap();
    assert_eq!(binary.encoding(), Encoding::Binary);
    assert_eq!(text.encoding(), Encoding::Text);

    let binary: Vec<_> = binary.collect::<Result<_, _>>().unwrap();
    let text: Vec<_> = text.collect::<Result<_, _>>().unwrap();
    assert_eq!(binary.len(), text.len());

    for (b, t) in binary.iter().zip(&text) {
        assert_eq!(b.labels(), t.labels());
        for (x, y) in b.values().iter().zip(t.values()) {
            assert!((x - y).abs() <= 1e-5 * x.abs(), "{} vs {}", x, y);
        }
    }
}

#[test]
fn test_keep_zeros_pipeline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tracks");
    fs::create_dir(&input).unwrap();
    write_track_file(input.join("tracks.parquet"), &tracks(1, 0)).unwrap();

    let output = dir.path().join("mp2input.bin");
    let writer =
        RecordWriter::create(&output, WriterConfig::binary().with_keep_zeros(true)).unwrap();
    TrackConverter::default()
        .convert_directory(&input, writer)
        .unwrap();

    let record = RecordReader::open(&output).unwrap().next().unwrap().unwrap();
    // residual, 5 locals, sigma, 7 globals per hit
    assert_eq!(record.len(), 1 + 16 * 14);

    let entries = record.entries().unwrap();
    assert_eq!(
        entries[2],
        Entry::Local {
            index: 2,
            derivative: 0.0
        }
    );
}
