#![no_main]

use libfuzzer_sys::fuzz_target;
use mille::reader::RecordReader;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail with an error, never panic
    for mut reader in [
        RecordReader::binary(Cursor::new(data)),
        RecordReader::text(Cursor::new(data)),
    ] {
        for _ in 0..100 {
            match reader.read_record() {
                Ok(Some(record)) => {
                    let _ = record.entries();
                }
                Ok(None) | Err(_) => break,
            }
        }
    }
});
