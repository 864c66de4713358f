use anyhow::{Context, Result};
use std::path::PathBuf;

use mille::reader::RecordReader;

/// Display the records of a Millepede-II input file
pub fn run(file: PathBuf, limit: Option<usize>, json: bool, summary: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = RecordReader::open(&file).context("Failed to open record file")?;

    if summary {
        let encoding = reader.encoding();
        let summary = reader.summary().context("Failed to read records")?;

        println!("Record File Information");
        println!("=======================");
        println!("File: {}", file.display());
        println!("Encoding: {:?}", encoding);
        println!();
        println!("{}", summary);
        return Ok(());
    }

    for (i, record) in reader.take(limit.unwrap_or(usize::MAX)).enumerate() {
        let record = record.with_context(|| format!("Failed to read record {}", i))?;
        let entries = record
            .entries()
            .with_context(|| format!("Failed to decode record {}", i))?;

        if json {
            let line = serde_json::json!({
                "record": i,
                "word_count": record.word_count(),
                "error_count": record.error_count(),
                "entries": entries,
            });
            println!("{}", line);
            continue;
        }

        println!(
            "Record {}: {} words, {} errors",
            i,
            record.word_count(),
            record.error_count()
        );
        for entry in &entries {
            println!("  {}", entry);
        }
    }

    Ok(())
}
