use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use mille::tracks::TrackConverter;
use mille::writer::{Encoding, RecordWriter};

use super::config::Config;

/// Convert a directory of track files to a record file
pub fn run(
    input: PathBuf,
    output: PathBuf,
    text: bool,
    keep_zeros: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::from_file(&path)?
        }
        None => Config::default(),
    };

    let writer_config = config.writer_config(text, keep_zeros);
    let output = output_path(&output, writer_config.encoding);

    info!("Converting tracks to Millepede-II records");
    info!("  Input:  {}", input.display());
    info!("  Output: {}", output.display());
    info!(
        "  Encoding: {:?}, keep zeros: {}, capacity: {}",
        writer_config.encoding, writer_config.keep_zeros, writer_config.capacity
    );

    let writer = RecordWriter::create(&output, writer_config)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;

    let converter = TrackConverter::new(config.alignment());
    let stats = converter
        .convert_directory(&input, writer)
        .with_context(|| format!("Failed to convert tracks from {}", input.display()))?;

    info!("Conversion complete!");
    info!("  Files: {}", stats.files);
    if stats.files_skipped > 0 {
        warn!("  Files skipped: {}", stats.files_skipped);
    }
    info!(
        "  Tracks selected: {} of {}",
        stats.tracks_selected, stats.tracks_read
    );
    info!("  Hits selected: {} of {}", stats.hits_selected, stats.hits_read);
    info!("  Records written: {}", stats.writer.records_written);
    info!("  Bytes written: {}", stats.writer.bytes_written);
    if stats.writer.capacity_rejections > 0 {
        info!(
            "  Measurements rejected for capacity: {}",
            stats.writer.capacity_rejections
        );
    }

    Ok(())
}

/// Append the encoding's extension to the output name
fn output_path(output: &Path, encoding: Encoding) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".");
    name.push(encoding.extension());
    PathBuf::from(name)
}
