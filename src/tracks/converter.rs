use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::writer::{RecordWriter, WriterStats};

use super::config::AlignmentConfig;
use super::error::TrackError;
use super::source::TrackReader;
use super::types::Track;

/// Statistics from a track conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Input files converted
    pub files: usize,
    /// Input files that could not be read
    pub files_skipped: usize,
    /// Tracks read from the input
    pub tracks_read: usize,
    /// Tracks passing the track cuts
    pub tracks_selected: usize,
    /// Hits on selected tracks
    pub hits_read: usize,
    /// Hits stored as measurements
    pub hits_selected: usize,
    /// Statistics of the record writer
    pub writer: WriterStats,
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files ({} skipped), {}/{} tracks selected, {}/{} hits selected; {}",
            self.files,
            self.files_skipped,
            self.tracks_selected,
            self.tracks_read,
            self.hits_selected,
            self.hits_read,
            self.writer
        )
    }
}

/// Converts fitted tracks into alignment records
#[derive(Debug, Clone, Default)]
pub struct TrackConverter {
    config: AlignmentConfig,
}

impl TrackConverter {
    /// Create a converter with the given cuts and label hierarchy
    pub fn new(config: AlignmentConfig) -> Self {
        Self { config }
    }

    /// The converter's configuration
    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// List the `.parquet` files of a directory in file-name order
    pub fn input_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, TrackError> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file()
                && path.extension().map(|e| e == "parquet").unwrap_or(false)
            {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(TrackError::NoInputFiles(dir.to_path_buf()));
        }
        files.sort();
        Ok(files)
    }

    /// Convert every track file of a directory and close the writer.
    ///
    /// One record is written per selected track. A file that cannot be opened
    /// or decoded is logged and skipped; records already written from it are
    /// kept. Errors of the record writer abort the conversion.
    pub fn convert_directory<P: AsRef<Path>, W: Write>(
        &self,
        dir: P,
        mut writer: RecordWriter<W>,
    ) -> Result<ConversionStats, TrackError> {
        let files = Self::input_files(dir)?;
        let mut stats = ConversionStats::default();

        for (i, path) in files.iter().enumerate() {
            info!("Dealing with file {} ({}/{})", path.display(), i + 1, files.len());
            match self.convert_file(path, &mut writer, &mut stats) {
                Ok(()) => {}
                Err(TrackError::WriterError(e)) => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping file {}: {}", path.display(), e);
                    stats.files_skipped += 1;
                }
            }
        }

        writer.discard();
        stats.writer = writer.close()?;
        info!("Conversion complete: {}", stats);
        Ok(stats)
    }

    /// Convert all tracks of one Parquet file
    pub fn convert_file<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        writer: &mut RecordWriter<W>,
        stats: &mut ConversionStats,
    ) -> Result<(), TrackError> {
        for batch in TrackReader::open(path)? {
            for track in batch? {
                self.write_track(&track, writer, stats)?;
            }
        }
        stats.files += 1;
        Ok(())
    }

    /// Write one track as a record if it passes the cuts
    pub fn write_track<W: Write>(
        &self,
        track: &Track,
        writer: &mut RecordWriter<W>,
        stats: &mut ConversionStats,
    ) -> Result<(), TrackError> {
        stats.tracks_read += 1;
        if !self.config.accepts_track(track) {
            return Ok(());
        }
        stats.tracks_selected += 1;
        stats.hits_read += track.hits.len();

        for hit in &track.hits {
            let Some(m) = self.config.measurement(hit) else {
                continue;
            };
            let stored = writer.stats().measurements_stored;
            if let Err(e) =
                writer.append_measurement(&m.local, &m.global, &m.labels, m.residual, m.sigma)
            {
                debug!("Hit on module {} not stored: {}", hit.module_id, e);
            }
            if writer.stats().measurements_stored > stored {
                stats.hits_selected += 1;
            }
        }

        writer.flush()?;
        Ok(())
    }
}
