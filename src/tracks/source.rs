use std::fs::File;
use std::path::Path;

use arrow::array::{Array, Float64Array, ListArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};

use super::columns::{self, HIT_COLUMNS};
use super::error::TrackError;
use super::types::{Hit, RigidBodyDerivatives, Track};

/// Tracks per record batch read from Parquet
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Streaming reader over the tracks of one Parquet file.
///
/// Yields one `Vec<Track>` per record batch so memory stays bounded by the
/// batch size.
pub struct TrackReader {
    inner: ParquetRecordBatchReader,
}

impl TrackReader {
    /// Open a Parquet track file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TrackError> {
        Self::open_with_batch_size(path, DEFAULT_BATCH_SIZE)
    }

    /// Open a Parquet track file reading `batch_size` tracks at a time
    pub fn open_with_batch_size<P: AsRef<Path>>(
        path: P,
        batch_size: usize,
    ) -> Result<Self, TrackError> {
        let file = File::open(path)?;
        let inner = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(batch_size)
            .build()?;
        Ok(Self { inner })
    }
}

impl Iterator for TrackReader {
    type Item = Result<Vec<Track>, TrackError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|batch| {
            batch
                .map_err(TrackError::from)
                .and_then(|batch| tracks_from_batch(&batch))
        })
    }
}

/// Decode the tracks stored in one record batch
pub fn tracks_from_batch(batch: &RecordBatch) -> Result<Vec<Track>, TrackError> {
    let chi2 = get_float64_column(batch, columns::CHI2)?;
    let pz = get_float64_column(batch, columns::PZ)?;
    let lists = HIT_COLUMNS
        .iter()
        .map(|name| get_float64_list_column(batch, name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut tracks = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        if chi2.is_null(row) || pz.is_null(row) {
            return Err(invalid(columns::CHI2, format!("row {}: null track value", row)));
        }

        let per_hit = lists
            .iter()
            .zip(HIT_COLUMNS)
            .map(|(list, name)| list_row(list, name, row))
            .collect::<Result<Vec<_>, _>>()?;

        let n_hits = per_hit[0].len();
        if let Some((name, values)) = HIT_COLUMNS
            .iter()
            .zip(&per_hit)
            .find(|(_, values)| values.len() != n_hits)
        {
            return Err(invalid(
                name,
                format!("row {}: {} hits, expected {}", row, values.len(), n_hits),
            ));
        }

        let hits = (0..n_hits)
            .map(|i| {
                let v = |column: usize| per_hit[column][i];
                let rigid_body = |first: usize| RigidBodyDerivatives {
                    x: v(first),
                    y: v(first + 1),
                    z: v(first + 2),
                    rx: v(first + 3),
                    ry: v(first + 4),
                    rz: v(first + 5),
                };
                Hit {
                    module_id: module_id(v(0)),
                    residual: v(1),
                    sigma: v(2),
                    module: rigid_body(3),
                    layer: rigid_body(9),
                    track: [v(15), v(16), v(17), v(18), v(19)],
                }
            })
            .collect();

        tracks.push(Track {
            chi2: chi2.value(row),
            pz: pz.value(row),
            hits,
        });
    }

    Ok(tracks)
}

/// Module id stored as a float, truncated toward zero.
///
/// Values outside the `i64` range saturate and NaN maps to `i64::MIN`, all of
/// which lie outside the label range and get the hit rejected.
fn module_id(value: f64) -> i64 {
    if value.is_nan() {
        i64::MIN
    } else {
        value as i64
    }
}

fn invalid(column: &str, reason: String) -> TrackError {
    TrackError::InvalidColumn {
        column: column.to_string(),
        reason,
    }
}

/// Get a required Float64 column by name.
fn get_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, TrackError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| TrackError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| invalid(name, "not Float64".to_string()))
}

/// Get a required List<Float64> column by name.
fn get_float64_list_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a ListArray, TrackError> {
    let list = batch
        .column_by_name(name)
        .ok_or_else(|| TrackError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<ListArray>()
        .ok_or_else(|| invalid(name, "not a List".to_string()))?;
    match list.value_type() {
        DataType::Float64 => Ok(list),
        other => Err(invalid(name, format!("list of {}, expected Float64", other))),
    }
}

/// Values of one row of a List<Float64> column
fn list_row(list: &ListArray, name: &str, row: usize) -> Result<Vec<f64>, TrackError> {
    if list.is_null(row) {
        return Err(invalid(name, format!("row {}: null list", row)));
    }
    let values = list.value(row);
    let values = values
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| invalid(name, "not Float64".to_string()))?;
    if values.null_count() > 0 {
        return Err(invalid(name, format!("row {}: null hit value", row)));
    }
    Ok(values.values().to_vec())
}
