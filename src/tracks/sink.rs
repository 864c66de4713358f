use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Float64Builder, ListBuilder};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::columns;
use super::error::TrackError;
use super::types::{Hit, Track};

type HitField = fn(&Hit) -> f64;

/// Per-hit columns and how to extract them, in [`columns::HIT_COLUMNS`] order
fn hit_fields() -> [(&'static str, HitField); 20] {
    [
        (columns::ALIGN_ID, |h| h.module_id as f64),
        (columns::RESIDUAL_X, |h| h.residual),
        (columns::MEASURED_XE, |h| h.sigma),
        (columns::MODULE_DX, |h| h.module.x),
        (columns::MODULE_DY, |h| h.module.y),
        (columns::MODULE_DZ, |h| h.module.z),
        (columns::MODULE_DRX, |h| h.module.rx),
        (columns::MODULE_DRY, |h| h.module.ry),
        (columns::MODULE_DRZ, |h| h.module.rz),
        (columns::LAYER_DX, |h| h.layer.x),
        (columns::LAYER_DY, |h| h.layer.y),
        (columns::LAYER_DZ, |h| h.layer.z),
        (columns::LAYER_DRX, |h| h.layer.rx),
        (columns::LAYER_DRY, |h| h.layer.ry),
        (columns::LAYER_DRZ, |h| h.layer.rz),
        (columns::TRACK_DX, |h| h.track[0]),
        (columns::TRACK_DY, |h| h.track[1]),
        (columns::TRACK_DTHETA, |h| h.track[2]),
        (columns::TRACK_DPHI, |h| h.track[3]),
        (columns::TRACK_DQOP, |h| h.track[4]),
    ]
}

/// Encode tracks as a record batch in the input table layout
pub fn tracks_to_batch(tracks: &[Track]) -> Result<RecordBatch, TrackError> {
    let fields = hit_fields();
    let mut arrays: Vec<(&str, ArrayRef)> = Vec::with_capacity(2 + fields.len());
    arrays.push((
        columns::CHI2,
        Arc::new(Float64Array::from_iter_values(tracks.iter().map(|t| t.chi2))) as ArrayRef,
    ));
    arrays.push((
        columns::PZ,
        Arc::new(Float64Array::from_iter_values(tracks.iter().map(|t| t.pz))) as ArrayRef,
    ));

    for (name, field) in fields {
        let mut builder = ListBuilder::new(Float64Builder::new());
        for track in tracks {
            for hit in &track.hits {
                builder.values().append_value(field(hit));
            }
            builder.append(true);
        }
        arrays.push((name, Arc::new(builder.finish()) as ArrayRef));
    }

    Ok(RecordBatch::try_from_iter(arrays)?)
}

/// Write tracks to a Parquet file readable by [`TrackReader`](super::TrackReader)
pub fn write_track_file<P: AsRef<Path>>(path: P, tracks: &[Track]) -> Result<(), TrackError> {
    let batch = tracks_to_batch(tracks)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
