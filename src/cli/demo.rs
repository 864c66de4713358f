use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mille::tracks::{write_track_file, Hit, RigidBodyDerivatives, Track};

/// Marker the track fit writes for derivatives it could not compute
const INVALID_DERIVATIVE: f64 = -9999.0;

/// Generate demo track files
pub fn run(output: PathBuf, tracks: usize, files: usize) -> Result<()> {
    info!("Generating {} mock tracks in {}", tracks, output.display());

    std::fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create directory: {}", output.display()))?;

    let mock = generate_mock_tracks(tracks);
    let files = files.max(1);
    let per_file = ((mock.len() + files - 1) / files).max(1);

    for (i, chunk) in mock.chunks(per_file).enumerate() {
        let path = output.join(format!("tracks_{:03}.parquet", i));
        write_track_file(&path, chunk)
            .with_context(|| format!("Failed to write track file: {}", path.display()))?;
        info!("  Wrote {} tracks to {}", chunk.len(), path.display());
    }

    info!(
        "Convert with: mille convert -i {} -o mp2input",
        output.display()
    );
    Ok(())
}

/// Mock tracks crossing a three-station telescope.
///
/// Some tracks fail the default cuts (high chi2, low or high pz, few hits) and
/// some hits carry out-of-range residuals or the invalid-derivative marker.
fn generate_mock_tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|t| {
            let x = t as f64;
            let n_hits = 12 + (t * 7) % 10;
            Track {
                chi2: 20.0 + 2200.0 * (x * 0.37).sin().abs().powi(4),
                pz: 60.0 + 5500.0 * (x * 0.11).sin().abs(),
                hits: (0..n_hits).map(|h| mock_hit(t, h)).collect(),
            }
        })
        .collect()
}

fn mock_hit(track: usize, index: usize) -> Hit {
    let phase = track as f64 * 1.3 + index as f64 * 0.7;
    let station = index % 3;
    let layer = (index / 3) % 4;
    let module = (track + index) % 10;
    let side = (track + index) % 2;
    let module_id = (station * 1000 + layer * 100 + module * 10 + side) as i64;

    let z = 100.0 * (station * 4 + layer) as f64;
    let module_dx = if (track * 31 + index) % 97 == 0 {
        INVALID_DERIVATIVE
    } else {
        phase.cos()
    };

    Hit {
        module_id,
        residual: 0.06 * phase.sin() * (phase * 0.3).cos(),
        sigma: 0.004 + 0.002 * (phase * 0.5).sin().abs(),
        module: RigidBodyDerivatives {
            x: module_dx,
            y: 0.5 * phase.sin(),
            z: 0.01 * (phase * 1.7).cos(),
            rx: 0.2 * (phase * 0.8).sin(),
            ry: 0.2 * (phase * 1.2).cos(),
            rz: 0.01 * z * phase.sin(),
        },
        layer: RigidBodyDerivatives {
            x: phase.cos(),
            y: phase.sin(),
            z: 0.01 * (phase * 2.0).sin(),
            rx: 2.5 * (phase * 0.9).sin(),
            ry: 1.5 * (phase * 1.1).cos(),
            rz: 0.01 * z * phase.cos(),
        },
        track: [-1.0, 0.0, -z, 0.0, 1e-3 * z * z * phase.cos()],
    }
}
