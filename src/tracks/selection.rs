use log::warn;

use super::config::AlignmentConfig;
use super::types::{Hit, Measurement, RigidBodyDerivatives, Track};
use crate::writer::MAX_LABEL;

/// Offset added to input module ids so that stations count from 1
pub const MODULE_OFFSET: i64 = 1000;

/// Largest label suffix below a module number (`module*10 + 6`)
const MAX_SUFFIX: i64 = 6;

impl AlignmentConfig {
    /// Whether a track passes the quality cuts
    pub fn accepts_track(&self, track: &Track) -> bool {
        let cuts = &self.selection;
        !(track.chi2 > cuts.max_chi2
            || track.pz < cuts.min_pz
            || track.pz > cuts.max_pz
            || track.hits.len() < cuts.min_hits)
    }

    /// Build the measurement for a hit, or `None` if the hit is rejected.
    ///
    /// Labels are derived from the module id (offset by [`MODULE_OFFSET`]),
    /// with `layer = module/100` and `station = module/1000`:
    ///
    /// | level   | labels                | derivatives                     |
    /// |---------|-----------------------|---------------------------------|
    /// | module  | `module*10 + 1`       | x                               |
    /// | module  | `(module/10)*100 + 2` | rz                              |
    /// | module  | `module*10 + 1..=6`   | x, y, z, rx, ry, rz (six dof)   |
    /// | layer   | `layer*10 + 1..=5`    | x, y, rx, ry, rz                |
    /// | layer   | `layer*10 + 1..=6`    | x, y, z, rx, ry, rz (`layer_z`) |
    /// | layer   | `layer*10 + 1..=2`    | y, rz (reduced)                 |
    /// | station | `station*10 + 1..=6`  | x, y, z, rx, ry, rz             |
    /// | station | `station*10 + 1..=2`  | y, rz (reduced)                 |
    ///
    /// Six-dof modules with `merge_sides` skip the y label `module*10 + 2`.
    /// No label is ever 0. Hits whose module id would give a label above
    /// [`MAX_LABEL`] or below 1 are rejected.
    pub fn measurement(&self, hit: &Hit) -> Option<Measurement> {
        let cuts = &self.selection;
        if hit.residual.abs() > cuts.max_abs_residual {
            return None;
        }

        let d = &hit.layer;
        let checked = [hit.module.x, hit.module.rz, d.x, d.y, d.z, d.rx, d.ry, d.rz];
        if checked.iter().any(|&v| v < cuts.invalid_derivative) {
            return None;
        }

        let Some(module) = self.module_number(hit.module_id) else {
            warn!(
                "Hit on module id {} rejected: labels out of range",
                hit.module_id
            );
            return None;
        };

        let mut measurement = Measurement {
            local: hit.track.iter().map(|&v| v as f32).collect(),
            residual: hit.residual as f32,
            sigma: hit.sigma as f32,
            ..Default::default()
        };

        let m = &hit.module;
        if self.hierarchy.six_dof_modules {
            measurement.push_global(module * 10 + 1, m.x);
            if !self.hierarchy.merge_sides {
                measurement.push_global(module * 10 + 2, m.y);
            }
            for (suffix, derivative) in (3..).zip([m.z, m.rx, m.ry, m.rz]) {
                measurement.push_global(module * 10 + suffix, derivative);
            }
        } else {
            measurement.push_global(module * 10 + 1, m.x);
            measurement.push_global((module / 10) * 100 + 2, m.rz);
        }

        if self.hierarchy.layers {
            let layer = module / 100;
            if self.hierarchy.six_dof_layers {
                if d.rx.abs() > cuts.max_abs_layer_rotation
                    || d.ry.abs() > cuts.max_abs_layer_rotation
                {
                    return None;
                }
                if self.hierarchy.layer_z {
                    push_rigid_body(&mut measurement, layer, d);
                } else {
                    for (suffix, derivative) in (1..).zip([d.x, d.y, d.rx, d.ry, d.rz]) {
                        measurement.push_global(layer * 10 + suffix, derivative);
                    }
                }
            } else {
                push_reduced(&mut measurement, layer, d);
            }
        }

        if self.hierarchy.stations {
            let station = module / 1000;
            if self.hierarchy.six_dof_stations {
                push_rigid_body(&mut measurement, station, d);
            } else {
                push_reduced(&mut measurement, station, d);
            }
        }

        Some(measurement)
    }

    /// Module number used for labels, or `None` if its labels do not fit
    fn module_number(&self, module_id: i64) -> Option<i64> {
        let module_id = if self.hierarchy.merge_sides && module_id % 10 == 1 {
            module_id - 1
        } else {
            module_id
        };
        let module = module_id.checked_add(MODULE_OFFSET)?;
        let highest = module.checked_mul(10)?.checked_add(MAX_SUFFIX)?;
        (module >= 0 && highest <= MAX_LABEL).then_some(module)
    }
}

/// Labels `id*10 + 1..=6` for x, y, z, rx, ry, rz
fn push_rigid_body(measurement: &mut Measurement, id: i64, d: &RigidBodyDerivatives) {
    for (suffix, derivative) in (1..).zip([d.x, d.y, d.z, d.rx, d.ry, d.rz]) {
        measurement.push_global(id * 10 + suffix, derivative);
    }
}

/// Labels `id*10 + 1..=2` for y and rz
fn push_reduced(measurement: &mut Measurement, id: i64, d: &RigidBodyDerivatives) {
    measurement.push_global(id * 10 + 1, d.y);
    measurement.push_global(id * 10 + 2, d.rz);
}
