use serde::Deserialize;

/// Track and hit quality cuts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectionCuts {
    /// Tracks with a larger fit chi-square are skipped
    pub max_chi2: f64,
    /// Tracks with a smaller pz are skipped
    pub min_pz: f64,
    /// Tracks with a larger pz are skipped
    pub max_pz: f64,
    /// Tracks with fewer hits are skipped
    pub min_hits: usize,
    /// Hits with a larger absolute residual are skipped
    pub max_abs_residual: f64,
    /// Derivatives below this value mark a hit as unusable
    pub invalid_derivative: f64,
    /// Hits with a larger absolute layer rotation derivative (rx, ry) are
    /// skipped when layer labels are written
    pub max_abs_layer_rotation: f64,
}

impl Default for SelectionCuts {
    fn default() -> Self {
        Self {
            max_chi2: 2000.0,
            min_pz: 100.0,
            max_pz: 5000.0,
            min_hits: 15,
            max_abs_residual: 0.05,
            invalid_derivative: -9000.0,
            max_abs_layer_rotation: 2.0,
        }
    }
}

/// Which levels of the detector hierarchy receive global labels.
///
/// Module labels are always written. Each level either gets its full set of
/// rigid-body parameters or a reduced one:
///
/// | level   | full                                  | reduced |
/// |---------|---------------------------------------|---------|
/// | module  | x, y, z, rx, ry, rz                   | x, rz   |
/// | layer   | x, y, rx, ry, rz (+ z with `layer_z`) | y, rz   |
/// | station | x, y, z, rx, ry, rz                   | y, rz   |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Hierarchy {
    /// Write six module parameters instead of x and rz.
    ///
    /// The module y translation is left out when `merge_sides` is set.
    pub six_dof_modules: bool,
    /// Write layer parameters
    pub layers: bool,
    /// Write the five or six layer rigid-body parameters instead of y and rz
    pub six_dof_layers: bool,
    /// Also write the layer z translation.
    ///
    /// Layer labels then run `+1..=+6` over x, y, z, rx, ry, rz; without it
    /// they run `+1..=+5` over x, y, rx, ry, rz.
    pub layer_z: bool,
    /// Write station parameters
    pub stations: bool,
    /// Write six station parameters instead of y and rz
    pub six_dof_stations: bool,
    /// Give both sensors of a side-by-side pair (module ids `..0` and `..1`)
    /// the same module labels
    pub merge_sides: bool,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self {
            six_dof_modules: false,
            layers: true,
            six_dof_layers: true,
            layer_z: false,
            stations: false,
            six_dof_stations: true,
            merge_sides: false,
        }
    }
}

/// Configuration of the track to record conversion
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Quality cuts
    pub selection: SelectionCuts,
    /// Label hierarchy
    pub hierarchy: Hierarchy,
}
