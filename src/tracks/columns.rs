//! Column names of the track-fit input tables.
//!
//! One row per track; per-hit columns are `List<Float64>`.

/// Track fit chi-square
pub const CHI2: &str = "fitParam_chi2";
/// Longitudinal momentum of the fitted track
pub const PZ: &str = "fitParam_pz";

/// Detector module identifier of each hit
pub const ALIGN_ID: &str = "fitParam_align_id";
/// Residual of each hit in local x
pub const RESIDUAL_X: &str = "fitParam_align_local_residual_x";
/// Measurement uncertainty of each hit in local x
pub const MEASURED_XE: &str = "fitParam_align_local_measured_xe";

/// Module-level derivative with respect to x
pub const MODULE_DX: &str = "fitParam_align_local_derivation_x_x";
/// Module-level derivative with respect to y
pub const MODULE_DY: &str = "fitParam_align_local_derivation_x_y";
/// Module-level derivative with respect to z
pub const MODULE_DZ: &str = "fitParam_align_local_derivation_x_z";
/// Module-level derivative with respect to the rotation around x
pub const MODULE_DRX: &str = "fitParam_align_local_derivation_x_rx";
/// Module-level derivative with respect to the rotation around y
pub const MODULE_DRY: &str = "fitParam_align_local_derivation_x_ry";
/// Module-level derivative with respect to the rotation around z
pub const MODULE_DRZ: &str = "fitParam_align_local_derivation_x_rz";

/// Layer-level derivative with respect to x
pub const LAYER_DX: &str = "fitParam_align_global_derivation_y_x";
/// Layer-level derivative with respect to y
pub const LAYER_DY: &str = "fitParam_align_global_derivation_y_y";
/// Layer-level derivative with respect to z
pub const LAYER_DZ: &str = "fitParam_align_global_derivation_y_z";
/// Layer-level derivative with respect to the rotation around x
pub const LAYER_DRX: &str = "fitParam_align_global_derivation_y_rx";
/// Layer-level derivative with respect to the rotation around y
pub const LAYER_DRY: &str = "fitParam_align_global_derivation_y_ry";
/// Layer-level derivative with respect to the rotation around z
pub const LAYER_DRZ: &str = "fitParam_align_global_derivation_y_rz";

/// Derivative with respect to the track parameter x
pub const TRACK_DX: &str = "fitParam_align_local_derivation_x_par_x";
/// Derivative with respect to the track parameter y
pub const TRACK_DY: &str = "fitParam_align_local_derivation_x_par_y";
/// Derivative with respect to the track parameter theta
pub const TRACK_DTHETA: &str = "fitParam_align_local_derivation_x_par_theta";
/// Derivative with respect to the track parameter phi
pub const TRACK_DPHI: &str = "fitParam_align_local_derivation_x_par_phi";
/// Derivative with respect to the track parameter q/p
pub const TRACK_DQOP: &str = "fitParam_align_local_derivation_x_par_qop";

/// Per-hit list columns in the order they are read
pub const HIT_COLUMNS: [&str; 20] = [
    ALIGN_ID,
    RESIDUAL_X,
    MEASURED_XE,
    MODULE_DX,
    MODULE_DY,
    MODULE_DZ,
    MODULE_DRX,
    MODULE_DRY,
    MODULE_DRZ,
    LAYER_DX,
    LAYER_DY,
    LAYER_DZ,
    LAYER_DRX,
    LAYER_DRY,
    LAYER_DRZ,
    TRACK_DX,
    TRACK_DY,
    TRACK_DTHETA,
    TRACK_DPHI,
    TRACK_DQOP,
];
