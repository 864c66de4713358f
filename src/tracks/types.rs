/// Derivatives of a hit's residual with respect to one rigid body's
/// six alignment degrees of freedom
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigidBodyDerivatives {
    /// Translation along x
    pub x: f64,
    /// Translation along y
    pub y: f64,
    /// Translation along z
    pub z: f64,
    /// Rotation around x
    pub rx: f64,
    /// Rotation around y
    pub ry: f64,
    /// Rotation around z
    pub rz: f64,
}

/// One hit of a fitted track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hit {
    /// Detector module identifier as stored in the input
    pub module_id: i64,
    /// Residual in local x
    pub residual: f64,
    /// Uncertainty of the measurement in local x
    pub sigma: f64,
    /// Module derivatives
    pub module: RigidBodyDerivatives,
    /// Layer (and station) derivatives
    pub layer: RigidBodyDerivatives,
    /// Derivatives with respect to the five track parameters
    /// (x, y, theta, phi, q/p)
    pub track: [f64; 5],
}

/// One fitted track with its hits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// Fit chi-square
    pub chi2: f64,
    /// Longitudinal momentum
    pub pz: f64,
    /// Hits in fit order
    pub hits: Vec<Hit>,
}

/// Arguments for one [`RecordWriter::append_measurement`](crate::writer::RecordWriter::append_measurement) call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    /// Local derivatives, labelled `1..=n` on output
    pub local: Vec<f32>,
    /// Global derivatives
    pub global: Vec<f32>,
    /// Labels of the global derivatives
    pub labels: Vec<i64>,
    /// Residual
    pub residual: f32,
    /// Uncertainty
    pub sigma: f32,
}

impl Measurement {
    pub(super) fn push_global(&mut self, label: i64, derivative: f64) {
        self.labels.push(label);
        self.global.push(derivative as f32);
    }
}
