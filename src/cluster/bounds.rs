//! Per-point and per-cluster state carried between Hamerly steps.
//!
//! Pure storage: every array is dense and index-aligned with the dataset (or
//! with the cluster ids), sized once, and only ever written by the step engine.

/// Assignment value for a point that has not been through a full scan yet.
pub const UNASSIGNED: usize = usize::MAX;

/// Bounds for every point, indexed in parallel with the dataset.
#[derive(Debug, Clone)]
pub(crate) struct PointBounds {
    /// `assignment[i]`: nearest cluster found for point `i`, or [`UNASSIGNED`].
    pub(crate) assignment: Vec<usize>,
    /// `upper[i] >= d(x_i, c_{assignment[i]})`.
    pub(crate) upper: Vec<f64>,
    /// `lower[i] <= d(x_i, c_j)` for every `j != assignment[i]`.
    pub(crate) lower: Vec<f64>,
}

impl PointBounds {
    /// Fresh bounds for `n` points: nothing assigned, nothing provable.
    pub(crate) fn new(n: usize) -> Self {
        Self {
            assignment: vec![UNASSIGNED; n],
            upper: vec![f64::INFINITY; n],
            lower: vec![0.0; n],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.assignment.len()
    }
}

/// Per-cluster geometry, rebuilt from the input centroids on every step.
#[derive(Debug, Clone)]
pub(crate) struct ClusterBounds {
    /// `half_min_separation[c] = min_{c' != c} d(c, c') / 2`.
    pub(crate) half_min_separation: Vec<f64>,
    /// `drift[c]`: distance centroid `c` moved since the previous step.
    pub(crate) drift: Vec<f64>,
}

impl ClusterBounds {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            half_min_separation: vec![f64::INFINITY; k],
            drift: vec![0.0; k],
        }
    }

    pub(crate) fn k(&self) -> usize {
        self.half_min_separation.len()
    }
}
