use crate::dataset::Centroids;
use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}

/// Output of one k-means step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Mean of each cluster's members; an empty cluster keeps its input centroid.
    pub centroids: Centroids,
    /// Members per cluster. Zero marks an empty cluster.
    pub counts: Vec<usize>,
    /// `sqrt(Σ_c d(input_c, output_c)²)`, the convergence signal.
    pub movement: f64,
}

/// One assign-then-update step of Lloyd-style k-means.
///
/// Implementations are bound to a dataset at construction and keep per-point
/// state across calls; feed each call's [`StepResult::centroids`] (possibly
/// edited, e.g. to reseed empty clusters) back into the next call.
pub trait KmeansStep {
    /// Assign every point to its nearest centroid and recompute the means.
    fn iterate(&mut self, centroids: &Centroids) -> Result<StepResult>;

    /// Assignments from the last successful step (empty before the first).
    fn assignments(&self) -> &[usize];

    /// Exact metric evaluations performed since construction.
    fn distance_calculations(&self) -> u64;
}
