use thiserror::Error;

/// Errors returned by clustering algorithms in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// A step was given a different number of centroids than the run was started with.
    #[error("cluster count mismatch: run uses {expected} clusters, step received {found}")]
    ClusterCountMismatch {
        /// Cluster count fixed by the first step.
        expected: usize,
        /// Cluster count passed to this step.
        found: usize,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A NaN or infinite value reached a distance evaluation.
    #[error("non-finite value in {what} at index {index}")]
    NonFinite {
        /// Which input carried the value (`"dataset"`, `"centroids"`, `"distance"`).
        what: &'static str,
        /// Point, centroid, or flat element index of the offending value.
        index: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
