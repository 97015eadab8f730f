//! Bound-pruned k-means.
//!
//! `hamerly` runs k-means steps over dense `f32` vectors using Hamerly's
//! triangle-inequality bounds, skipping most point-to-centroid distance
//! evaluations while returning exactly the assignments of a brute-force scan.
//!
//! The public API:
//! - [`Dataset`] / [`Centroids`]: flat, one-vector-per-slice storage
//! - [`Metric`]: the distance the engines are generic over ([`Euclidean`], ...)
//! - [`HamerlyKmeans`] / [`NaiveKmeans`]: stateful step engines ([`KmeansStep`])
//! - [`Kmeans`]: k-means++ seeding and the convergence loop
//!
//! Enable the `parallel` feature to spread the per-point work over rayon.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod dataset;
pub mod error;
pub mod metric;

pub use cluster::{
    Clustering, HamerlyKmeans, Kmeans, KmeansFit, KmeansStep, NaiveKmeans, StepResult, UNASSIGNED,
};
pub use dataset::{Centroids, Dataset};
pub use error::{Error, Result};
pub use metric::{Chebyshev, Euclidean, Manhattan, Metric};
