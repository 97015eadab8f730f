//! K-means clustering driven by repeated steps.
//!
//! Partitions data into k clusters by alternating two moves until the
//! centroids stop moving:
//!
//! 1. **Assign**: each point to its nearest centroid
//! 2. **Update**: each centroid to the mean of its points
//!
//! One assign-and-update round is a [`KmeansStep`]. [`Kmeans`] owns everything
//! around it: k-means++ seeding, reseeding empty clusters, and the stopping
//! rule. By default the step is [`HamerlyKmeans`], which returns the same
//! assignments as an exhaustive scan while skipping most distance work.
//!
//! ## K-means++ Initialization
//!
//! 1. Choose the first centroid uniformly at random
//! 2. Choose each next centroid with probability proportional to D(x)²
//!    (squared distance to the nearest centroid chosen so far)

use super::hamerly::HamerlyKmeans;
use super::traits::{Clustering, KmeansStep};
use crate::dataset::{Centroids, Dataset};
use crate::error::{Error, Result};
use crate::metric::{Euclidean, Metric};
use rand::prelude::*;
use tracing::{debug, info, warn};

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum number of steps.
    max_iter: usize,
    /// Stop once a step moves the centroids less than this.
    tol: f64,
    /// Random seed.
    seed: Option<u64>,
}

/// Result of a k-means run.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Final centroids.
    pub centroids: Centroids,
    /// Cluster of each point, from the last step.
    pub labels: Vec<usize>,
    /// Points per cluster, from the last step.
    pub counts: Vec<usize>,
    /// Steps performed.
    pub iterations: usize,
    /// Metric evaluations spent by the step engine.
    pub distance_calculations: u64,
    /// Whether the movement dropped below the tolerance before `max_iter`.
    pub converged: bool,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            tol: 1e-4,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance on the total centroid movement.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cluster row vectors under the Euclidean metric.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        let (flat, dim) = Dataset::flatten(data)?;
        let dataset = Dataset::new(&flat, dim)?;
        self.fit_dataset(dataset, Euclidean)
    }

    /// Cluster `dataset` under `metric` with k-means++ seeding and Hamerly steps.
    pub fn fit_dataset<M: Metric>(&self, dataset: Dataset<'_>, metric: M) -> Result<KmeansFit> {
        self.validate(&dataset)?;
        let mut rng = self.rng();
        let init = init_centroids(&dataset, &metric, self.k, &mut rng)?;
        let mut engine = HamerlyKmeans::new(dataset, &metric);
        self.run(&mut engine, &dataset, init, &mut rng)
    }

    /// Drive an arbitrary step engine from the given initial centroids.
    ///
    /// `engine` must be bound to `dataset` and not have run a step with a
    /// different cluster count.
    pub fn fit_with<S: KmeansStep>(
        &self,
        engine: &mut S,
        dataset: &Dataset<'_>,
        init: Centroids,
    ) -> Result<KmeansFit> {
        self.validate(dataset)?;
        if init.k() != self.k {
            return Err(Error::ClusterCountMismatch {
                expected: self.k,
                found: init.k(),
            });
        }
        let mut rng = self.rng();
        self.run(engine, dataset, init, &mut rng)
    }

    fn validate(&self, dataset: &Dataset<'_>) -> Result<()> {
        let n = dataset.n_points();
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be non-negative",
            });
        }
        Ok(())
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        }
    }

    fn run<S: KmeansStep>(
        &self,
        engine: &mut S,
        dataset: &Dataset<'_>,
        init: Centroids,
        rng: &mut impl Rng,
    ) -> Result<KmeansFit> {
        let mut centroids = init;
        let mut counts = vec![0; self.k];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            let step = engine.iterate(&centroids)?;
            iterations += 1;
            centroids = step.centroids;
            counts = step.counts;

            let empty: Vec<usize> = counts
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count == 0)
                .map(|(c, _)| c)
                .collect();
            if !empty.is_empty() {
                warn!(
                    iteration = iterations,
                    clusters = ?empty,
                    "reseeding empty clusters"
                );
                for &c in &empty {
                    let idx = reseed_point(dataset, &centroids, rng);
                    centroids
                        .centroid_mut(c)
                        .copy_from_slice(dataset.point(idx));
                }
                continue;
            }

            debug!(
                iteration = iterations,
                movement = step.movement,
                "kmeans step"
            );
            if step.movement < self.tol {
                converged = true;
                break;
            }
        }

        if converged {
            info!(iterations, "kmeans converged");
        } else {
            info!(iterations, "kmeans stopped at max_iter");
        }

        Ok(KmeansFit {
            centroids,
            labels: engine.assignments().to_vec(),
            counts,
            iterations,
            distance_calculations: engine.distance_calculations(),
            converged,
        })
    }
}

/// k-means++ seeding with `D(x)²` weights under `metric`.
fn init_centroids<M: Metric>(
    dataset: &Dataset<'_>,
    metric: &M,
    k: usize,
    rng: &mut impl Rng,
) -> Result<Centroids> {
    let n = dataset.n_points();
    let dim = dataset.dim();
    let mut flat: Vec<f32> = Vec::with_capacity(k * dim);

    let first = rng.random_range(0..n);
    flat.extend_from_slice(dataset.point(first));

    // Squared distance from each point to its nearest chosen centroid.
    let mut nearest: Vec<f64> = dataset
        .points()
        .map(|p| metric.distance(p, dataset.point(first)).powi(2))
        .collect();

    for _ in 1..k {
        let total: f64 = nearest.iter().sum();
        let selected = if total > 0.0 {
            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            // Rounding can leave `cumsum` just short of `threshold`.
            let mut selected = nearest.iter().rposition(|&d| d > 0.0).unwrap_or(0);
            for (j, &d) in nearest.iter().enumerate() {
                cumsum += d;
                if cumsum >= threshold && d > 0.0 {
                    selected = j;
                    break;
                }
            }
            selected
        } else {
            rng.random_range(0..n)
        };

        let chosen = dataset.point(selected);
        flat.extend_from_slice(chosen);
        for (d, p) in nearest.iter_mut().zip(dataset.points()) {
            *d = d.min(metric.distance(p, chosen).powi(2));
        }
    }

    Centroids::new(flat, dim)
}

/// Pick a random data point that does not coincide with any current centroid.
///
/// A centroid placed on top of another one loses every tie to the lower index
/// and stays empty. When every point already sits on a centroid, any point
/// will do.
fn reseed_point(dataset: &Dataset<'_>, centroids: &Centroids, rng: &mut impl Rng) -> usize {
    let free: Vec<usize> = dataset
        .points()
        .enumerate()
        .filter(|&(_, p)| centroids.iter().all(|c| c != p))
        .map(|(i, _)| i)
        .collect();
    if free.is_empty() {
        rng.random_range(0..dataset.n_points())
    } else {
        free[rng.random_range(0..free.len())]
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
