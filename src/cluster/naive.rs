//! Exhaustive k-means step: every point against every centroid.
//!
//! `n * k` distance evaluations per step, no state beyond the last assignment.
//! Kept as the reference the pruned engine must agree with, and as a simpler
//! engine for small `n * k`.

use super::aggregate::{centroid_drift, total_movement, Accumulator};
use super::traits::{KmeansStep, StepResult};
use crate::dataset::{Centroids, Dataset};
use crate::error::Result;
use crate::metric::{checked_distance, Metric};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Brute-force k-means step engine.
#[derive(Debug, Clone)]
pub struct NaiveKmeans<'a, M> {
    dataset: Dataset<'a>,
    metric: M,
    assignment: Vec<usize>,
    k: Option<usize>,
    distance_calculations: u64,
}

impl<'a, M: Metric> NaiveKmeans<'a, M> {
    /// Bind an engine to `dataset` and `metric`.
    pub fn new(dataset: Dataset<'a>, metric: M) -> Self {
        Self {
            dataset,
            metric,
            assignment: Vec::new(),
            k: None,
            distance_calculations: 0,
        }
    }

    /// Index of the nearest centroid to `point`, lowest index on ties.
    fn nearest(&self, point: &[f32], index: usize, centroids: &Centroids) -> Result<usize> {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (c, centroid) in centroids.iter().enumerate() {
            let d = checked_distance(&self.metric, point, centroid, "distance", index)?;
            if d < best_dist {
                best_dist = d;
                best = c;
            }
        }
        Ok(best)
    }
}

impl<M: Metric> KmeansStep for NaiveKmeans<'_, M> {
    fn iterate(&mut self, centroids: &Centroids) -> Result<StepResult> {
        centroids.check_step_input(self.dataset.dim(), self.k)?;
        let k = centroids.k();
        let n = self.dataset.n_points();

        #[cfg(feature = "parallel")]
        let assignment: Vec<usize> = (0..n)
            .into_par_iter()
            .map(|i| self.nearest(self.dataset.point(i), i, centroids))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let assignment: Vec<usize> = self
            .dataset
            .points()
            .enumerate()
            .map(|(i, point)| self.nearest(point, i, centroids))
            .collect::<Result<_>>()?;

        let (new_centroids, counts) =
            Accumulator::collect(&self.dataset, &assignment, k).finish(centroids);
        let movement = total_movement(&centroid_drift(&self.metric, centroids, &new_centroids)?);
        let calcs = (n * k + k) as u64;

        debug!(k, distance_calculations = calcs, movement, "naive step");

        self.assignment = assignment;
        self.k = Some(k);
        self.distance_calculations += calcs;

        Ok(StepResult {
            centroids: new_centroids,
            counts,
            movement,
        })
    }

    fn assignments(&self) -> &[usize] {
        &self.assignment
    }

    fn distance_calculations(&self) -> u64 {
        self.distance_calculations
    }
}
