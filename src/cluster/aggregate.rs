//! Centroid sums and counts built from the current assignments.

use crate::dataset::{Centroids, Dataset};
use crate::error::Result;
use crate::metric::{checked_distance, Metric};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Points per partial accumulator in the parallel reduction.
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 4096;

/// Running per-cluster coordinate sums (`f64`) and member counts.
///
/// Partial accumulators from disjoint point ranges combine with
/// [`Accumulator::merge`]; that reduction is the only synchronization point of
/// the parallel step.
#[derive(Debug, Clone)]
pub(crate) struct Accumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
    dim: usize,
}

impl Accumulator {
    pub(crate) fn new(k: usize, dim: usize) -> Self {
        Self {
            sums: vec![0.0; k * dim],
            counts: vec![0; k],
            dim,
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, cluster: usize, point: &[f32]) {
        let sum = &mut self.sums[cluster * self.dim..(cluster + 1) * self.dim];
        for (s, &x) in sum.iter_mut().zip(point) {
            *s += f64::from(x);
        }
        self.counts[cluster] += 1;
    }

    #[cfg(any(feature = "parallel", test))]
    pub(crate) fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.sums.iter_mut().zip(other.sums) {
            *a += b;
        }
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
        self
    }

    /// Sum every point into its assigned cluster.
    pub(crate) fn collect(dataset: &Dataset<'_>, assignment: &[usize], k: usize) -> Self {
        let dim = dataset.dim();

        // Fixed chunks merged in order keep the float sums independent of
        // how rayon schedules the work.
        #[cfg(feature = "parallel")]
        {
            let partials: Vec<Self> = assignment
                .par_chunks(PARALLEL_CHUNK)
                .enumerate()
                .map(|(chunk, labels)| {
                    let mut acc = Self::new(k, dim);
                    let offset = chunk * PARALLEL_CHUNK;
                    for (j, &c) in labels.iter().enumerate() {
                        acc.add(c, dataset.point(offset + j));
                    }
                    acc
                })
                .collect();
            partials.into_iter().fold(Self::new(k, dim), Self::merge)
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut acc = Self::new(k, dim);
            for (point, &c) in dataset.points().zip(assignment) {
                acc.add(c, point);
            }
            acc
        }
    }

    /// Turn sums into means.
    ///
    /// A cluster with no members keeps its `previous` centroid; its count is
    /// reported as zero so the caller can decide whether to reseed it.
    pub(crate) fn finish(self, previous: &Centroids) -> (Centroids, Vec<usize>) {
        let mut centroids = previous.clone();
        for (c, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let sum = &self.sums[c * self.dim..(c + 1) * self.dim];
            for (out, &s) in centroids.centroid_mut(c).iter_mut().zip(sum) {
                *out = (s / count as f64) as f32;
            }
        }
        (centroids, self.counts)
    }
}

/// Per-cluster distance between `before` and `after`.
pub(crate) fn centroid_drift<M: Metric>(
    metric: &M,
    before: &Centroids,
    after: &Centroids,
) -> Result<Vec<f64>> {
    before
        .iter()
        .zip(after.iter())
        .enumerate()
        .map(|(c, (a, b))| checked_distance(metric, a, b, "centroids", c))
        .collect()
}

/// Euclidean norm of a per-cluster drift vector.
pub(crate) fn total_movement(drift: &[f64]) -> f64 {
    drift.iter().map(|d| d * d).sum::<f64>().sqrt()
}
