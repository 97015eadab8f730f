//! Hamerly's accelerated k-means step.
//!
//! # The Core Insight
//!
//! Lloyd's algorithm computes all `n * k` point-to-centroid distances every
//! iteration, although after the first few iterations almost no point changes
//! cluster. Hamerly (2010) keeps just two bounds per point:
//!
//! - `upper[i]`: an upper bound on `d(x_i, c_{a_i})`, the distance to the
//!   assigned centroid
//! - `lower[i]`: a lower bound on `d(x_i, c_j)` for every other centroid `j`
//!
//! plus one number per cluster, `s[c] = min_{c' != c} d(c, c') / 2`. If
//! `upper[i] < max(s[a_i], lower[i])` then no other centroid can be closer
//! (for `s`, by the triangle inequality: `d(x, c') >= d(c_a, c') - d(x, c_a) >
//! 2 * upper - upper`), and the point is skipped without any distance work.
//!
//! When centroids move, the bounds are kept valid instead of being recomputed:
//!
//! ```text
//! upper[i] += drift[a_i]
//! lower[i] -= max_{c != a_i} drift[c]
//! ```
//!
//! # Per-point tiers
//!
//! 1. **Skip**: the test above passes on the carried bounds.
//! 2. **Tighten**: compute `d(x_i, c_{a_i})` exactly, set `upper[i]`, retest.
//! 3. **Scan**: compute the remaining `k - 1` distances, take the nearest as the
//!    new assignment (lowest index on ties) and the runner-up as `lower[i]`.
//!
//! A point that has never been scanned goes straight to tier 3.
//!
//! The skip tests are strict, so a point whose nearest centroid is tied always
//! reaches a full scan. Every step therefore yields exactly the assignment an
//! exhaustive scan with lowest-index tie-breaking would.
//!
//! # Complexity
//!
//! - **Time**: `O(k² d)` geometry per step plus `O(n d)` for the bound checks;
//!   the `O(n k d)` scan only runs for points near a decision boundary.
//! - **Space**: `O(n + k)` bounds, independent of `k` per point (unlike Elkan).
//!
//! # References
//!
//! - Hamerly (2010). "Making k-means Even Faster." SDM.
//! - Elkan (2003). "Using the Triangle Inequality to Accelerate k-Means." ICML.

use super::aggregate::{centroid_drift, total_movement, Accumulator};
use super::bounds::{ClusterBounds, PointBounds, UNASSIGNED};
use super::traits::{KmeansStep, StepResult};
use crate::dataset::{Centroids, Dataset};
use crate::error::Result;
use crate::metric::{checked_distance, Metric};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use crate::error::Error;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bound-pruned k-means step engine.
///
/// Bound to one dataset and metric for a whole clustering run. The cluster
/// count is fixed by the first call to [`KmeansStep::iterate`]; later calls
/// must pass the same number of centroids.
///
/// The metric must satisfy the triangle inequality. This is not checked.
///
/// ```rust
/// use hamerly::{Centroids, Dataset, Euclidean, HamerlyKmeans, KmeansStep};
///
/// let data = [0.0, 0.0, 0.0, 1.0, 10.0, 10.0, 10.0, 11.0];
/// let dataset = Dataset::new(&data, 2).unwrap();
/// let mut engine = HamerlyKmeans::new(dataset, Euclidean);
///
/// let init = Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap();
/// let step = engine.iterate(&init).unwrap();
/// assert_eq!(step.counts, vec![2, 2]);
/// assert_eq!(engine.assignments(), &[0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct HamerlyKmeans<'a, M> {
    dataset: Dataset<'a>,
    metric: M,
    points: PointBounds,
    /// `None` until the first successful step fixes `k`.
    clusters: Option<ClusterBounds>,
    last: Option<LastStep>,
    distance_calculations: u64,
}

/// What the next step needs to know about the previous one.
#[derive(Debug, Clone)]
struct LastStep {
    /// Centroids the current bounds are relative to.
    input: Centroids,
    /// Centroids returned to the caller.
    output: Centroids,
    /// `d(input_c, output_c)` per cluster.
    movement: Vec<f64>,
}

/// How a single point was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Skipped,
    Tightened,
    Scanned { reassigned: bool },
}

/// Counters for one per-point pass.
#[derive(Debug, Clone, Copy, Default)]
struct PassStats {
    skipped: usize,
    tightened: usize,
    scanned: usize,
    reassigned: usize,
    distance_calculations: u64,
}

impl PassStats {
    fn record(&mut self, tier: Tier, calcs: u64) {
        match tier {
            Tier::Skipped => self.skipped += 1,
            Tier::Tightened => self.tightened += 1,
            Tier::Scanned { reassigned } => {
                self.scanned += 1;
                self.reassigned += usize::from(reassigned);
            }
        }
        self.distance_calculations += calcs;
    }

    #[cfg(feature = "parallel")]
    fn merge(self, other: Self) -> Self {
        Self {
            skipped: self.skipped + other.skipped,
            tightened: self.tightened + other.tightened,
            scanned: self.scanned + other.scanned,
            reassigned: self.reassigned + other.reassigned,
            distance_calculations: self.distance_calculations + other.distance_calculations,
        }
    }
}

impl<'a, M: Metric> HamerlyKmeans<'a, M> {
    /// Bind an engine to `dataset` and `metric`.
    pub fn new(dataset: Dataset<'a>, metric: M) -> Self {
        Self {
            points: PointBounds::new(dataset.n_points()),
            dataset,
            metric,
            clusters: None,
            last: None,
            distance_calculations: 0,
        }
    }

    /// The dataset this engine runs over.
    pub fn dataset(&self) -> &Dataset<'a> {
        &self.dataset
    }

    /// Cluster count fixed by the first step, if one has run.
    pub fn n_clusters(&self) -> Option<usize> {
        self.clusters.as_ref().map(ClusterBounds::k)
    }

    /// Exact metric evaluations performed since construction.
    ///
    /// Counts point-to-centroid distances, centroid pair distances for the
    /// separation refresh, and centroid drift measurements.
    pub fn distance_calculations(&self) -> u64 {
        self.distance_calculations
    }

    /// Drift of each input centroid since the previous step's input.
    ///
    /// Free when the caller passes back exactly the centroids the previous
    /// step returned; otherwise `k` metric evaluations.
    fn drift_since_last(&self, centroids: &Centroids, calcs: &mut u64) -> Result<Vec<f64>> {
        match &self.last {
            None => Ok(vec![0.0; centroids.k()]),
            Some(last) if last.output == *centroids => Ok(last.movement.clone()),
            Some(last) => {
                *calcs += centroids.k() as u64;
                centroid_drift(&self.metric, &last.input, centroids)
            }
        }
    }

    /// Recompute `s[c] = min_{c' != c} d(c, c') / 2` over all centroid pairs.
    fn refresh_separation(
        &self,
        centroids: &Centroids,
        clusters: &mut ClusterBounds,
        calcs: &mut u64,
    ) -> Result<()> {
        let k = centroids.k();
        let half = &mut clusters.half_min_separation;
        half.fill(f64::INFINITY);
        for i in 0..k {
            for j in (i + 1)..k {
                let d = checked_distance(
                    &self.metric,
                    centroids.centroid(i),
                    centroids.centroid(j),
                    "centroids",
                    i,
                )? / 2.0;
                half[i] = half[i].min(d);
                half[j] = half[j].min(d);
            }
        }
        *calcs += (k * k.saturating_sub(1) / 2) as u64;
        trace!(k, separation = ?half, "refreshed cluster separation");
        Ok(())
    }

    /// Run tiers 1-3 over every point, updating `points` in place.
    fn prune_pass(
        &self,
        centroids: &Centroids,
        clusters: &ClusterBounds,
        points: &mut PointBounds,
    ) -> Result<PassStats> {
        let metric = &self.metric;
        let dataset = &self.dataset;
        let separation = clusters.half_min_separation.as_slice();

        #[cfg(feature = "parallel")]
        {
            (
                points.assignment.par_iter_mut(),
                points.upper.par_iter_mut(),
                points.lower.par_iter_mut(),
            )
                .into_par_iter()
                .enumerate()
                .try_fold(PassStats::default, |mut stats, (i, (a, u, l))| {
                    let (tier, calcs) =
                        evaluate(metric, dataset.point(i), i, centroids, separation, a, u, l)?;
                    stats.record(tier, calcs);
                    Ok::<_, Error>(stats)
                })
                .try_reduce(PassStats::default, |a, b| Ok(a.merge(b)))
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut stats = PassStats::default();
            let slots = points
                .assignment
                .iter_mut()
                .zip(points.upper.iter_mut())
                .zip(points.lower.iter_mut());
            for (i, ((a, u), l)) in slots.enumerate() {
                let (tier, calcs) =
                    evaluate(metric, dataset.point(i), i, centroids, separation, a, u, l)?;
                stats.record(tier, calcs);
            }
            Ok(stats)
        }
    }
}

/// Widen every scanned point's bounds by how far the centroids moved.
fn apply_drift(points: &mut PointBounds, drift: &[f64]) {
    let (furthest, max, second) = furthest_drifts(drift);
    let slots = points
        .assignment
        .iter()
        .zip(points.upper.iter_mut())
        .zip(points.lower.iter_mut());
    for ((&a, u), l) in slots {
        if a == UNASSIGNED {
            continue;
        }
        *u += drift[a];
        *l -= if a == furthest { second } else { max };
    }
}

/// The two largest drifts as `(argmax, max, second max)`.
///
/// A point assigned to `argmax` only has to account for the runner-up.
fn furthest_drifts(drift: &[f64]) -> (usize, f64, f64) {
    let mut furthest = 0;
    let mut max = 0.0f64;
    let mut second = 0.0f64;
    for (c, &d) in drift.iter().enumerate() {
        if d > max {
            second = max;
            max = d;
            furthest = c;
        } else if d > second {
            second = d;
        }
    }
    (furthest, max, second)
}

/// Resolve one point. Returns the tier reached and the distances computed.
#[allow(clippy::too_many_arguments)]
#[inline]
fn evaluate<M: Metric>(
    metric: &M,
    point: &[f32],
    index: usize,
    centroids: &Centroids,
    separation: &[f64],
    assignment: &mut usize,
    upper: &mut f64,
    lower: &mut f64,
) -> Result<(Tier, u64)> {
    let previous = *assignment;
    let mut calcs = 0u64;

    let known = if previous == UNASSIGNED {
        None
    } else {
        let bound = separation[previous].max(*lower);
        if *upper < bound {
            return Ok((Tier::Skipped, 0));
        }

        let d = checked_distance(
            metric,
            point,
            centroids.centroid(previous),
            "distance",
            index,
        )?;
        calcs += 1;
        *upper = d;
        if d < bound {
            return Ok((Tier::Tightened, calcs));
        }
        Some(d)
    };

    let mut best = UNASSIGNED;
    let mut best_dist = f64::INFINITY;
    let mut runner_up = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = match known {
            Some(d) if c == previous => d,
            _ => {
                calcs += 1;
                checked_distance(metric, point, centroid, "distance", index)?
            }
        };
        if d < best_dist {
            runner_up = best_dist;
            best_dist = d;
            best = c;
        } else if d < runner_up {
            runner_up = d;
        }
    }

    *assignment = best;
    *upper = best_dist;
    *lower = runner_up;
    Ok((
        Tier::Scanned {
            reassigned: best != previous,
        },
        calcs,
    ))
}

impl<M: Metric> KmeansStep for HamerlyKmeans<'_, M> {
    fn iterate(&mut self, centroids: &Centroids) -> Result<StepResult> {
        centroids.check_step_input(self.dataset.dim(), self.n_clusters())?;
        let k = centroids.k();

        // All work happens on copies; `self` only changes once the step succeeded.
        let mut calcs = 0u64;
        let mut clusters = self
            .clusters
            .clone()
            .unwrap_or_else(|| ClusterBounds::new(k));
        let mut points = self.points.clone();
        debug_assert_eq!(points.len(), self.dataset.n_points());

        clusters.drift = self.drift_since_last(centroids, &mut calcs)?;
        self.refresh_separation(centroids, &mut clusters, &mut calcs)?;
        apply_drift(&mut points, &clusters.drift);

        let stats = self.prune_pass(centroids, &clusters, &mut points)?;
        calcs += stats.distance_calculations;

        let (new_centroids, counts) =
            Accumulator::collect(&self.dataset, &points.assignment, k).finish(centroids);
        let movement = centroid_drift(&self.metric, centroids, &new_centroids)?;
        calcs += k as u64;
        let total = total_movement(&movement);

        debug!(
            k,
            skipped = stats.skipped,
            tightened = stats.tightened,
            scanned = stats.scanned,
            reassigned = stats.reassigned,
            distance_calculations = calcs,
            movement = total,
            "hamerly step"
        );

        self.points = points;
        self.clusters = Some(clusters);
        self.last = Some(LastStep {
            input: centroids.clone(),
            output: new_centroids.clone(),
            movement,
        });
        self.distance_calculations += calcs;

        Ok(StepResult {
            centroids: new_centroids,
            counts,
            movement: total,
        })
    }

    fn assignments(&self) -> &[usize] {
        if self.clusters.is_some() {
            &self.points.assignment
        } else {
            &[]
        }
    }

    fn distance_calculations(&self) -> u64 {
        self.distance_calculations
    }
}

#[cfg(test)]
#[allow(clippy::needless_range_loop)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::metric::{Euclidean, Manhattan};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn six_points() -> Vec<f32> {
        vec![
            0.0, 0.0, 0.0, 1.0, 1.0, 0.0, // cluster A
            10.0, 10.0, 10.0, 11.0, 11.0, 10.0, // cluster B
        ]
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    /// Exhaustive nearest centroid, lowest index on ties.
    fn nearest<M: Metric>(metric: &M, point: &[f32], centroids: &Centroids) -> (usize, f64) {
        let mut best = (0, f64::INFINITY);
        for (c, centroid) in centroids.iter().enumerate() {
            let d = metric.distance(point, centroid);
            if d < best.1 {
                best = (c, d);
            }
        }
        best
    }

    fn assert_bounds_hold<M: Metric>(engine: &HamerlyKmeans<'_, M>, centroids: &Centroids) {
        let metric = &engine.metric;
        for i in 0..engine.dataset.n_points() {
            let point = engine.dataset.point(i);
            let a = engine.points.assignment[i];
            let to_assigned = metric.distance(point, centroids.centroid(a));
            assert!(engine.points.upper[i] >= to_assigned - 1e-9);
            for (c, centroid) in centroids.iter().enumerate() {
                if c != a {
                    assert!(metric.distance(point, centroid) >= engine.points.lower[i] - 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_two_clusters_scenario() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        assert!(engine.assignments().is_empty());

        let init = Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap();
        let step = engine.iterate(&init).unwrap();

        assert_eq!(engine.assignments(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(step.counts, vec![3, 3]);
        assert_close(step.centroids.centroid(0), &[1.0 / 3.0, 1.0 / 3.0]);
        assert_close(step.centroids.centroid(1), &[31.0 / 3.0, 31.0 / 3.0]);
        assert!(step.movement > 0.0);

        let again = engine.iterate(&step.centroids).unwrap();
        assert_eq!(engine.assignments(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(again.centroids, step.centroids);
        assert_eq!(again.counts, vec![3, 3]);
        assert_eq!(again.movement, 0.0);
    }

    #[test]
    fn test_first_step_counts_full_scan() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap();
        engine.iterate(&init).unwrap();
        // 1 centroid pair + 6 points * 2 centroids + 2 drift measurements.
        assert_eq!(engine.distance_calculations(), 1 + 12 + 2);
    }

    #[test]
    fn test_converged_step_skips_every_point() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap();
        let step = engine.iterate(&init).unwrap();
        let step = engine.iterate(&step.centroids).unwrap();

        let before = engine.distance_calculations();
        engine.iterate(&step.centroids).unwrap();
        // Zero drift, separated clusters: only the pair and the drift measurements.
        assert_eq!(engine.distance_calculations() - before, 1 + 2);
    }

    #[test]
    fn test_tie_goes_to_lower_index() {
        let data = [0.5f32, 0.0];
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![0.0, 0.0, 1.0, 0.0], 2).unwrap();
        engine.iterate(&init).unwrap();
        assert_eq!(engine.assignments(), &[0]);

        // Same answer with the clusters listed the other way around.
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![1.0, 0.0, 0.0, 0.0], 2).unwrap();
        engine.iterate(&init).unwrap();
        assert_eq!(engine.assignments(), &[0]);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![0.0, 0.0, 10.0, 10.0, 100.0, 100.0], 2).unwrap();
        let step = engine.iterate(&init).unwrap();
        assert_eq!(step.counts, vec![3, 3, 0]);
        assert_eq!(step.centroids.centroid(2), &[100.0, 100.0]);
    }

    #[test]
    fn test_bounds_stay_valid_while_centroids_move() {
        let data: Vec<f32> = (0..60)
            .flat_map(|i| {
                let t = i as f32 * 0.37;
                [t.sin() * 5.0 + (i % 3) as f32 * 6.0, t.cos() * 4.0]
            })
            .collect();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Manhattan);
        let mut centroids = Centroids::new(vec![0.0, 0.0, 1.0, 1.0, 2.0, -1.0], 2).unwrap();

        for _ in 0..8 {
            let step = engine.iterate(&centroids).unwrap();
            assert_bounds_hold(&engine, &centroids);
            for i in 0..ds.n_points() {
                let (expected, _) = nearest(&Manhattan, ds.point(i), &centroids);
                assert_eq!(engine.assignments()[i], expected);
            }
            centroids = step.centroids;
        }
    }

    #[test]
    fn test_caller_edited_centroids_remain_exact() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap();
        let step = engine.iterate(&init).unwrap();

        // Move centroid 1 next to cluster A; bounds must not hide the change.
        let mut edited = step.centroids.clone();
        edited.centroid_mut(1).copy_from_slice(&[0.0, 1.0]);
        engine.iterate(&edited).unwrap();
        for i in 0..ds.n_points() {
            let (expected, _) = nearest(&Euclidean, ds.point(i), &edited);
            assert_eq!(engine.assignments()[i], expected);
        }
    }

    #[test]
    fn test_single_cluster() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let init = Centroids::new(vec![3.0, 3.0], 2).unwrap();
        let step = engine.iterate(&init).unwrap();
        assert_eq!(step.counts, vec![6]);
        assert_close(step.centroids.centroid(0), &[16.0 / 3.0, 16.0 / 3.0]);
        assert_eq!(engine.assignments(), &[0; 6]);
    }

    #[test]
    fn test_cluster_count_is_fixed() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        engine
            .iterate(&Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap())
            .unwrap();
        let err = engine
            .iterate(&Centroids::new(vec![0.0, 0.0, 5.0, 5.0, 10.0, 10.0], 2).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            Error::ClusterCountMismatch {
                expected: 2,
                found: 3
            }
        );
        assert_eq!(engine.n_clusters(), Some(2));
    }

    #[test]
    fn test_non_finite_centroid_leaves_state_untouched() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let step = engine
            .iterate(&Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap())
            .unwrap();
        let calcs = engine.distance_calculations();
        let assignment = engine.assignments().to_vec();
        let upper = engine.points.upper.clone();

        let bad = Centroids::new(vec![f32::NAN, 0.0, 10.0, 10.0], 2).unwrap();
        assert!(matches!(
            engine.iterate(&bad),
            Err(Error::NonFinite {
                what: "centroids",
                index: 0
            })
        ));
        assert_eq!(engine.distance_calculations(), calcs);
        assert_eq!(engine.assignments(), assignment.as_slice());
        assert_eq!(engine.points.upper, upper);

        // The run continues normally afterwards.
        assert!(engine.iterate(&step.centroids).is_ok());
    }

    /// Euclidean, except that it fails on the point (11, 10) while `fail` is set.
    struct Flaky {
        fail: AtomicBool,
    }

    impl Metric for Flaky {
        fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
            if self.fail.load(Ordering::Relaxed) && a == [11.0f32, 10.0] {
                return f64::NAN;
            }
            Euclidean.distance(a, b)
        }
    }

    #[test]
    fn test_distance_error_mid_pass_leaves_state_untouched() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let flaky = Flaky {
            fail: AtomicBool::new(false),
        };
        let mut engine = HamerlyKmeans::new(ds, &flaky);
        engine
            .iterate(&Centroids::new(vec![0.0, 0.0, 10.0, 10.0], 2).unwrap())
            .unwrap();
        let calcs = engine.distance_calculations();
        let assignment = engine.assignments().to_vec();
        let upper = engine.points.upper.clone();
        let lower = engine.points.lower.clone();

        // Moving cluster 1 far enough forces point 5 past the skip test, so
        // the failure hits after drift has already loosened the bounds.
        let moved = Centroids::new(vec![0.0, 0.0, 20.0, 20.0], 2).unwrap();
        flaky.fail.store(true, Ordering::Relaxed);
        assert_eq!(
            engine.iterate(&moved).unwrap_err(),
            Error::NonFinite {
                what: "distance",
                index: 5
            }
        );
        assert_eq!(engine.distance_calculations(), calcs);
        assert_eq!(engine.assignments(), assignment.as_slice());
        assert_eq!(engine.points.upper, upper);
        assert_eq!(engine.points.lower, lower);

        flaky.fail.store(false, Ordering::Relaxed);
        engine.iterate(&moved).unwrap();
        assert_bounds_hold(&engine, &moved);
        assert!(engine.distance_calculations() > calcs);
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = six_points();
        let ds = Dataset::new(&data, 2).unwrap();
        let mut engine = HamerlyKmeans::new(ds, Euclidean);
        let err = engine
            .iterate(&Centroids::new(vec![0.0, 0.0, 0.0], 3).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
        assert_eq!(engine.n_clusters(), None);
    }

    #[test]
    fn test_furthest_drifts() {
        assert_eq!(furthest_drifts(&[0.5, 2.0, 1.5, 0.0]), (1, 2.0, 1.5));
        // Ties keep the first index as argmax; the runner-up equals the max.
        assert_eq!(furthest_drifts(&[3.0, 3.0, 1.0, 0.0]), (0, 3.0, 3.0));
        assert_eq!(furthest_drifts(&[0.0]), (0, 0.0, 0.0));
    }
}
