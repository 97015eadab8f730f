//! Distance functions the step engines are generic over.
//!
//! Bound pruning is only sound for a true metric: in particular the triangle
//! inequality `d(a, c) <= d(a, b) + d(b, c)` must hold. The engines cannot
//! check this, so implementing [`Metric`] for something that violates it
//! (squared Euclidean, cosine distance, ...) is a caller error that silently
//! produces wrong assignments.

use crate::error::{Error, Result};

/// A distance function over dense `f32` vectors.
///
/// Implementations must be pure, symmetric, non-negative, and satisfy the
/// triangle inequality. Accumulate in `f64`; the bounds kept by
/// [`HamerlyKmeans`](crate::cluster::HamerlyKmeans) are `f64`.
pub trait Metric: Sync {
    /// Distance between `a` and `b`. Both slices have the same length.
    fn distance(&self, a: &[f32], b: &[f32]) -> f64;
}

impl<M: Metric + ?Sized> Metric for &M {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        (**self).distance(a, b)
    }
}

/// Evaluate `metric` and reject NaN or infinite results.
///
/// `what` and `index` identify the operand for the error.
#[inline]
pub(crate) fn checked_distance<M: Metric + ?Sized>(
    metric: &M,
    a: &[f32],
    b: &[f32],
    what: &'static str,
    index: usize,
) -> Result<f64> {
    let d = metric.distance(a, b);
    if d.is_finite() {
        Ok(d)
    } else {
        Err(Error::NonFinite { what, index })
    }
}

/// L2 distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let d = f64::from(x) - f64::from(y);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

/// L1 (city block) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Metric for Manhattan {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (f64::from(x) - f64::from(y)).abs())
            .sum()
    }
}

/// L-infinity distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl Metric for Chebyshev {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (f64::from(x) - f64::from(y)).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        assert_eq!(Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(Euclidean.distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_manhattan_and_chebyshev() {
        assert_eq!(Manhattan.distance(&[0.0, 0.0], &[3.0, -4.0]), 7.0);
        assert_eq!(Chebyshev.distance(&[0.0, 0.0], &[3.0, -4.0]), 4.0);
    }

    #[test]
    fn test_triangle_inequality_spot_check() {
        let a = [0.5f32, -1.0, 2.0];
        let b = [3.0f32, 0.25, -1.5];
        let c = [-2.0f32, 4.0, 0.0];
        let metrics: [&dyn Metric; 3] = [&Euclidean, &Manhattan, &Chebyshev];
        for m in metrics {
            assert!(m.distance(&a, &c) <= m.distance(&a, &b) + m.distance(&b, &c) + 1e-12);
        }
    }

    #[test]
    fn test_checked_distance_rejects_nan() {
        struct Broken;
        impl Metric for Broken {
            fn distance(&self, _: &[f32], _: &[f32]) -> f64 {
                f64::NAN
            }
        }
        assert_eq!(
            checked_distance(&Broken, &[0.0], &[1.0], "distance", 7).unwrap_err(),
            Error::NonFinite {
                what: "distance",
                index: 7
            }
        );
        assert_eq!(
            checked_distance(&Euclidean, &[0.0], &[1.0], "distance", 0),
            Ok(1.0)
        );
    }

    #[test]
    fn test_metric_by_reference() {
        fn generic<M: Metric>(m: M) -> f64 {
            m.distance(&[0.0], &[2.0])
        }
        assert_eq!(generic(&Manhattan), 2.0);
    }
}
