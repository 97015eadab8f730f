//! Dense point storage.
//!
//! Both [`Dataset`] and [`Centroids`] keep one vector per contiguous slice of a
//! flat `f32` buffer (point `i` is `data[i * dim..(i + 1) * dim]`), the same
//! SoA layout the rest of the crate flattens `&[Vec<f32>]` input into.

use crate::error::{Error, Result};

/// Borrowed, immutable view over `n_points × dim` values.
///
/// Construction rejects empty input, ragged lengths, and non-finite values, so
/// every distance evaluated against a `Dataset` point sees finite coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    data: &'a [f32],
    dim: usize,
    n_points: usize,
}

impl<'a> Dataset<'a> {
    /// Wrap a flat buffer holding `data.len() / dim` points.
    pub fn new(data: &'a [f32], dim: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        if data.len() % dim != 0 {
            return Err(Error::InvalidParameter {
                name: "data",
                message: "length must be a multiple of the dimension",
            });
        }
        if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFinite {
                what: "dataset",
                index: pos / dim,
            });
        }
        Ok(Self {
            data,
            dim,
            n_points: data.len() / dim,
        })
    }

    /// Flatten row vectors into owned storage suitable for [`Dataset::new`].
    ///
    /// Returns the buffer and the shared dimensionality.
    pub fn flatten(rows: &[Vec<f32>]) -> Result<(Vec<f32>, usize)> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let d = first.len();
        let mut flat: Vec<f32> = Vec::with_capacity(rows.len() * d);
        for row in rows {
            if row.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        Ok((flat, d))
    }

    /// Number of points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Dimensionality of every point.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of point `i`.
    #[inline]
    pub fn point(&self, i: usize) -> &'a [f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over points in index order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &'a [f32]> + 'a {
        self.data.chunks_exact(self.dim)
    }

    /// The underlying flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }
}

/// Owned `k × dim` centroid matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroids {
    data: Vec<f32>,
    dim: usize,
}

impl Centroids {
    /// Take ownership of a flat buffer holding `data.len() / dim` centroids.
    ///
    /// Values are not checked for finiteness here; the step engines do that
    /// before touching any state.
    pub fn new(data: Vec<f32>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        if data.is_empty() {
            return Err(Error::InvalidClusterCount {
                requested: 0,
                n_items: 0,
            });
        }
        if data.len() % dim != 0 {
            return Err(Error::InvalidParameter {
                name: "data",
                message: "length must be a multiple of the dimension",
            });
        }
        Ok(Self { data, dim })
    }

    /// Build from one vector per centroid.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let (flat, dim) = Dataset::flatten(rows)?;
        Self::new(flat, dim)
    }

    /// Number of centroids.
    #[inline]
    pub fn k(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Dimensionality of every centroid.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of centroid `c`.
    #[inline]
    pub fn centroid(&self, c: usize) -> &[f32] {
        &self.data[c * self.dim..(c + 1) * self.dim]
    }

    /// Mutable coordinates of centroid `c`.
    #[inline]
    pub fn centroid_mut(&mut self, c: usize) -> &mut [f32] {
        &mut self.data[c * self.dim..(c + 1) * self.dim]
    }

    /// Iterate over centroids in cluster order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// The underlying flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Split into one vector per centroid.
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.data
            .chunks_exact(self.dim)
            .map(<[f32]>::to_vec)
            .collect()
    }

    /// Check that this matrix can drive a step over `dim`-dimensional points.
    ///
    /// `expected_k` is the cluster count fixed by an earlier step, if any.
    pub(crate) fn check_step_input(&self, dim: usize, expected_k: Option<usize>) -> Result<()> {
        if self.dim != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: self.dim,
            });
        }
        if let Some(expected) = expected_k {
            if self.k() != expected {
                return Err(Error::ClusterCountMismatch {
                    expected,
                    found: self.k(),
                });
            }
        }
        if let Some(index) = self.first_non_finite() {
            return Err(Error::NonFinite {
                what: "centroids",
                index,
            });
        }
        Ok(())
    }

    /// Index of the first centroid holding a NaN or infinity.
    pub(crate) fn first_non_finite(&self) -> Option<usize> {
        self.data
            .iter()
            .position(|x| !x.is_finite())
            .map(|pos| pos / self.dim)
    }
}
