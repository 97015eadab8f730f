//! K-means steps with triangle-inequality pruning.
//!
//! ## The Step
//!
//! One k-means step assigns each point to its nearest centroid, then moves
//! every centroid to the mean of its points. Under the Euclidean metric the
//! within-cluster sum of squares
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! never increases from one step to the next. Brute force costs `n * k`
//! distance evaluations per step ([`NaiveKmeans`]). [`HamerlyKmeans`] carries an
//! upper and a lower bound per point across steps and only evaluates distances
//! for points whose bounds no longer prove their assignment, producing the same
//! assignments with far fewer evaluations once clusters settle.
//!
//! Both engines implement [`KmeansStep`], so the outer loop ([`Kmeans`], or a
//! caller's own) can swap them freely.
//!
//! ## Caller obligations
//!
//! - The metric satisfies the triangle inequality (see [`crate::metric`]).
//! - The cluster count stays fixed for the life of an engine.
//! - Empty clusters are reported with a zero count and keep their previous
//!   centroid; reseeding them is up to the caller ([`Kmeans`] does).
//!
//! ## Usage
//!
//! ```rust
//! use hamerly::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//! ```

mod aggregate;
mod bounds;
mod hamerly;
mod kmeans;
mod naive;
mod traits;

pub use bounds::UNASSIGNED;
pub use hamerly::HamerlyKmeans;
pub use kmeans::{Kmeans, KmeansFit};
pub use naive::NaiveKmeans;
pub use traits::{Clustering, KmeansStep, StepResult};
