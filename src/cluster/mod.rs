//! Grouping observations by proximity in feature space.
//!
//! ## K-means
//!
//! Assign each point to the nearest centroid, then move each centroid to the
//! mean of its points. Repeat until nothing moves.
//!
//! **Objective**: minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Distances are plain Euclidean over the raw readings. No feature is
//! rescaled, so light (hundreds of units) dominates temperature and moisture.
//!
//! ## Usage
//!
//! ```rust
//! use plantwise::cluster::{distance, Clustering, Kmeans};
//! use plantwise::Point;
//!
//! let data: Vec<Point> = (0..25)
//!     .map(|i| if i < 12 {
//!         Point::new(18.0, 300.0, 30.0)
//!     } else {
//!         Point::new(28.0, 900.0, 60.0)
//!     })
//!     .collect();
//!
//! let fit = Kmeans::new(2).with_seed(42).fit(&data).unwrap();
//! assert_eq!(fit.centroids.len(), 2);
//! assert_eq!(fit.assignments.len(), 25);
//! assert!(distance(&data[0], &data[24]) > 600.0);
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels, fit.assignments);
//! ```

mod metric;
mod kmeans;
mod traits;

pub use metric::{distance, euclidean};
pub use kmeans::{Kmeans, KmeansFit, DEFAULT_MAX_ITER};
pub use traits::Clustering;
