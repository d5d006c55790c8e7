//! Environmental sensor clustering and plant matching.
//!
//! `plantwise` takes a fixed set of 25 `(temperature, light, moisture)`
//! readings and:
//! - groups them with k-means ([`cluster`]),
//! - labels each reading optimal or non-optimal by its distance to its
//!   cluster centroid ([`condition`]),
//! - recommends the species whose growing ranges best fit the median
//!   conditions ([`matcher`]).
//!
//! [`analysis::run`] chains these steps; [`io`] reads the inputs from disk.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod cluster;
pub mod condition;
pub mod error;
pub mod io;
pub mod matcher;
pub mod plant;
pub mod point;

pub use analysis::{AnalysisParams, Report};
pub use cluster::{Clustering, Kmeans, KmeansFit};
pub use condition::{Condition, ConditionClassifier, LabeledPoint};
pub use error::{Error, ErrorKind, Result};
pub use matcher::MatchResult;
pub use plant::{PlantDatabase, PlantRange, Range};
pub use point::{Dataset, Feature, Point, DATASET_SIZE};
