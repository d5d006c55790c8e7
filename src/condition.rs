//! Optimal / non-optimal labeling of clustered observations.
//!
//! A point is *optimal* when it sits within a fixed Euclidean distance of
//! its cluster's centroid. The threshold is in raw sensor units; nothing is
//! normalized.

use std::fmt;

use crate::cluster::{distance, KmeansFit};
use crate::error::{Error, Result};
use crate::point::Point;

/// Default distance threshold for an optimal reading.
pub const OPTIMAL_THRESHOLD: f64 = 2.0;

/// Label attached to each observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Within the threshold of its centroid.
    Optimal,
    /// Farther than the threshold from its centroid.
    NonOptimal,
}

impl Condition {
    /// Lowercase label text.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Optimal => "optimal",
            Condition::NonOptimal => "non-optimal",
        }
    }

    /// Whether this is [`Condition::Optimal`].
    pub fn is_optimal(self) -> bool {
        self == Condition::Optimal
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One row of the augmented dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    /// The observation.
    pub point: Point,
    /// Cluster the observation was assigned to.
    pub cluster: usize,
    /// Distance from the observation to its centroid.
    pub distance: f64,
    /// Resulting label.
    pub condition: Condition,
}

/// Distance-threshold classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionClassifier {
    threshold: f64,
}

impl Default for ConditionClassifier {
    fn default() -> Self {
        Self {
            threshold: OPTIMAL_THRESHOLD,
        }
    }
}

impl ConditionClassifier {
    /// Classifier with the given threshold.
    ///
    /// Fails if `threshold` is negative or not a number.
    pub fn try_new(threshold: f64) -> Result<Self> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must be a non-negative number",
            });
        }
        Ok(Self { threshold })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Label a distance directly.
    #[inline]
    pub fn classify_distance(&self, d: f64) -> Condition {
        if d <= self.threshold {
            Condition::Optimal
        } else {
            Condition::NonOptimal
        }
    }

    /// Label `point` against the centroid of `cluster`.
    ///
    /// Fails with [`Error::InvalidClusterId`] if `cluster` has no centroid.
    pub fn classify(
        &self,
        point: &Point,
        cluster: usize,
        centroids: &[Point],
    ) -> Result<Condition> {
        let centroid = centroid_of(cluster, centroids)?;
        Ok(self.classify_distance(distance(point, centroid)))
    }

    /// Build the labeled table for a finished clustering run.
    pub fn label_all(&self, points: &[Point], fit: &KmeansFit) -> Result<Vec<LabeledPoint>> {
        if points.len() != fit.assignments.len() {
            return Err(Error::InvalidDatasetSize {
                expected: fit.assignments.len(),
                found: points.len(),
            });
        }
        points
            .iter()
            .zip(&fit.assignments)
            .map(|(p, &cluster)| -> Result<LabeledPoint> {
                let d = distance(p, centroid_of(cluster, &fit.centroids)?);
                Ok(LabeledPoint {
                    point: *p,
                    cluster,
                    distance: d,
                    condition: self.classify_distance(d),
                })
            })
            .collect()
    }
}

fn centroid_of(cluster: usize, centroids: &[Point]) -> Result<&Point> {
    centroids.get(cluster).ok_or(Error::InvalidClusterId {
        cluster,
        n_clusters: centroids.len(),
    })
}
