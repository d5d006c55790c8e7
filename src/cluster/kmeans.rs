//! K-means (Lloyd's algorithm) over a fixed-size observation set.
//!
//! # Algorithm
//!
//! 1. **Seeding**: draw `k` centroids uniformly at random from the points,
//!    *with replacement*. Two clusters may start on the same point.
//! 2. **Assignment**: every point joins the cluster of its nearest centroid.
//!    Ties go to the lowest centroid index.
//! 3. **Update**: every centroid moves to the mean of its members. A cluster
//!    with no members keeps its previous centroid; it is never reseeded or
//!    dropped, so the fit always reports exactly `k` centroids.
//! 4. **Convergence**: stop once no centroid changed (exact equality), or
//!    after `max_iter` rounds. Hitting the cap is not an error.
//!
//! Seeding is non-deterministic unless a seed is set with
//! [`Kmeans::with_seed`] or an RNG is passed to [`Kmeans::fit_with_rng`].

use rand::prelude::*;
use tracing::{debug, trace};

use super::metric::distance;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::point::{self, Point, DIM};

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 100;

/// K-means clusterer configuration.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    seed: Option<u64>,
}

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Cluster id for each input point, in input order.
    pub assignments: Vec<usize>,
    /// Final centroid of each cluster; always `k` entries.
    pub centroids: Vec<Point>,
    /// Number of assignment/update rounds performed.
    pub iterations: usize,
    /// Whether the run stopped because the centroids stopped moving.
    pub converged: bool,
}

impl KmeansFit {
    /// Number of clusters (including empty ones).
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Member count of each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &c in &self.assignments {
            sizes[c] += 1;
        }
        sizes
    }

    /// Indices of the points assigned to `cluster`.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Kmeans {
    /// Create a k-means clusterer for `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the centroid sampling for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cluster `points`, drawing initial centroids from the configured seed
    /// (or the thread RNG when unseeded).
    pub fn fit(&self, points: &[Point]) -> Result<KmeansFit> {
        match self.seed {
            Some(s) => self.fit_with_rng(points, &mut StdRng::seed_from_u64(s)),
            None => self.fit_with_rng(points, &mut rand::rng()),
        }
    }

    /// Cluster `points`, drawing initial centroids from `rng`.
    ///
    /// The configured seed is ignored.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> Result<KmeansFit> {
        self.validate(points.len())?;

        let n = points.len();
        let mut centroids: Vec<Point> = (0..self.k)
            .map(|_| points[rng.random_range(0..n)])
            .collect();
        trace!(?centroids, "initial centroids");

        let mut assignments = vec![0usize; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            iterations += 1;

            Self::assign_into(points, &centroids, &mut assignments);
            let updated = self.update(points, &assignments, &centroids);

            if updated == centroids {
                converged = true;
                break;
            }
            trace!(iteration = iterations, "centroids moved");
            centroids = updated;
        }

        if converged {
            debug!(k = self.k, iterations, "k-means converged");
        } else {
            debug!(
                k = self.k,
                max_iter = self.max_iter,
                "k-means stopped at iteration cap"
            );
        }

        Ok(KmeansFit {
            assignments,
            centroids,
            iterations,
            converged,
        })
    }

    /// Assign every point to its nearest centroid, lowest index on ties.
    ///
    /// This is the assignment step of the algorithm; running it against the
    /// centroids of a converged fit reproduces that fit's assignments.
    pub fn assign(points: &[Point], centroids: &[Point]) -> Vec<usize> {
        let mut out = vec![0usize; points.len()];
        Self::assign_into(points, centroids, &mut out);
        out
    }

    fn validate(&self, n: usize) -> Result<()> {
        point::check_len(n)?;
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
        Ok(())
    }

    fn assign_into(points: &[Point], centroids: &[Point], out: &mut [usize]) {
        for (slot, p) in out.iter_mut().zip(points) {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (j, c) in centroids.iter().enumerate() {
                let d = distance(p, c);
                // Strict comparison keeps the first minimum.
                if d < best_dist {
                    best_dist = d;
                    best = j;
                }
            }
            *slot = best;
        }
    }

    fn update(&self, points: &[Point], assignments: &[usize], previous: &[Point]) -> Vec<Point> {
        let mut sums = vec![[0.0f64; DIM]; self.k];
        let mut counts = vec![0usize; self.k];

        for (p, &c) in points.iter().zip(assignments) {
            counts[c] += 1;
            for (s, x) in sums[c].iter_mut().zip(p.coords()) {
                *s += x;
            }
        }

        (0..self.k)
            .map(|j| {
                if counts[j] == 0 {
                    trace!(cluster = j, "empty cluster keeps its centroid");
                    return previous[j];
                }
                let count = counts[j] as f64;
                Point::from_coords(sums[j].map(|s| s / count))
            })
            .collect()
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        Ok(self.fit(points)?.assignments)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
