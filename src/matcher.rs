//! Species recommendation by range penalty.
//!
//! Each species is scored against the dataset medians. For every feature
//! whose median falls outside the species' inclusive range, the penalty grows
//! by the absolute distance from the median to the range midpoint. A species
//! whose ranges contain all three medians scores exactly zero.
//!
//! The score is not a metric: several species can tie at zero with quite
//! different ranges. Ties go to the species that appears first in the
//! database.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Error, Result};
use crate::plant::{PlantDatabase, PlantRange};
use crate::point::{Feature, Point};

/// A scored species.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Species name as written in the table.
    pub species: String,
    /// Non-negative penalty; 0 is a perfect fit.
    pub distance: f64,
}

/// Penalty of `plant` against `medians`.
pub fn penalty(plant: &PlantRange, medians: &Point) -> f64 {
    Feature::ALL
        .iter()
        .map(|&f| {
            let range = plant.range(f);
            let value = medians.get(f);
            if range.contains(value) {
                0.0
            } else {
                (value - range.midpoint()).abs()
            }
        })
        .sum()
}

/// Score one species.
pub fn score(plant: &PlantRange, medians: &Point) -> MatchResult {
    MatchResult {
        species: plant.species.clone(),
        distance: penalty(plant, medians),
    }
}

/// The lowest-penalty species; the earliest entry wins ties.
///
/// Fails with [`Error::EmptyDatabase`] if there is nothing to match against.
pub fn best_match(db: &PlantDatabase, medians: &Point) -> Result<MatchResult> {
    let mut best: Option<(&PlantRange, f64)> = None;
    for plant in db {
        let d = penalty(plant, medians);
        // Strict comparison keeps the first minimum.
        let better = match best {
            None => true,
            Some((_, best_d)) => d < best_d,
        };
        if better {
            best = Some((plant, d));
        }
    }
    let (plant, distance) = best.ok_or(Error::EmptyDatabase)?;
    debug!(species = %plant.species, distance, "best matching species");
    Ok(MatchResult {
        species: plant.species.clone(),
        distance,
    })
}

/// Score a user-selected species, looked up case-insensitively.
pub fn score_species(db: &PlantDatabase, species: &str, medians: &Point) -> Result<MatchResult> {
    Ok(score(db.resolve(species)?, medians))
}

/// Every species, best first; equal scores keep database order.
pub fn rank(db: &PlantDatabase, medians: &Point) -> Result<Vec<MatchResult>> {
    if db.is_empty() {
        return Err(Error::EmptyDatabase);
    }
    let mut scored: Vec<MatchResult> = db.iter().map(|p| score(p, medians)).collect();
    scored.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    Ok(scored)
}
