//! End-to-end run: cluster, label, summarize, recommend.

use rand::Rng;
use tracing::info;

use crate::cluster::{Kmeans, KmeansFit, DEFAULT_MAX_ITER};
use crate::condition::{ConditionClassifier, LabeledPoint, OPTIMAL_THRESHOLD};
use crate::error::Result;
use crate::matcher::{self, MatchResult};
use crate::plant::PlantDatabase;
use crate::point::{Dataset, DatasetSummary};

/// Number of clusters used when none is configured.
pub const DEFAULT_CLUSTERS: usize = 3;

/// Tunables for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Number of clusters.
    pub k: usize,
    /// K-means iteration cap.
    pub max_iter: usize,
    /// Distance threshold for an optimal reading.
    pub threshold: f64,
    /// Seed for centroid sampling; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_CLUSTERS,
            max_iter: DEFAULT_MAX_ITER,
            threshold: OPTIMAL_THRESHOLD,
            seed: None,
        }
    }
}

impl AnalysisParams {
    fn kmeans(&self) -> Kmeans {
        let km = Kmeans::new(self.k).with_max_iter(self.max_iter);
        match self.seed {
            Some(s) => km.with_seed(s),
            None => km,
        }
    }
}

/// Everything the presentation layer needs from a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Raw clustering result.
    pub fit: KmeansFit,
    /// One row per observation, in input order.
    pub rows: Vec<LabeledPoint>,
    /// Median and spread of every feature.
    pub summary: DatasetSummary,
    /// How well the user-selected species fits, if one was given.
    pub selected: Option<MatchResult>,
    /// The best matching species.
    pub best: MatchResult,
}

impl Report {
    /// Number of rows labeled optimal.
    pub fn optimal_count(&self) -> usize {
        self.rows.iter().filter(|r| r.condition.is_optimal()).count()
    }
}

/// Run the full analysis with the RNG implied by `params.seed`.
pub fn run(
    dataset: &Dataset,
    db: &PlantDatabase,
    selected: Option<&str>,
    params: &AnalysisParams,
) -> Result<Report> {
    let classifier = ConditionClassifier::try_new(params.threshold)?;
    let fit = params.kmeans().fit(dataset)?;
    finish(dataset, db, selected, &classifier, fit)
}

/// Run the full analysis drawing initial centroids from `rng`.
pub fn run_with_rng<R: Rng + ?Sized>(
    dataset: &Dataset,
    db: &PlantDatabase,
    selected: Option<&str>,
    params: &AnalysisParams,
    rng: &mut R,
) -> Result<Report> {
    let classifier = ConditionClassifier::try_new(params.threshold)?;
    let fit = params.kmeans().fit_with_rng(dataset, rng)?;
    finish(dataset, db, selected, &classifier, fit)
}

fn finish(
    dataset: &Dataset,
    db: &PlantDatabase,
    selected: Option<&str>,
    classifier: &ConditionClassifier,
    fit: KmeansFit,
) -> Result<Report> {
    let rows = classifier.label_all(dataset, &fit)?;

    let summary = dataset.summary();
    let medians = summary.medians();
    let selected = selected
        .map(|name| matcher::score_species(db, name, &medians))
        .transpose()?;
    let best = matcher::best_match(db, &medians)?;

    let report = Report {
        fit,
        rows,
        summary,
        selected,
        best,
    };
    info!(
        optimal = report.optimal_count(),
        total = report.rows.len(),
        best = %report.best.species,
        "analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::error::Error;
    use crate::point::{Point, DATASET_SIZE};

    fn db() -> PlantDatabase {
        PlantDatabase::parse(
            "Plant Moisture Light Temperature\n\
             Rose 40-60 400-600 15-25\n\
             Cactus 10-20 800-1000 25-35\n",
        )
        .unwrap()
    }

    fn uniform() -> Dataset {
        Dataset::new(vec![Point::new(20.0, 500.0, 50.0); DATASET_SIZE]).unwrap()
    }

    #[test]
    fn test_run_uniform_dataset() {
        let params = AnalysisParams {
            seed: Some(4),
            ..Default::default()
        };
        let report = run(&uniform(), &db(), Some("CACTUS"), &params).unwrap();

        assert_eq!(report.rows.len(), DATASET_SIZE);
        assert!(report.rows.iter().all(|r| r.condition == Condition::Optimal));
        assert_eq!(report.optimal_count(), DATASET_SIZE);
        assert_eq!(report.best.species, "Rose");
        assert_eq!(report.best.distance, 0.0);
        assert_eq!(report.selected.unwrap().species, "Cactus");
        assert_eq!(report.summary.medians(), Point::new(20.0, 500.0, 50.0));
    }

    #[test]
    fn test_unknown_selection_fails() {
        let params = AnalysisParams {
            seed: Some(0),
            ..Default::default()
        };
        let err = run(&uniform(), &db(), Some("orchid"), &params).unwrap_err();
        assert!(matches!(err, Error::UnknownSpecies(_)));
    }

    #[test]
    fn test_empty_database_fails() {
        let params = AnalysisParams {
            seed: Some(0),
            ..Default::default()
        };
        let err = run(&uniform(), &PlantDatabase::new(), None, &params).unwrap_err();
        assert!(matches!(err, Error::EmptyDatabase));
    }

    #[test]
    fn test_bad_threshold_fails() {
        let params = AnalysisParams {
            threshold: -1.0,
            seed: Some(0),
            ..Default::default()
        };
        assert!(run(&uniform(), &db(), None, &params).is_err());
    }
}
