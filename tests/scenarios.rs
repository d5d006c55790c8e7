use plantwise::analysis::{self, AnalysisParams};
use plantwise::cluster::Kmeans;
use plantwise::condition::ConditionClassifier;
use plantwise::matcher::best_match;
use plantwise::{Condition, Dataset, Error, PlantDatabase, Point, Range, DATASET_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;

const ROSE_AND_CACTUS: &str = "\
Plant   Moisture  Light     Temperature
rose    40-60     400-600   15-25
cactus  10-20     800-1000  25-35
";

#[test]
fn identical_readings_fill_one_cluster() {
    let p = Point::new(20.0, 500.0, 50.0);
    let data = vec![p; DATASET_SIZE];

    for seed in 0..8 {
        let fit = Kmeans::new(3).with_seed(seed).fit(&data).unwrap();
        assert!(fit.converged);

        let mut sizes = fit.cluster_sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![0, 0, DATASET_SIZE]);
        // Initial centroids were drawn from the data, so the empty clusters
        // still sit on that same reading.
        assert_eq!(fit.centroids, vec![p; 3]);

        let rows = ConditionClassifier::default().label_all(&data, &fit).unwrap();
        assert!(rows.iter().all(|r| r.condition == Condition::Optimal));
    }
}

#[test]
fn rose_matches_mild_conditions() {
    let db = PlantDatabase::parse(ROSE_AND_CACTUS).unwrap();
    let m = best_match(&db, &Point::new(20.0, 500.0, 50.0)).unwrap();
    assert_eq!(m.species, "rose");
    assert_eq!(m.distance, 0.0);
}

#[test]
fn malformed_range_is_rejected() {
    let err = "abc".parse::<Range>().unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(err, Error::MalformedRange { .. }));
}

#[test]
fn short_dataset_is_rejected_before_clustering() {
    let data = vec![Point::new(20.0, 500.0, 50.0); DATASET_SIZE - 1];
    assert!(Dataset::new(data.clone()).unwrap_err().is_invalid_input());

    let err = Kmeans::new(3).with_seed(0).fit(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidDatasetSize {
            expected: 25,
            found: 24
        }
    ));
}

#[test]
fn empty_database_is_reported() {
    let err = best_match(&PlantDatabase::new(), &Point::new(0.0, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, Error::EmptyDatabase));
}

#[test]
fn full_run_with_injected_rng() {
    // Two groups of readings: a cool shady corner and a warm bright one.
    let points: Vec<Point> = (0..DATASET_SIZE)
        .map(|i| {
            let wobble = (i % 5) as f64 * 0.2;
            if i < 13 {
                Point::new(18.0 + wobble, 450.0 + wobble, 52.0 - wobble)
            } else {
                Point::new(30.0 - wobble, 900.0 - wobble, 15.0 + wobble)
            }
        })
        .collect();
    let dataset = Dataset::new(points).unwrap();
    let db = PlantDatabase::parse(ROSE_AND_CACTUS).unwrap();

    let params = AnalysisParams {
        k: 2,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(2024);
    let report = analysis::run_with_rng(&dataset, &db, Some("Cactus"), &params, &mut rng).unwrap();

    assert_eq!(report.rows.len(), DATASET_SIZE);
    assert_eq!(report.fit.centroids.len(), 2);
    // Medians come from the larger, cooler group.
    assert_eq!(report.best.species, "rose");
    assert_eq!(report.selected.as_ref().unwrap().species, "cactus");
    assert!(report.selected.unwrap().distance > 0.0);
}
