//! Sensor observations and the fixed-size dataset they form.
//!
//! A [`Point`] is one observation in the 3-dimensional feature space
//! `(temperature, light, moisture)`. A [`Dataset`] holds exactly
//! [`DATASET_SIZE`] of them; any other count is rejected at construction so
//! that nothing downstream ever sees a short or padded dataset.

use std::fmt;
use std::ops::Deref;

use crate::error::{Error, Result};

/// Number of observations every dataset must hold.
pub const DATASET_SIZE: usize = 25;

/// Dimensionality of the feature space.
pub const DIM: usize = 3;

/// One environmental observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Temperature reading.
    pub temperature: f64,
    /// Light level reading.
    pub light: f64,
    /// Moisture reading.
    pub moisture: f64,
}

impl Point {
    /// Create a point from its three readings.
    pub fn new(temperature: f64, light: f64, moisture: f64) -> Self {
        Self {
            temperature,
            light,
            moisture,
        }
    }

    /// Coordinates in feature order `(temperature, light, moisture)`.
    #[inline]
    pub fn coords(&self) -> [f64; DIM] {
        [self.temperature, self.light, self.moisture]
    }

    /// Build a point from coordinates in feature order.
    #[inline]
    pub fn from_coords(c: [f64; DIM]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Reading for one feature.
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Temperature => self.temperature,
            Feature::Light => self.light,
            Feature::Moisture => self.moisture,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.temperature, self.light, self.moisture
        )
    }
}

/// The three measured features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Air temperature.
    Temperature,
    /// Light level.
    Light,
    /// Soil moisture.
    Moisture,
}

impl Feature {
    /// All features in coordinate order.
    pub const ALL: [Feature; DIM] = [Feature::Temperature, Feature::Light, Feature::Moisture];

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Temperature => "temperature",
            Feature::Light => "light",
            Feature::Moisture => "moisture",
        }
    }
}

/// Exactly [`DATASET_SIZE`] observations, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    /// Wrap `points`, rejecting any count other than [`DATASET_SIZE`] and
    /// any NaN or infinite reading.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        check_len(points.len())?;
        check_finite(&points)?;
        Ok(Self { points })
    }

    /// Zip three equally sized reading columns into a dataset.
    pub fn from_columns(temperature: &[f64], light: &[f64], moisture: &[f64]) -> Result<Self> {
        for column in [temperature, light, moisture] {
            check_len(column.len())?;
        }
        let points = temperature
            .iter()
            .zip(light)
            .zip(moisture)
            .map(|((&t, &l), &m)| Point::new(t, l, m))
            .collect();
        Self::new(points)
    }

    /// All readings of one feature, in input order.
    pub fn column(&self, feature: Feature) -> Vec<f64> {
        self.points.iter().map(|p| p.get(feature)).collect()
    }

    /// Median and sample standard deviation for every feature.
    pub fn summary(&self) -> DatasetSummary {
        let col = |feature| ColumnSummary::of(&self.column(feature));
        DatasetSummary {
            temperature: col(Feature::Temperature),
            light: col(Feature::Light),
            moisture: col(Feature::Moisture),
        }
    }
}

impl Deref for Dataset {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

/// Fail unless `n` equals [`DATASET_SIZE`].
pub(crate) fn check_len(n: usize) -> Result<()> {
    if n != DATASET_SIZE {
        return Err(Error::InvalidDatasetSize {
            expected: DATASET_SIZE,
            found: n,
        });
    }
    Ok(())
}

fn check_finite(points: &[Point]) -> Result<()> {
    for (index, p) in points.iter().enumerate() {
        if let Some(&feature) = Feature::ALL.iter().find(|&&f| !p.get(f).is_finite()) {
            return Err(Error::NonFiniteReading {
                index,
                feature: feature.name(),
            });
        }
    }
    Ok(())
}

/// Median and spread of one feature column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    /// Statistical median.
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
}

impl ColumnSummary {
    /// Summarize a column of readings.
    pub fn of(values: &[f64]) -> Self {
        Self {
            median: median(values),
            std_dev: sample_std_dev(values),
        }
    }
}

/// Per-feature summaries for a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSummary {
    /// Temperature column.
    pub temperature: ColumnSummary,
    /// Light column.
    pub light: ColumnSummary,
    /// Moisture column.
    pub moisture: ColumnSummary,
}

impl DatasetSummary {
    /// Summary for one feature.
    pub fn get(&self, feature: Feature) -> ColumnSummary {
        match feature {
            Feature::Temperature => self.temperature,
            Feature::Light => self.light,
            Feature::Moisture => self.moisture,
        }
    }

    /// The three medians, as consumed by the range matcher.
    pub fn medians(&self) -> Point {
        Point::new(
            self.temperature.median,
            self.light.median,
            self.moisture.median,
        )
    }
}

/// Median of `values`; the mean of the two middle values for even counts.
///
/// Returns NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation; NaN for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> Vec<Point> {
        (0..DATASET_SIZE)
            .map(|i| Point::new(i as f64, 100.0 * i as f64, 50.0))
            .collect()
    }

    #[test]
    fn test_dataset_requires_exact_size() {
        assert!(Dataset::new(ramp()).is_ok());

        let mut short = ramp();
        short.pop();
        let err = Dataset::new(short).unwrap_err();
        assert!(err.is_invalid_input());

        let mut long = ramp();
        long.push(Point::new(0.0, 0.0, 0.0));
        assert!(Dataset::new(long).is_err());
    }

    #[test]
    fn test_from_columns_zips_in_order() {
        let t: Vec<f64> = (0..25).map(f64::from).collect();
        let l: Vec<f64> = (0..25).map(|i| f64::from(i) * 10.0).collect();
        let m = vec![42.0; 25];
        let ds = Dataset::from_columns(&t, &l, &m).unwrap();
        assert_eq!(ds[3], Point::new(3.0, 30.0, 42.0));
        assert_eq!(ds.len(), DATASET_SIZE);
    }

    #[test]
    fn test_from_columns_rejects_short_column() {
        let full = vec![1.0; 25];
        let short = vec![1.0; 24];
        let err = Dataset::from_columns(&full, &short, &full).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDatasetSize {
                expected: 25,
                found: 24
            }
        ));
    }

    #[test]
    fn test_dataset_rejects_non_finite_readings() {
        let mut points = ramp();
        points[7].light = f64::NAN;
        let err = Dataset::new(points).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(
            err,
            Error::NonFiniteReading {
                index: 7,
                feature: "light"
            }
        ));

        let mut moisture = vec![50.0; DATASET_SIZE];
        moisture[24] = f64::INFINITY;
        let t = vec![20.0; DATASET_SIZE];
        let err = Dataset::from_columns(&t, &t, &moisture).unwrap_err();
        assert!(matches!(
            err,
            Error::NonFiniteReading {
                index: 24,
                feature: "moisture"
            }
        ));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7.
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_std_dev(&v), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert!(sample_std_dev(&[1.0]).is_nan());
    }

    #[test]
    fn test_summary_medians() {
        let ds = Dataset::new(ramp()).unwrap();
        let s = ds.summary();
        assert_eq!(s.medians(), Point::new(12.0, 1200.0, 50.0));
        assert_eq!(s.moisture.std_dev, 0.0);
        assert_eq!(s.get(Feature::Light).median, 1200.0);
    }
}
