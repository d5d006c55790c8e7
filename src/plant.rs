//! Plant growing ranges and the species table.
//!
//! The table is plain text, one species per line:
//!
//! ```text
//! Plant     Moisture  Light     Temperature
//! Rose      40-60     400-600   15-25
//! Cactus    10–20     800–1000  25–35
//! ```
//!
//! A header line starting with `Plant` and blank lines are skipped. Ranges
//! accept either an ASCII hyphen or an en-dash between the bounds. Every
//! record is validated when the table is parsed, so a [`PlantDatabase`]
//! never holds a half-parsed entry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::point::{Feature, Point};

/// Inclusive integer bounds `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Lower bound.
    pub min: i64,
    /// Upper bound.
    pub max: i64,
}

impl Range {
    /// Bounds `[min, max]`; fails unless `min <= max`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(Error::MalformedRange {
                input: format!("{min}-{max}"),
                message: "lower bound exceeds upper bound",
            });
        }
        Ok(Self { min, max })
    }

    /// Whether `value` lies within the bounds, inclusive.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min as f64 <= value && value <= self.max as f64
    }

    /// Centre of the range.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }

    /// Where `value` falls relative to the range.
    pub fn fit(&self, value: f64) -> DimensionFit {
        if value < self.min as f64 {
            DimensionFit::Below
        } else if value > self.max as f64 {
            DimensionFit::Above
        } else {
            DimensionFit::Within
        }
    }
}

impl FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = |message| Error::MalformedRange {
            input: s.to_string(),
            message,
        };
        let normalized = s.trim().replace('\u{2013}', "-");
        let (lo, hi) = normalized
            .split_once('-')
            .ok_or_else(|| malformed("expected <min>-<max>"))?;
        let min = lo
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("lower bound is not an integer"))?;
        let max = hi
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("upper bound is not an integer"))?;
        if min > max {
            return Err(malformed("lower bound exceeds upper bound"));
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}-{}", self.min, self.max))
    }
}

/// Position of a reading relative to a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionFit {
    /// Reading is under the lower bound.
    Below,
    /// Reading is inside the bounds.
    Within,
    /// Reading is over the upper bound.
    Above,
}

impl DimensionFit {
    /// Short display text.
    pub fn display_text(&self) -> &'static str {
        match self {
            DimensionFit::Below => "below range",
            DimensionFit::Within => "within range",
            DimensionFit::Above => "above range",
        }
    }
}

/// Acceptable growing conditions for one species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantRange {
    /// Species name as written in the table.
    pub species: String,
    /// Acceptable moisture.
    pub moisture: Range,
    /// Acceptable light level.
    pub light: Range,
    /// Acceptable temperature.
    pub temperature: Range,
}

impl PlantRange {
    /// Build a record from already parsed ranges.
    pub fn new(
        species: impl Into<String>,
        moisture: Range,
        light: Range,
        temperature: Range,
    ) -> Self {
        Self {
            species: species.into(),
            moisture,
            light,
            temperature,
        }
    }

    /// Range for one feature.
    pub fn range(&self, feature: Feature) -> Range {
        match feature {
            Feature::Temperature => self.temperature,
            Feature::Light => self.light,
            Feature::Moisture => self.moisture,
        }
    }

    /// Per-feature position of `conditions` relative to this species' ranges.
    pub fn fit(&self, conditions: &Point) -> [(Feature, DimensionFit); 3] {
        Feature::ALL.map(|f| (f, self.range(f).fit(conditions.get(f))))
    }

    /// Parse one whitespace-separated record: species, moisture, light, temperature.
    fn parse_record(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[species, moisture, light, temperature] = fields.as_slice() else {
            return Err(Error::MalformedRecord {
                line: line_no,
                message: format!("expected 4 fields, found {}", fields.len()),
            });
        };
        Ok(Self::new(
            species,
            moisture.parse()?,
            light.parse()?,
            temperature.parse()?,
        ))
    }
}

/// Species ranges keyed by lowercase name, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantDatabase {
    entries: Vec<PlantRange>,
    index: HashMap<String, usize>,
}

impl PlantDatabase {
    /// Empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a species table.
    pub fn parse(text: &str) -> Result<Self> {
        let mut db = Self::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("Plant") {
                continue;
            }
            db.insert(PlantRange::parse_record(line, i + 1)?)?;
        }
        debug!(species = db.len(), "parsed plant table");
        Ok(db)
    }

    /// Add a species; fails if its name is already present in any case.
    pub fn insert(&mut self, plant: PlantRange) -> Result<()> {
        let key = plant.species.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateSpecies(plant.species));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(plant);
        Ok(())
    }

    /// Case-insensitive lookup.
    pub fn get(&self, species: &str) -> Option<&PlantRange> {
        self.index
            .get(&species.trim().to_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// Case-insensitive lookup that fails with [`Error::UnknownSpecies`].
    pub fn resolve(&self, species: &str) -> Result<&PlantRange> {
        self.get(species)
            .ok_or_else(|| Error::UnknownSpecies(species.trim().to_string()))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantRange> {
        self.entries.iter()
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the database has no species.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlantDatabase {
    type Item = &'a PlantRange;
    type IntoIter = std::slice::Iter<'a, PlantRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
