//! Loading readings and the plant table from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::plant::PlantDatabase;
use crate::point::Dataset;

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parse one reading per line; blank lines are skipped.
///
/// `NaN` and the infinities are rejected like any other non-numeric line.
pub fn parse_column(text: &str) -> Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::MalformedValue {
                    line: i + 1,
                    input: line.to_string(),
                })
        })
        .collect()
}

/// Read a file holding one reading per line.
pub fn read_column(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let values = parse_column(&read_to_string(path)?)?;
    debug!(path = %path.display(), count = values.len(), "read readings");
    Ok(values)
}

/// Read the three reading files and assemble a dataset.
pub fn load_dataset(
    temperature: impl AsRef<Path>,
    light: impl AsRef<Path>,
    moisture: impl AsRef<Path>,
) -> Result<Dataset> {
    Dataset::from_columns(
        &read_column(temperature)?,
        &read_column(light)?,
        &read_column(moisture)?,
    )
}

/// Read and parse a plant table.
pub fn load_plant_database(path: impl AsRef<Path>) -> Result<PlantDatabase> {
    PlantDatabase::parse(&read_to_string(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        let v = parse_column("21.5\n\n 22 \n-3e1\n").unwrap();
        assert_eq!(v, vec![21.5, 22.0, -30.0]);
    }

    #[test]
    fn test_parse_column_reports_line() {
        let err = parse_column("1.0\n2.0\nwarm\n").unwrap_err();
        assert!(matches!(err, Error::MalformedValue { line: 3, ref input } if input == "warm"));
    }

    #[test]
    fn test_parse_column_rejects_non_finite() {
        let body: String = (0..24).map(|i| format!("{i}\n")).collect();
        let err = parse_column(&format!("{body}NaN\n")).unwrap_err();
        assert!(matches!(err, Error::MalformedValue { line: 25, ref input } if input == "NaN"));

        for bad in ["inf", "-inf", "infinity", "nan"] {
            let err = parse_column(&format!("1.0\n{bad}\n")).unwrap_err();
            assert!(matches!(err, Error::MalformedValue { line: 2, .. }), "{bad}");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_column("/definitely/not/here.txt").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }

    #[test]
    fn test_load_from_temp_dir() {
        let dir = tempfile::tempdir().unwrap();

        let column = |name: &str, value: f64| {
            let path = dir.path().join(name);
            let body: String = (0..25).map(|i| format!("{}\n", value + i as f64)).collect();
            fs::write(&path, body).unwrap();
            path
        };
        let t = column("temp.txt", 15.0);
        let l = column("light.txt", 400.0);
        let m = column("moisture.txt", 40.0);
        let ds = load_dataset(&t, &l, &m).unwrap();
        assert_eq!(ds.len(), 25);
        assert_eq!(ds[0].light, 400.0);

        let db_path = dir.path().join("plantdb.txt");
        fs::write(&db_path, "Plant Moisture Light Temperature\nRose 40-60 400-600 15-25\n").unwrap();
        let db = load_plant_database(&db_path).unwrap();
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_load_rejects_infinite_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("light.txt");
        fs::write(&path, "400\ninf\n").unwrap();
        let err = read_column(&path).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
