//! States CSV loader
//!
//! Reads an already-normalized per-state CSV into a [`StatesMapping`].
//! One row per state per day:
//!
//! ```text
//! state,name,population,date,day,cases,new_cases,cases_per_1000
//! NY,New York,19453561,2020-03-01,1,1,1,0.000051
//! ```
//!
//! Malformed rows are skipped and reported with their line number. Within a
//! state, observations are ordered by `day`; a repeated day keeps the last
//! row seen.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{DataError, DataResult};
use crate::dashboard::{DailyObservation, StateRecord, StatesFeed, StatesMapping};

/// Row errors kept in the report; the failure count is always exact
const MAX_REPORTED_ERRORS: usize = 100;

#[derive(Debug, Deserialize)]
struct StateRow {
    state: String,
    name: String,
    population: Option<u64>,
    date: NaiveDate,
    day: u32,
    cases: u64,
    new_cases: i64,
    cases_per_1000: f64,
}

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// States in the resulting mapping
    pub total: usize,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl LoadReport {
    fn reject(&mut self, line: u64, reason: impl std::fmt::Display) {
        self.rows_failed += 1;
        if self.errors.len() < MAX_REPORTED_ERRORS {
            self.errors.push(format!("Line {}: {}", line, reason));
        }
    }
}

/// Parsed mapping plus its report
#[derive(Debug)]
pub struct LoadedStates {
    pub mapping: StatesMapping,
    pub report: LoadReport,
}

#[derive(Default)]
struct StateBuilder {
    name: String,
    population: Option<u64>,
    by_day: BTreeMap<u32, DailyObservation>,
}

/// Loader bound to one CSV file
#[derive(Debug, Clone)]
pub struct StatesLoader {
    path: PathBuf,
}

impl StatesLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file
    pub fn load(&self) -> DataResult<LoadedStates> {
        let file = std::fs::File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        load_from_reader(file, &self.path.display().to_string())
    }

    /// Load the file and publish the mapping as a new feed value.
    ///
    /// On error the feed keeps whatever it held before.
    pub fn load_into(&self, feed: &StatesFeed) -> DataResult<LoadReport> {
        let LoadedStates { mapping, report } = self.load()?;
        feed.publish(mapping);
        Ok(report)
    }
}

/// Parse CSV text (useful for testing)
pub fn load_str(csv_data: &str) -> DataResult<LoadedStates> {
    load_from_reader(csv_data.as_bytes(), "<string>")
}

fn load_from_reader<R: Read>(reader: R, origin: &str) -> DataResult<LoadedStates> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Surface a broken header as a file-level error
    let headers = reader.headers()?.clone();

    let mut report = LoadReport::default();
    let mut builders: BTreeMap<String, StateBuilder> = BTreeMap::new();

    for result in reader.records() {
        // Quoted fields may span lines, so take the line from the reader
        let (line, row) = match result {
            Ok(record) => {
                let line = record_line(record.position());
                match record.deserialize::<StateRow>(Some(&headers)) {
                    Ok(row) => (line, row),
                    Err(e) => {
                        tracing::warn!(line, error = %e, "Skipping malformed row");
                        report.reject(line, e);
                        continue;
                    }
                }
            }
            Err(e) => {
                let line = record_line(e.position());
                tracing::warn!(line, error = %e, "Skipping malformed row");
                report.reject(line, e);
                continue;
            }
        };

        if row.state.is_empty() {
            report.reject(line, "empty state id");
            continue;
        }
        if row.day == 0 {
            report.reject(line, "day of outbreak starts at 1");
            continue;
        }
        if !row.cases_per_1000.is_finite() {
            report.reject(line, "cases_per_1000 is not a finite number");
            continue;
        }

        let builder = builders.entry(row.state).or_default();
        builder.name = row.name;
        if row.population.is_some() {
            builder.population = row.population;
        }

        let observation = DailyObservation {
            day: row.day,
            date: row.date,
            cases: row.cases,
            new_cases: row.new_cases,
            cases_per_1000: row.cases_per_1000,
        };
        if builder.by_day.insert(row.day, observation).is_some() {
            tracing::debug!(line, day = row.day, "Duplicate day replaced");
        }
        report.rows_processed += 1;
    }

    let mapping: StatesMapping = builders
        .into_iter()
        .map(|(id, b)| {
            let record = StateRecord::new(id, b.name, b.by_day.into_values().collect());
            match b.population {
                Some(p) => record.population(p),
                None => record,
            }
        })
        .collect();

    if mapping.is_empty() {
        return Err(DataError::Empty {
            origin: origin.to_string(),
            rows_failed: report.rows_failed,
        });
    }

    report.total = mapping.len();
    tracing::info!(
        source = origin,
        states = report.total,
        rows = report.rows_processed,
        rejected = report.rows_failed,
        "Loaded states"
    );

    Ok(LoadedStates { mapping, report })
}

fn record_line(position: Option<&csv::Position>) -> u64 {
    position.map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::StatesSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "state,name,population,date,day,cases,new_cases,cases_per_1000";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_groups_and_sorts_by_day() {
        let data = csv(&[
            "NY,New York,19453561,2020-03-02,2,1,0,0.00005",
            "CA,California,39512223,2020-01-26,1,1,1,0.00002",
            "NY,New York,19453561,2020-03-01,1,1,1,0.00005",
        ]);

        let loaded = load_str(&data).unwrap();
        assert_eq!(loaded.report.total, 2);
        assert_eq!(loaded.report.rows_processed, 3);
        assert_eq!(loaded.report.rows_failed, 0);

        let ny = loaded.mapping.get("NY").unwrap();
        assert_eq!(ny.name, "New York");
        assert_eq!(ny.population, Some(19453561));
        let days: Vec<u32> = ny.observations.iter().map(|o| o.day).collect();
        assert_eq!(days, vec![1, 2]);
        assert!(!ny.selected);
    }

    #[test]
    fn test_empty_population_allowed() {
        let data = csv(&["GU,Guam,,2020-03-15,1,3,3,0.0178"]);
        let loaded = load_str(&data).unwrap();
        assert_eq!(loaded.mapping.get("GU").unwrap().population, None);
    }

    #[test]
    fn test_malformed_rows_reported() {
        let data = csv(&[
            "NY,New York,19453561,2020-03-01,1,1,1,0.00005",
            "NY,New York,19453561,not-a-date,2,1,0,0.00005",
            "NY,New York,19453561,2020-03-03,0,1,0,0.00005",
            "CA,California,39512223,2020-01-26,1,many,1,0.00002",
        ]);

        let loaded = load_str(&data).unwrap();
        assert_eq!(loaded.report.rows_processed, 1);
        assert_eq!(loaded.report.rows_failed, 3);
        assert!(loaded.report.errors[0].starts_with("Line 3:"));
        assert!(loaded.report.errors[1].starts_with("Line 4:"));
        assert!(!loaded.mapping.contains("CA"));
    }

    #[test]
    fn test_multiline_name_keeps_line_numbers() {
        let data = csv(&[
            "NY,\"New\nYork\",19453561,2020-03-01,1,1,1,0.00005",
            "NY,New York,19453561,2020-03-02,0,1,0,0.00005",
        ]);

        let loaded = load_str(&data).unwrap();
        assert_eq!(loaded.report.rows_failed, 1);
        assert!(loaded.report.errors[0].starts_with("Line 4:"));
    }

    #[test]
    fn test_duplicate_day_keeps_last() {
        let data = csv(&[
            "WA,Washington,7614893,2020-01-21,1,1,1,0.0001",
            "WA,Washington,7614893,2020-01-21,1,2,2,0.0003",
        ]);

        let loaded = load_str(&data).unwrap();
        let wa = loaded.mapping.get("WA").unwrap();
        assert_eq!(wa.observations.len(), 1);
        assert_eq!(wa.observations[0].cases, 2);
    }

    #[test]
    fn test_no_valid_rows_is_error() {
        let err = load_str(HEADER).unwrap_err();
        assert!(matches!(err, DataError::Empty { rows_failed: 0, .. }));

        let err = load_str(&csv(&["NY,New York,1,bad,1,1,1,1"])).unwrap_err();
        assert!(matches!(err, DataError::Empty { rows_failed: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let loader = StatesLoader::new("/nonexistent/states.csv");
        assert!(matches!(loader.load(), Err(DataError::Io { .. })));
    }

    #[test]
    fn test_load_into_publishes_new_identity() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", csv(&["NY,New York,19453561,2020-03-01,1,1,1,0.00005"])).unwrap();

        let loader = StatesLoader::new(file.path());
        let feed = StatesFeed::new();

        let report = loader.load_into(&feed).unwrap();
        assert_eq!(report.total, 1);
        let first = feed.current().unwrap();

        loader.load_into(&feed).unwrap();
        let second = feed.current().unwrap();
        assert_eq!(first, second);
        assert!(!std::sync::Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_reload_keeps_feed() {
        let feed = StatesFeed::with_mapping(load_str(&csv(&["NY,New York,1,2020-03-01,1,1,1,1"])).unwrap().mapping);
        let loader = StatesLoader::new("/nonexistent/states.csv");

        assert!(loader.load_into(&feed).is_err());
        assert!(feed.is_loaded());
    }

    #[test]
    fn test_bundled_sample_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/states.csv");
        let loaded = StatesLoader::new(path).load().unwrap();
        assert_eq!(loaded.report.rows_failed, 0);
        assert!(loaded.mapping.contains("NY"));
        assert!(loaded.mapping.contains("CA"));
    }
}
