//! CSV serialization of survey results: the ranked-report table and the
//! append-only user query log.

use crate::ranking::{round_dp, RankedReport};
use crate::report::error::ReportError;
use crate::types::solar_estimate::SolarEstimate;
use chrono::{DateTime, Local};
use polars::prelude::CsvWriter;
use polars::prelude::SerWriter;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "top_regions.csv";
pub const QUERY_LOG_FILE_NAME: &str = "user_queries.csv";

/// One row of the user query log.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRecord {
    pub region: String,
    pub date: String,
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub cloud_cover_pct: f64,
    pub intensity_w_m2: f64,
    pub daylight_hours: f64,
    pub energy_kwh_m2: f64,
}

impl QueryRecord {
    pub fn from_estimate(estimate: &SolarEstimate, at: DateTime<Local>) -> Self {
        Self {
            region: estimate.place.display_name().to_string(),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M:%S").to_string(),
            latitude: estimate.place.coordinate.latitude(),
            longitude: estimate.place.coordinate.longitude(),
            temperature_c: round_dp(estimate.temperature_c, 2),
            cloud_cover_pct: round_dp(estimate.cloud_cover_pct, 2),
            intensity_w_m2: round_dp(estimate.intensity_w_m2, 2),
            daylight_hours: round_dp(estimate.daylight_hours, 2),
            energy_kwh_m2: round_dp(estimate.energy_kwh_m2, 3),
        }
    }
}

/// Writes survey outputs into one directory.
///
/// The directory is expected to exist; the [`crate::Solarcast`] constructor
/// creates it before handing the path over.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Writes the ranked report to [`REPORT_FILE_NAME`], replacing any
    /// previous run's file, and returns the path.
    pub fn write_report(&self, report: &RankedReport) -> Result<PathBuf, ReportError> {
        let mut df = report.to_dataframe().map_err(ReportError::ReportFrame)?;
        let path = self.output_dir.join(REPORT_FILE_NAME);
        let file =
            File::create(&path).map_err(|e| ReportError::CsvWriteIo(path.clone(), e))?;
        CsvWriter::new(file)
            .finish(&mut df)
            .map_err(|e| ReportError::CsvWritePolars(path.clone(), e))?;
        Ok(path)
    }

    /// Appends one row to [`QUERY_LOG_FILE_NAME`], writing the header only
    /// when the file is first created, and returns the path.
    pub fn append_query_log(&self, record: &QueryRecord) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(QUERY_LOG_FILE_NAME);
        let write_header = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ReportError::QueryLogIo(path.clone(), e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| ReportError::QueryLogCsv(path.clone(), e))?;
        writer
            .flush()
            .map_err(|e| ReportError::QueryLogIo(path.clone(), e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::rank;
    use crate::solar::estimator::SolarEstimator;
    use crate::types::place::{LatLon, Place};
    use crate::types::weather_sample::WeatherSample;
    use chrono::NaiveDate;

    fn report() -> RankedReport {
        let estimator = SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let samples = vec![
            WeatherSample::new(Place::named(LatLon(28.6, 77.2), "Delhi"), 20.0, 32.0),
            WeatherSample::new(Place::named(LatLon(19.1, 72.9), "Mumbai"), 70.0, 29.0),
        ];
        rank(&estimator, &samples).unwrap()
    }

    #[test]
    fn report_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        let path = writer.write_report(&report()).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("region,date,time,latitude,longitude"));
        assert!(lines[1].starts_with("Delhi,"));
    }

    #[test]
    fn rewriting_the_report_replaces_it() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        writer.write_report(&report()).unwrap();
        let path = writer.write_report(&report()).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn query_log_appends_without_repeating_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let record = QueryRecord::from_estimate(&report().entries[0], Local::now());

        writer.append_query_log(&record).unwrap();
        let path = writer.append_query_log(&record).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let header_count = contents
            .lines()
            .filter(|l| l.starts_with("region,"))
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn empty_report_writes_a_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let empty = RankedReport {
            generated_at: Local::now(),
            entries: vec![],
        };

        let path = writer.write_report(&empty).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
