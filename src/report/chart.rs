//! Chart rendering for the ranked report.
//!
//! Produces a standalone interactive HTML file (plotly under the hood via
//! plotlars) with one bar per region. The file opens in any browser.

use crate::ranking::RankedReport;
use crate::report::error::ReportError;
use plotlars::{BarPlot, Plot, Rgb, Text};
use std::path::{Path, PathBuf};

pub const CHART_FILE_NAME: &str = "energy_by_region.html";

/// Renders the energy-by-region bar chart into `output_dir` and returns the
/// file path, or `None` for an empty report (there is nothing to draw).
pub fn render_energy_chart(
    report: &RankedReport,
    output_dir: &Path,
) -> Result<Option<PathBuf>, ReportError> {
    if report.is_empty() {
        return Ok(None);
    }

    let df = report.to_dataframe().map_err(ReportError::ReportFrame)?;
    let path = output_dir.join(CHART_FILE_NAME);

    BarPlot::builder()
        .data(&df)
        .labels("region")
        .values("energy_kwh_m2")
        .color(Rgb(235, 117, 0))
        .plot_title(
            Text::from("Top regions by estimated energy")
                .font("Arial")
                .size(18),
        )
        .x_title("region")
        .y_title("energy (kWh/m² per day)")
        .build()
        .write_html(path.display().to_string());

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::rank;
    use crate::solar::estimator::SolarEstimator;
    use crate::types::place::{LatLon, Place};
    use crate::types::weather_sample::WeatherSample;
    use chrono::{Local, NaiveDate};

    #[test]
    fn chart_file_is_written_for_a_populated_report() {
        let estimator = SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let samples = vec![
            WeatherSample::new(Place::named(LatLon(28.6, 77.2), "Delhi"), 20.0, 32.0),
            WeatherSample::new(Place::named(LatLon(19.1, 72.9), "Mumbai"), 70.0, 29.0),
        ];
        let report = rank(&estimator, &samples).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = render_energy_chart(&report, dir.path()).unwrap().unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Delhi"));
    }

    #[test]
    fn empty_report_renders_nothing() {
        let report = RankedReport {
            generated_at: Local::now(),
            entries: vec![],
        };
        let dir = tempfile::tempdir().unwrap();
        assert!(render_energy_chart(&report, dir.path()).unwrap().is_none());
    }
}
