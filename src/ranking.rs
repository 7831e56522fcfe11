//! Ranking of candidate regions by estimated energy output.

use crate::solar::estimator::SolarEstimator;
use crate::types::place::ValidationError;
use crate::types::solar_estimate::SolarEstimate;
use crate::types::weather_sample::WeatherSample;
use chrono::{DateTime, Local};
use polars::prelude::*;

/// Reports keep at most this many regions.
pub const TOP_REGION_COUNT: usize = 10;

/// The ranked outcome of a survey: up to [`TOP_REGION_COUNT`] estimates,
/// best first, stamped with the moment the ranking was produced.
#[derive(Debug, Clone)]
pub struct RankedReport {
    pub generated_at: DateTime<Local>,
    pub entries: Vec<SolarEstimate>,
}

impl RankedReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The report as a polars DataFrame, one row per region, the shape the
    /// CSV writer and the chart consume.
    ///
    /// Figures are rounded here, at the serialization boundary: intensity
    /// and daylight to 2 decimals, energy to 3. The in-memory estimates
    /// stay full precision.
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let n = self.entries.len();
        let date = self.generated_at.format("%Y-%m-%d").to_string();
        let time = self.generated_at.format("%H:%M:%S").to_string();

        df!(
            "region" => self
                .entries
                .iter()
                .map(|e| e.place.display_name().to_string())
                .collect::<Vec<_>>(),
            "date" => vec![date; n],
            "time" => vec![time; n],
            "latitude" => self
                .entries
                .iter()
                .map(|e| e.place.coordinate.latitude())
                .collect::<Vec<_>>(),
            "longitude" => self
                .entries
                .iter()
                .map(|e| e.place.coordinate.longitude())
                .collect::<Vec<_>>(),
            "temperature_c" => self
                .entries
                .iter()
                .map(|e| round_dp(e.temperature_c, 2))
                .collect::<Vec<_>>(),
            "cloud_cover_pct" => self
                .entries
                .iter()
                .map(|e| round_dp(e.cloud_cover_pct, 2))
                .collect::<Vec<_>>(),
            "intensity_w_m2" => self
                .entries
                .iter()
                .map(|e| round_dp(e.intensity_w_m2, 2))
                .collect::<Vec<_>>(),
            "daylight_hours" => self
                .entries
                .iter()
                .map(|e| round_dp(e.daylight_hours, 2))
                .collect::<Vec<_>>(),
            "energy_kwh_m2" => self
                .entries
                .iter()
                .map(|e| round_dp(e.energy_kwh_m2, 3))
                .collect::<Vec<_>>(),
        )
    }
}

pub(crate) fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Ranks weather samples by estimated energy output.
///
/// Every sample goes through the estimator; the estimates are then sorted
/// descending by energy with a stable sort, so candidates with equal output
/// keep their input order, and the list is cut to [`TOP_REGION_COUNT`].
///
/// An empty input yields an empty report rather than an error: a survey
/// over no candidates has a well-defined, if dull, answer.
///
/// # Errors
///
/// Propagates the first [`ValidationError`] from the estimator.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use solarcast::{rank, LatLon, Place, SolarEstimator, WeatherSample};
///
/// let estimator = SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// let samples = vec![
///     WeatherSample::new(Place::named(LatLon(28.6139, 77.2090), "Delhi"), 20.0, 32.0),
///     WeatherSample::new(Place::named(LatLon(19.0760, 72.8777), "Mumbai"), 85.0, 29.0),
/// ];
/// let report = rank(&estimator, &samples).unwrap();
/// assert_eq!(report.entries[0].place.display_name(), "Delhi");
/// ```
pub fn rank(
    estimator: &SolarEstimator,
    samples: &[WeatherSample],
) -> Result<RankedReport, ValidationError> {
    let mut entries = samples
        .iter()
        .map(|sample| estimator.estimate(sample))
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| b.energy_kwh_m2.total_cmp(&a.energy_kwh_m2));
    entries.truncate(TOP_REGION_COUNT);

    Ok(RankedReport {
        generated_at: Local::now(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::place::{LatLon, Place};
    use chrono::NaiveDate;

    fn estimator() -> SolarEstimator {
        SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn sample(name: &str, lat: f64, cloud: f64) -> WeatherSample {
        WeatherSample::new(Place::named(LatLon(lat, 77.0), name), cloud, 25.0)
    }

    #[test]
    fn twelve_candidates_rank_to_exactly_ten() {
        let samples: Vec<WeatherSample> = (0..12)
            .map(|i| sample(&format!("r{}", i), 20.0 + i as f64 * 0.5, i as f64 * 8.0))
            .collect();
        let report = rank(&estimator(), &samples).unwrap();
        assert_eq!(report.len(), TOP_REGION_COUNT);

        // The top entry carries the maximum energy of the whole field.
        let all = samples
            .iter()
            .map(|s| estimator().estimate(s).unwrap().energy_kwh_m2)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(report.entries[0].energy_kwh_m2, all);
    }

    #[test]
    fn output_is_sorted_descending() {
        let samples = vec![
            sample("cloudy", 25.0, 90.0),
            sample("clear", 25.0, 5.0),
            sample("mixed", 25.0, 50.0),
        ];
        let report = rank(&estimator(), &samples).unwrap();
        for pair in report.entries.windows(2) {
            assert!(pair[0].energy_kwh_m2 >= pair[1].energy_kwh_m2);
        }
        assert_eq!(report.entries[0].place.display_name(), "clear");
    }

    #[test]
    fn ties_keep_input_order() {
        // Identical latitude and cloud cover produce identical energy.
        let samples = vec![
            sample("first", 25.0, 40.0),
            sample("second", 25.0, 40.0),
            sample("third", 25.0, 40.0),
        ];
        let report = rank(&estimator(), &samples).unwrap();
        let names: Vec<&str> = report
            .entries
            .iter()
            .map(|e| e.place.display_name())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn fewer_candidates_than_the_cap_all_survive() {
        let samples = vec![sample("a", 25.0, 10.0), sample("b", 26.0, 20.0)];
        let report = rank(&estimator(), &samples).unwrap();
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn empty_input_yields_an_empty_report() {
        let report = rank(&estimator(), &[]).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn a_bad_sample_fails_the_whole_ranking() {
        let samples = vec![sample("good", 25.0, 10.0), sample("bad", 25.0, 130.0)];
        assert!(rank(&estimator(), &samples).is_err());
    }

    #[test]
    fn dataframe_has_one_row_per_entry() {
        let samples = vec![sample("a", 25.0, 10.0), sample("b", 26.0, 20.0)];
        let report = rank(&estimator(), &samples).unwrap();
        let df = report.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 10);
        assert_eq!(
            df.get_column_names(),
            [
                "region",
                "date",
                "time",
                "latitude",
                "longitude",
                "temperature_c",
                "cloud_cover_pct",
                "intensity_w_m2",
                "daylight_hours",
                "energy_kwh_m2"
            ]
        );
    }

    #[test]
    fn rounding_is_applied_at_the_boundary() {
        assert_eq!(round_dp(3.14159, 2), 3.14);
        assert_eq!(round_dp(3.14159, 3), 3.142);
        assert_eq!(round_dp(-1.005, 1), -1.0);
    }
}
