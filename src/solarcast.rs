//! This module provides the main entry point for running solar-potential
//! surveys. A [`Solarcast`] client owns the weather and geocoding HTTP
//! clients and the output directory, and exposes the full pipeline (fetch →
//! estimate → rank → write) as one builder-style call.

use crate::error::SolarcastError;
use crate::geocode::nominatim::NominatimClient;
use crate::ranking::{rank, RankedReport};
use crate::regions::catalog::Region;
use crate::regions::locator::RegionLocator;
use crate::report::chart::render_energy_chart;
use crate::report::csv_writer::{QueryRecord, ReportWriter};
use crate::solar::estimator::SolarEstimator;
use crate::types::place::{LatLon, Place};
use crate::types::solar_estimate::SolarEstimate;
use crate::types::weather_sample::WeatherSample;
use crate::utils::{default_output_dir, ensure_output_dir_exists};
use crate::weather::fetcher::SampleFetcher;
use crate::weather::open_meteo::OpenMeteoClient;
use crate::weather::provider::WeatherProvider;
use bon::bon;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Everything a survey produced: the estimate for the queried point, the
/// ranked report over the candidate regions, and the paths of the files
/// written for them.
///
/// `chart_html` is `None` when the report was empty and there was nothing
/// to draw.
#[derive(Debug)]
pub struct SurveyOutcome {
    pub query: SolarEstimate,
    pub report: RankedReport,
    pub report_csv: PathBuf,
    pub query_log_csv: PathBuf,
    pub chart_html: Option<PathBuf>,
}

/// The main client struct for running solar-potential surveys.
///
/// Create an instance using [`Solarcast::new()`] for default behavior
/// (writing into `./reports`) or [`Solarcast::with_output_folder()`] for a
/// custom output location.
///
/// # Examples
///
/// ```rust
/// # use solarcast::{Solarcast, SolarcastError};
/// # async fn run() -> Result<(), SolarcastError> {
/// // Create a client writing into the default output directory
/// let client = Solarcast::new().await?;
/// // Now you can run surveys or fetch individual weather samples
/// # Ok(())
/// # }
/// ```
pub struct Solarcast {
    fetcher: SampleFetcher<OpenMeteoClient>,
    geocoder: NominatimClient,
    locator: RegionLocator,
    writer: ReportWriter,
    output_dir: PathBuf,
}

#[bon]
impl Solarcast {
    /// Creates a new `Solarcast` client writing into a specific directory.
    ///
    /// The directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SolarcastError::OutputDirCreation`] if the directory cannot
    /// be created, or if the path exists and is not a directory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use solarcast::{Solarcast, SolarcastError};
    /// # use std::path::PathBuf;
    /// # async fn run() -> Result<(), SolarcastError> {
    /// let client = Solarcast::with_output_folder(PathBuf::from("survey-out")).await?;
    /// // ... use client ...
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_output_folder(output_folder: PathBuf) -> Result<Self, SolarcastError> {
        ensure_output_dir_exists(&output_folder)
            .await
            .map_err(|e| SolarcastError::OutputDirCreation(output_folder.clone(), e))?;
        Ok(Self {
            fetcher: SampleFetcher::new(OpenMeteoClient::new()),
            geocoder: NominatimClient::new(),
            locator: RegionLocator::new(Region::builtin()),
            writer: ReportWriter::new(&output_folder),
            output_dir: output_folder,
        })
    }

    /// Creates a new `Solarcast` client writing into `./reports`.
    pub async fn new() -> Result<Self, SolarcastError> {
        Self::with_output_folder(default_output_dir()).await
    }

    /// Fetches the current weather sample for a coordinate.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.coordinate(LatLon)`: **Required.** The point to query.
    /// * `.name(String)`: Optional. A label for the place; when omitted the
    ///   sample is unnamed.
    ///
    /// # Errors
    ///
    /// Returns [`SolarcastError::Validation`] for an out-of-range coordinate
    /// and [`SolarcastError::WeatherFetch`] variants when the Open-Meteo
    /// call fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use solarcast::{LatLon, Solarcast, SolarcastError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), SolarcastError> {
    /// let client = Solarcast::new().await?;
    /// let sample = client
    ///     .current_weather()
    ///     .coordinate(LatLon(28.6139, 77.2090))
    ///     .name("Delhi".to_string())
    ///     .call()
    ///     .await?;
    /// println!("{:.1} °C, {:.1}% cloud", sample.temperature_c, sample.cloud_cover_pct);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn current_weather(
        &self,
        coordinate: LatLon,
        name: Option<String>,
    ) -> Result<WeatherSample, SolarcastError> {
        coordinate.validate()?;
        let place = match name {
            Some(name) => Place::named(coordinate, name),
            None => Place::new(coordinate),
        };
        Ok(self.fetcher.sample(&place).await?)
    }

    /// Runs the full survey pipeline for a coordinate.
    ///
    /// Fetches the weather at the queried point, estimates its solar
    /// potential, does the same for every candidate region, ranks the
    /// candidates by estimated energy, writes the report CSV, appends the
    /// query to the log CSV, and renders the chart.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.coordinate(LatLon)`: **Required.** The user's point of interest.
    /// * `.regions(Vec<Region>)`: Optional. The candidate set to rank.
    ///   Defaults to [`Region::builtin()`].
    /// * `.date(NaiveDate)`: Optional. The date the estimate is computed
    ///   for. Defaults to today. Fixing it makes the whole survey
    ///   reproducible for a given set of weather samples.
    ///
    /// # Errors
    ///
    /// Returns [`SolarcastError::Validation`] for bad input,
    /// [`SolarcastError::WeatherFetch`] when a weather call fails (after
    /// one retry), and [`SolarcastError::Report`] when an output file
    /// cannot be written. A failed reverse-geocode lookup is not an error;
    /// the query falls back to the nearest candidate region's name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use solarcast::{LatLon, Solarcast, SolarcastError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), SolarcastError> {
    /// let client = Solarcast::new().await?;
    /// let outcome = client
    ///     .survey()
    ///     .coordinate(LatLon(28.6139, 77.2090))
    ///     .call()
    ///     .await?;
    ///
    /// println!(
    ///     "{}: {:.3} kWh/m², report at {}",
    ///     outcome.query.place.display_name(),
    ///     outcome.query.energy_kwh_m2,
    ///     outcome.report_csv.display()
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn survey(
        &self,
        coordinate: LatLon,
        regions: Option<Vec<Region>>,
        date: Option<NaiveDate>,
    ) -> Result<SurveyOutcome, SolarcastError> {
        coordinate.validate()?;
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let estimator = SolarEstimator::for_date(date);
        let regions = regions.unwrap_or_else(Region::builtin);

        let query_place = match self.resolve_place_name(coordinate).await {
            Some(name) => Place::named(coordinate, name),
            None => Place::new(coordinate),
        };

        run_survey(
            &self.fetcher,
            &estimator,
            query_place,
            &regions,
            &self.writer,
            &self.output_dir,
        )
        .await
    }

    /// Best-effort name for the queried point: reverse geocoding first,
    /// then the nearest candidate region.
    async fn resolve_place_name(&self, coordinate: LatLon) -> Option<String> {
        match self.geocoder.place_name(coordinate).await {
            Ok(Some(name)) => return Some(name),
            Ok(None) => info!(
                "Reverse geocoding named nothing for ({}, {})",
                coordinate.latitude(),
                coordinate.longitude()
            ),
            Err(e) => warn!(
                "Reverse geocoding failed, falling back to nearest region: {}",
                e
            ),
        }
        self.locator.nearest(coordinate).map(|(region, dist_km)| {
            info!(
                "Labelling query as nearest region '{}' ({:.0} km away)",
                region.name, dist_km
            );
            region.name.clone()
        })
    }
}

/// The pipeline body, generic over the weather source so the whole survey
/// can run against a canned provider in tests.
async fn run_survey<P: WeatherProvider>(
    fetcher: &SampleFetcher<P>,
    estimator: &SolarEstimator,
    query_place: Place,
    regions: &[Region],
    writer: &ReportWriter,
    output_dir: &Path,
) -> Result<SurveyOutcome, SolarcastError> {
    let query_sample = fetcher.sample(&query_place).await?;
    let query_estimate = estimator.estimate(&query_sample)?;

    let mut samples = Vec::with_capacity(regions.len());
    for region in regions {
        samples.push(fetcher.sample(&region.place()).await?);
    }
    let report = rank(estimator, &samples)?;

    let report_csv = writer.write_report(&report)?;
    let query_log_csv = writer.append_query_log(&QueryRecord::from_estimate(
        &query_estimate,
        report.generated_at,
    ))?;
    let chart_html = render_energy_chart(&report, output_dir)?;

    Ok(SurveyOutcome {
        query: query_estimate,
        report,
        report_csv,
        query_log_csv,
        chart_html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::error::WeatherFetchError;

    /// Deterministic provider: cloud cover derived from latitude.
    struct FakeProvider;

    impl WeatherProvider for FakeProvider {
        async fn current_weather(
            &self,
            place: &Place,
        ) -> Result<WeatherSample, WeatherFetchError> {
            let cloud = (place.coordinate.latitude().abs() * 3.0) % 100.0;
            Ok(WeatherSample::new(place.clone(), cloud, 27.0))
        }
    }

    fn june_estimator() -> SolarEstimator {
        SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[tokio::test]
    async fn offline_survey_produces_a_full_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SampleFetcher::new(FakeProvider);
        let writer = ReportWriter::new(dir.path());
        let regions = Region::builtin();

        let outcome = run_survey(
            &fetcher,
            &june_estimator(),
            Place::named(LatLon(28.6139, 77.2090), "Delhi"),
            &regions,
            &writer,
            dir.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.query.place.display_name(), "Delhi");
        assert_eq!(outcome.report.len(), 10);
        assert!(outcome.report_csv.exists());
        assert!(outcome.query_log_csv.exists());
        assert!(outcome.chart_html.as_ref().is_some_and(|p| p.exists()));
    }

    #[tokio::test]
    async fn survey_over_no_candidates_yields_an_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SampleFetcher::new(FakeProvider);
        let writer = ReportWriter::new(dir.path());

        let outcome = run_survey(
            &fetcher,
            &june_estimator(),
            Place::new(LatLon(0.0, 0.0)),
            &[],
            &writer,
            dir.path(),
        )
        .await
        .unwrap();

        assert!(outcome.report.is_empty());
        assert!(outcome.chart_html.is_none());
        // The report CSV still exists, header-only.
        assert!(outcome.report_csv.exists());
    }

    #[tokio::test]
    async fn offline_survey_report_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SampleFetcher::new(FakeProvider);
        let writer = ReportWriter::new(dir.path());
        let regions = Region::builtin();

        let outcome = run_survey(
            &fetcher,
            &june_estimator(),
            Place::new(LatLon(20.0, 77.0)),
            &regions,
            &writer,
            dir.path(),
        )
        .await
        .unwrap();

        for pair in outcome.report.entries.windows(2) {
            assert!(pair[0].energy_kwh_m2 >= pair[1].energy_kwh_m2);
        }
    }

    #[tokio::test]
    async fn with_output_folder_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("reports");
        let _client = Solarcast::with_output_folder(target.clone()).await.unwrap();
        assert!(target.is_dir());
    }
}
