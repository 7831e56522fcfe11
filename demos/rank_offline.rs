//! demos/rank_offline.rs
//!
//! Ranks the built-in candidate regions from synthetic weather samples,
//! without any network access. Useful for seeing the estimator and ranking
//! behavior in isolation.
//!
//! To run: cargo run --example rank_offline

use chrono::NaiveDate;
use solarcast::{rank, Region, SolarEstimator, WeatherSample};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let estimator = SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

    // Synthetic but deterministic weather: cloud cover derived from each
    // region's coordinates.
    let samples: Vec<WeatherSample> = Region::builtin()
        .into_iter()
        .map(|region| {
            let cloud = (region.coordinate.latitude() * 3.7).rem_euclid(100.0);
            let temp = 24.0 + region.coordinate.longitude().rem_euclid(10.0);
            WeatherSample::new(region.place(), cloud, temp)
        })
        .collect();

    let report = rank(&estimator, &samples)?;

    println!("Ranked {} of {} candidates:", report.len(), samples.len());
    for (i, entry) in report.entries.iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>7.3} kWh/m²  ({:.1}% cloud, {:.2} h daylight)",
            i + 1,
            entry.place.display_name(),
            entry.energy_kwh_m2,
            entry.cloud_cover_pct,
            entry.daylight_hours
        );
    }
    Ok(())
}
