use crate::types::place::Place;
use serde::{Deserialize, Serialize};

/// The result of the solar-potential computation for one place.
///
/// Derived deterministically from a [`crate::WeatherSample`] and a calendar
/// date by [`crate::SolarEstimator::estimate`]; carries the inputs along so a
/// report row is self-contained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarEstimate {
    pub place: Place,
    /// Cloud cover of the underlying sample, percent.
    pub cloud_cover_pct: f64,
    /// Temperature of the underlying sample, degrees Celsius.
    pub temperature_c: f64,
    /// Irradiance reaching the panel after cloud attenuation, W/m².
    pub intensity_w_m2: f64,
    /// Hours between sunrise and sunset for the place and date, 0 to 24.
    pub daylight_hours: f64,
    /// Estimated producible energy, kWh per m² per day.
    pub energy_kwh_m2: f64,
}
