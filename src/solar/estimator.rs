//! The solar-potential estimator: a pure mapping from one weather sample to
//! an intensity, a day length, and an energy figure.

use crate::solar::geometry::{day_of_year, daylight_hours, declination_deg};
use crate::types::place::ValidationError;
use crate::types::solar_estimate::SolarEstimate;
use crate::types::weather_sample::WeatherSample;
use chrono::NaiveDate;

/// Solar constant in W/m².
const SOLAR_CONSTANT_W_M2: f64 = 1367.0;

/// Panel parameters for the energy conversion.
///
/// Defaults describe a typical crystalline-silicon module: 20% efficiency at
/// 25 °C, losing 0.4% of that per degree above the reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelConfig {
    /// Conversion efficiency at the reference temperature, 0 to 1.
    pub efficiency: f64,
    /// Fractional efficiency change per °C away from the reference.
    pub temp_coefficient: f64,
    /// Reference cell temperature in °C.
    pub reference_temp_c: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            efficiency: 0.20,
            temp_coefficient: -0.004,
            reference_temp_c: 25.0,
        }
    }
}

impl PanelConfig {
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn with_temp_coefficient(mut self, temp_coefficient: f64) -> Self {
        self.temp_coefficient = temp_coefficient;
        self
    }

    /// Effective efficiency at an ambient temperature, floored at zero.
    pub fn efficiency_at(&self, temperature_c: f64) -> f64 {
        let derated = self.efficiency
            * (1.0 + self.temp_coefficient * (temperature_c - self.reference_temp_c));
        derated.max(0.0)
    }
}

/// Derives solar estimates for one calendar date.
///
/// The estimator is pure: the same sample and date always produce the same
/// estimate.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use solarcast::{LatLon, Place, SolarEstimator, WeatherSample};
///
/// let estimator = SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// let sample = WeatherSample::new(Place::named(LatLon(28.6139, 77.2090), "Delhi"), 20.0, 32.0);
/// let estimate = estimator.estimate(&sample).unwrap();
/// assert!(estimate.energy_kwh_m2 > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolarEstimator {
    panel: PanelConfig,
    day_of_year: u32,
}

impl SolarEstimator {
    /// An estimator for a date with the default panel.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::with_panel(date, PanelConfig::default())
    }

    /// An estimator for a date with an explicit panel configuration.
    pub fn with_panel(date: NaiveDate, panel: PanelConfig) -> Self {
        Self {
            panel,
            day_of_year: day_of_year(date),
        }
    }

    /// Maps a weather sample to a solar estimate.
    ///
    /// Intensity attenuates the solar constant by cloud cover; day length
    /// follows from latitude and the date's declination; energy is
    /// intensity × daylight × temperature-derated efficiency, reported in
    /// kWh per m² per day.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the sample's coordinate or cloud
    /// cover is out of range. Nothing is clamped.
    pub fn estimate(&self, sample: &WeatherSample) -> Result<SolarEstimate, ValidationError> {
        sample.validate()?;

        let declination = declination_deg(self.day_of_year);
        let daylight = daylight_hours(sample.place.coordinate.latitude(), declination);
        let intensity = SOLAR_CONSTANT_W_M2 * (1.0 - sample.cloud_cover_pct / 100.0);
        let efficiency = self.panel.efficiency_at(sample.temperature_c);
        let energy = intensity * daylight * efficiency / 1000.0;

        Ok(SolarEstimate {
            place: sample.place.clone(),
            cloud_cover_pct: sample.cloud_cover_pct,
            temperature_c: sample.temperature_c,
            intensity_w_m2: intensity,
            daylight_hours: daylight,
            energy_kwh_m2: energy,
        })
    }
}
