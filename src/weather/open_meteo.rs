//! The Open-Meteo forecast client.
//!
//! One endpoint is used: the forecast API with `current_weather=true` for
//! the temperature and `hourly=cloudcover` for the cloud forecast, which is
//! averaged into a single figure. Open-Meteo requires no API key.

use crate::types::place::{LatLon, Place};
use crate::types::weather_sample::WeatherSample;
use crate::weather::error::WeatherFetchError;
use crate::weather::provider::WeatherProvider;
use log::{info, warn};
use reqwest::header;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const USER_AGENT: &str = "solarcast/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeatherBlock>,
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    cloudcover: Vec<Option<f64>>,
}

/// Weather provider backed by the public Open-Meteo forecast API.
pub struct OpenMeteoClient {
    client: Client,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_forecast(&self, url: &str) -> Result<ForecastResponse, WeatherFetchError> {
        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| WeatherFetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherFetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    WeatherFetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| WeatherFetchError::Decode(url.to_string(), e))
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for OpenMeteoClient {
    async fn current_weather(&self, place: &Place) -> Result<WeatherSample, WeatherFetchError> {
        let LatLon(lat, lon) = place.coordinate.rounded();
        let url =
            format!("{FORECAST_URL}?latitude={lat}&longitude={lon}&hourly=cloudcover&current_weather=true");

        // One retry on transport-level failures; HTTP status errors are final.
        let forecast = match self.fetch_forecast(&url).await {
            Ok(forecast) => forecast,
            Err(e @ WeatherFetchError::NetworkRequest(..)) => {
                warn!("Weather fetch failed, retrying once: {}", e);
                self.fetch_forecast(&url).await?
            }
            Err(e) => return Err(e),
        };

        let temperature_c = forecast
            .current_weather
            .ok_or(WeatherFetchError::MissingData {
                url: url.clone(),
                field: "current_weather",
            })?
            .temperature;
        let cloud_cover_pct = mean_cloud_cover(forecast.hourly, &url)?;

        info!(
            "Fetched weather for ({}, {}): {:.1} °C, {:.1}% cloud",
            lat, lon, temperature_c, cloud_cover_pct
        );
        Ok(WeatherSample::new(
            place.clone(),
            cloud_cover_pct,
            temperature_c,
        ))
    }
}

/// Mean of the hourly cloud forecast, skipping nulls. An absent or empty
/// list is an error rather than a silent 0% sky.
fn mean_cloud_cover(hourly: Option<HourlyBlock>, url: &str) -> Result<f64, WeatherFetchError> {
    let values: Vec<f64> = hourly
        .map(|block| block.cloudcover.into_iter().flatten().collect())
        .unwrap_or_default();
    if values.is_empty() {
        return Err(WeatherFetchError::MissingData {
            url: url.to_string(),
            field: "hourly.cloudcover",
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
