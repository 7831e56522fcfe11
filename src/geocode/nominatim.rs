//! Reverse geocoding through Nominatim.
//!
//! Used only to put a human-readable name on the queried coordinate; the
//! pipeline treats a failed lookup as a missing name, never as a failed
//! survey. Nominatim's usage policy requires an identifying user agent.

use crate::geocode::error::GeocodeError;
use crate::types::place::LatLon;
use reqwest::header;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const USER_AGENT: &str = "solarcast/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl Address {
    /// Most specific available name: city, then town, village, state.
    fn best_name(self) -> Option<String> {
        self.city.or(self.town).or(self.village).or(self.state)
    }
}

/// Reverse-geocoding client backed by the public Nominatim instance.
pub struct NominatimClient {
    client: Client,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Resolves a place name for a coordinate.
    ///
    /// `Ok(None)` means the lookup succeeded but named nothing useful
    /// (open ocean, for instance).
    pub async fn place_name(&self, coordinate: LatLon) -> Result<Option<String>, GeocodeError> {
        let LatLon(lat, lon) = coordinate.rounded();
        let url = format!("{REVERSE_URL}?format=json&lat={lat}&lon={lon}&zoom=10");

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    GeocodeError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    GeocodeError::NetworkRequest(url, e)
                });
            }
        };

        let reverse = response
            .json::<ReverseResponse>()
            .await
            .map_err(|e| GeocodeError::Decode(url, e))?;
        Ok(reverse.address.best_name())
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_wins_over_state() {
        let body = r#"{"address": {"city": "New Delhi", "state": "Delhi"}}"#;
        let reverse: ReverseResponse = serde_json::from_str(body).unwrap();
        assert_eq!(reverse.address.best_name().as_deref(), Some("New Delhi"));
    }

    #[test]
    fn falls_through_to_state() {
        let body = r#"{"address": {"state": "Rajasthan"}}"#;
        let reverse: ReverseResponse = serde_json::from_str(body).unwrap();
        assert_eq!(reverse.address.best_name().as_deref(), Some("Rajasthan"));
    }

    #[test]
    fn empty_address_names_nothing() {
        let reverse: ReverseResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(reverse.address.best_name(), None);
    }
}
