//! Coordinate and place types shared by the whole pipeline, together with
//! the range validation applied to every user- or file-supplied value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when an input value falls outside its documented range.
///
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("latitude {0} is outside the valid range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside the valid range [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("cloud cover {0}% is outside the valid range [0, 100]")]
    CloudCoverOutOfRange(f64),
}

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64` decimal degrees.
///
/// # Examples
///
/// ```
/// use solarcast::LatLon;
///
/// let new_delhi = LatLon(28.6139, 77.2090);
/// assert_eq!(new_delhi.latitude(), 28.6139);
/// assert_eq!(new_delhi.longitude(), 77.2090);
/// assert!(new_delhi.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Checks both components against their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LatitudeOutOfRange`] or
    /// [`ValidationError::LongitudeOutOfRange`]. NaN fails both checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&self.0) {
            return Err(ValidationError::LatitudeOutOfRange(self.0));
        }
        if !(-180.0..=180.0).contains(&self.1) {
            return Err(ValidationError::LongitudeOutOfRange(self.1));
        }
        Ok(())
    }

    /// Both components rounded to four decimal places (roughly 11 m).
    ///
    /// Outbound API requests and the sample cache use the rounded form so
    /// that queries for effectively the same point share one fetch.
    pub fn rounded(&self) -> LatLon {
        LatLon(round_4dp(self.0), round_4dp(self.1))
    }

    /// Integer cache key derived from the rounded coordinate.
    pub(crate) fn cache_key(&self) -> (i64, i64) {
        ((self.0 * 1e4).round() as i64, (self.1 * 1e4).round() as i64)
    }
}

fn round_4dp(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// A coordinate with an optional human-readable name.
///
/// The name is cosmetic: it labels CSV rows and chart bars but plays no part
/// in any computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coordinate: LatLon,
    pub name: Option<String>,
}

impl Place {
    pub fn new(coordinate: LatLon) -> Self {
        Self {
            coordinate,
            name: None,
        }
    }

    pub fn named(coordinate: LatLon, name: impl Into<String>) -> Self {
        Self {
            coordinate,
            name: Some(name.into()),
        }
    }

    /// The name, or `"unknown"` when none was resolved.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }
}
