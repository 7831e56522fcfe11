//! Solar geometry: declination and day length.
//!
//! Only the two quantities the estimator needs are computed here. Declination
//! uses the Cooper (1969) approximation; day length comes from the sunset
//! hour angle. Accuracy is on the order of a few minutes of daylight.

use chrono::{Datelike, NaiveDate};

/// Solar declination in degrees for a day of the year (Cooper 1969).
///
/// Ranges over roughly ±23.45° through the year; positive when the sun is
/// north of the equator.
pub fn declination_deg(day_of_year: u32) -> f64 {
    23.45 * (360.0 * (284.0 + day_of_year as f64) / 365.0).to_radians().sin()
}

/// Hours between sunrise and sunset from the sunset hour angle.
///
/// `cos ω_s = -tan(lat)·tan(δ)` leaves the [-1, 1] domain at polar
/// latitudes: above 1 the sun never rises (0 h), below -1 it never sets
/// (24 h).
pub fn daylight_hours(latitude_deg: f64, declination_deg: f64) -> f64 {
    let lat = latitude_deg.to_radians();
    let decl = declination_deg.to_radians();
    let cos_omega = -lat.tan() * decl.tan();
    if cos_omega >= 1.0 {
        0.0
    } else if cos_omega <= -1.0 {
        24.0
    } else {
        2.0 * cos_omega.acos().to_degrees() / 15.0
    }
}

/// Ordinal day of the year for a date, 1 to 366.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}
