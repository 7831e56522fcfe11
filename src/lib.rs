mod error;
mod geocode;
mod ranking;
mod regions;
mod report;
mod solar;
mod solarcast;
mod types;
mod utils;
mod weather;

pub use error::SolarcastError;
pub use solarcast::*;

pub use ranking::{rank, RankedReport, TOP_REGION_COUNT};
pub use solar::estimator::{PanelConfig, SolarEstimator};
pub use solar::geometry::{day_of_year, daylight_hours, declination_deg};

pub use types::place::{LatLon, Place, ValidationError};
pub use types::solar_estimate::SolarEstimate;
pub use types::weather_sample::WeatherSample;

pub use regions::catalog::Region;
pub use regions::error::RegionError;
pub use regions::locator::RegionLocator;

pub use weather::error::WeatherFetchError;
pub use weather::fetcher::SampleFetcher;
pub use weather::open_meteo::OpenMeteoClient;
pub use weather::provider::WeatherProvider;

pub use geocode::error::GeocodeError;
pub use geocode::nominatim::NominatimClient;

pub use report::chart::{render_energy_chart, CHART_FILE_NAME};
pub use report::csv_writer::{QueryRecord, ReportWriter, QUERY_LOG_FILE_NAME, REPORT_FILE_NAME};
pub use report::error::ReportError;
