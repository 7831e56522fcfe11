use crate::geocode::error::GeocodeError;
use crate::regions::error::RegionError;
use crate::report::error::ReportError;
use crate::types::place::ValidationError;
use crate::weather::error::WeatherFetchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarcastError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    WeatherFetch(#[from] WeatherFetchError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),
}
