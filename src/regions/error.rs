use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Failed to read region catalog '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Region catalog '{path}' is missing usable column '{column}'")]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Region catalog '{path}' contains no usable candidate regions")]
    NoCandidates { path: PathBuf },
}
