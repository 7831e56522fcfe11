use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to build report table")]
    ReportFrame(#[source] PolarsError),

    #[error("I/O error writing report file '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing report file '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("I/O error writing query log '{0}'")]
    QueryLogIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing query log '{0}'")]
    QueryLogCsv(PathBuf, #[source] csv::Error),
}
