use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherFetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode weather response from {0}")]
    Decode(String, #[source] reqwest::Error),

    #[error("Weather response from {url} is missing '{field}'")]
    MissingData { url: String, field: &'static str },
}
