use crate::types::place::Place;
use crate::types::weather_sample::WeatherSample;
use crate::weather::error::WeatherFetchError;
use std::future::Future;

/// A source of current weather observations for a place.
///
/// The one seam between the pipeline and the network: the estimator and
/// ranker only ever see [`WeatherSample`]s, so tests substitute a canned
/// provider and run the whole survey offline.
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current weather for a place.
    fn current_weather(
        &self,
        place: &Place,
    ) -> impl Future<Output = Result<WeatherSample, WeatherFetchError>> + Send;
}
