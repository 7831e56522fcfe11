use crate::types::place::Place;
use crate::types::weather_sample::WeatherSample;
use crate::weather::error::WeatherFetchError;
use crate::weather::provider::WeatherProvider;
use std::collections::{hash_map::Entry, HashMap};
use tokio::sync::Mutex;

/// A memoizing wrapper around a [`WeatherProvider`].
///
/// Observations are cached per coordinate rounded to four decimal places;
/// a survey that revisits a point (the user's own location, a region
/// queried twice) costs one network call. The cache lives for the life of
/// the process and has no expiry.
pub struct SampleFetcher<P> {
    provider: P,
    // (cloud_cover_pct, temperature_c) keyed by rounded coordinate
    observation_cache: Mutex<HashMap<(i64, i64), (f64, f64)>>,
}

impl<P: WeatherProvider> SampleFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            observation_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Gets the weather sample for a place, using the cache if possible.
    ///
    /// The returned sample always carries the requested `place`, so a cache
    /// hit from an earlier differently-named query cannot mislabel it.
    pub async fn sample(&self, place: &Place) -> Result<WeatherSample, WeatherFetchError> {
        let key = place.coordinate.cache_key();

        // --- Fast path: check the cache, then release the lock before fetching ---
        {
            let cache = self.observation_cache.lock().await;
            if let Some(&(cloud, temp)) = cache.get(&key) {
                return Ok(WeatherSample::new(place.clone(), cloud, temp));
            }
        }

        // --- Slow path: fetch outside the lock ---
        let fetched = self.provider.current_weather(place).await?;

        // --- Insert, tolerating a concurrent fetch of the same key ---
        let mut cache = self.observation_cache.lock().await;
        match cache.entry(key) {
            Entry::Occupied(entry) => {
                let &(cloud, temp) = entry.get();
                Ok(WeatherSample::new(place.clone(), cloud, temp))
            }
            Entry::Vacant(entry) => {
                entry.insert((fetched.cloud_cover_pct, fetched.temperature_c));
                Ok(fetched)
            }
        }
    }
}
