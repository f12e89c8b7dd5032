use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Normal};
use tokio::time::{sleep, Duration};

use crate::{
    api::LocationSource,
    config::Settings,
    entities::{Category, Coordinates, LocationRecord},
    error::{unexpected_error, Error},
};

pub const MAX_RESULTS: usize = 6;

const REVERSE_GEOCODE_ADDRESSES: [&str; 4] = [
    "Times Square, Manhattan, NY",
    "Central Park, New York, NY",
    "Empire State Building, NYC",
    "Brooklyn Bridge, New York, NY",
];

pub fn default_catalog() -> Vec<LocationRecord> {
    macro_rules! catalog {
        ($($id:expr => ($name:expr, $address:expr, $category:expr, $lat:expr, $lng:expr)),* $(,)?) => {
            vec![$(LocationRecord::new(
                $id,
                $name,
                $address,
                $category,
                Some(Coordinates::new($lat, $lng)),
            ),)*]
        };
    }

    catalog! {
        "1" => ("Times Square", "Manhattan, New York, NY", Category::Landmark, 40.7580, -73.9855),
        "2" => ("Central Park", "Manhattan, New York, NY", Category::Park, 40.7829, -73.9654),
        "3" => ("Empire State Building", "350 5th Ave, New York, NY", Category::Landmark, 40.7484, -73.9857),
        "4" => ("Brooklyn Bridge", "New York, NY 10038", Category::Landmark, 40.7061, -73.9969),
        "5" => ("JFK Airport", "Queens, NY 11430", Category::Airport, 40.6413, -73.7781),
        "6" => ("LaGuardia Airport", "Queens, NY 11371", Category::Airport, 40.7769, -73.8740),
        "7" => ("Wall Street", "Manhattan, New York, NY", Category::Area, 40.7074, -74.0113),
        "8" => ("Grand Central Terminal", "89 E 42nd St, New York, NY", Category::Transit, 40.7527, -73.9772),
    }
}

/// Case-insensitive substring match on name or address. Keeps catalog
/// order and stops after the first [`MAX_RESULTS`] hits.
pub fn filter_catalog(records: &[LocationRecord], query: &str) -> Vec<LocationRecord> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| record.matches(&needle))
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}

/// Fixed catalog of points of interest answered after a simulated delay.
#[derive(Debug)]
pub struct CatalogSource {
    records: Vec<LocationRecord>,
    latency: Duration,
    jitter: Duration,
    reverse_geocode_latency: Duration,
}

impl CatalogSource {
    pub fn new(settings: &Settings) -> Self {
        Self::with_records(default_catalog(), settings)
    }

    pub fn with_records(records: Vec<LocationRecord>, settings: &Settings) -> Self {
        Self {
            records,
            latency: settings.search_latency,
            jitter: settings.search_jitter,
            reverse_geocode_latency: settings.reverse_geocode_latency,
        }
    }

    fn sample_latency(&self) -> Result<Duration, Error> {
        if self.jitter.is_zero() {
            return Ok(self.latency);
        }

        let dist = Normal::new(
            self.latency.as_secs_f64(),
            self.jitter.as_secs_f64(),
        )
        .map_err(|_| unexpected_error())?;

        let seconds = dist.sample(&mut rand::thread_rng()).max(0.0);

        Ok(Duration::from_secs_f64(seconds))
    }
}

#[async_trait]
impl LocationSource for CatalogSource {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>, Error> {
        let latency = self.sample_latency()?;
        sleep(latency).await;

        let results = filter_catalog(&self.records, query);
        tracing::debug!("catalog matched {} locations", results.len());

        Ok(results)
    }

    #[tracing::instrument(skip(self))]
    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, Error> {
        sleep(self.reverse_geocode_latency).await;

        let address = REVERSE_GEOCODE_ADDRESSES
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| unexpected_error())?;

        Ok(address.to_string())
    }
}
