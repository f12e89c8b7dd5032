use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::entities::Coordinates;
use crate::error::{invalid_input_error, Error};

/// Whether opening a result list for one role closes the other role's list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPolicy {
    Independent,
    Exclusive,
}

impl FromStr for ListPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "independent" => Ok(Self::Independent),
            "exclusive" => Ok(Self::Exclusive),
            _ => Err(invalid_input_error()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub search_latency: Duration,
    pub search_jitter: Duration,
    pub reverse_geocode_latency: Duration,
    pub route_delay: Duration,
    pub geolocation_timeout: Duration,
    pub geolocation_max_age: Duration,
    pub list_policy: ListPolicy,
    pub position: Option<Coordinates>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_latency: Duration::from_millis(300),
            search_jitter: Duration::ZERO,
            reverse_geocode_latency: Duration::from_millis(500),
            route_delay: Duration::from_millis(500),
            geolocation_timeout: Duration::from_secs(10),
            geolocation_max_age: Duration::from_secs(60),
            list_policy: ListPolicy::Independent,
            position: None,
        }
    }
}

impl Settings {
    /// Reads `SWIFTRIDE_*` variables, loading `.env` first when present.
    /// Unset variables keep their defaults.
    #[tracing::instrument(name = "Settings::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let millis = |key: &str, default: Duration| -> Result<Duration, Error> {
            match lookup(key) {
                Some(value) => Ok(Duration::from_millis(value.trim().parse::<u64>()?)),
                None => Ok(default),
            }
        };

        let list_policy = match lookup("SWIFTRIDE_LIST_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.list_policy,
        };

        let position = match (
            lookup("SWIFTRIDE_LATITUDE"),
            lookup("SWIFTRIDE_LONGITUDE"),
        ) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(
                latitude.trim().parse::<f64>()?,
                longitude.trim().parse::<f64>()?,
            )),
            (None, None) => None,
            _ => return Err(invalid_input_error()),
        };

        Ok(Self {
            search_latency: millis("SWIFTRIDE_SEARCH_LATENCY_MS", defaults.search_latency)?,
            search_jitter: millis("SWIFTRIDE_SEARCH_JITTER_MS", defaults.search_jitter)?,
            reverse_geocode_latency: millis(
                "SWIFTRIDE_REVERSE_GEOCODE_LATENCY_MS",
                defaults.reverse_geocode_latency,
            )?,
            route_delay: millis("SWIFTRIDE_ROUTE_DELAY_MS", defaults.route_delay)?,
            geolocation_timeout: millis(
                "SWIFTRIDE_GEOLOCATION_TIMEOUT_MS",
                defaults.geolocation_timeout,
            )?,
            geolocation_max_age: millis(
                "SWIFTRIDE_GEOLOCATION_MAX_AGE_MS",
                defaults.geolocation_max_age,
            )?,
            list_policy,
            position,
        })
    }
}
