use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use super::{Collaborators, Engine};
use crate::{
    api::{
        DynMapView, GeolocationProvider, LocationSource, MapView, NotificationSink, SearchView,
    },
    config::{ListPolicy, Settings},
    entities::{Coordinates, LocationRecord, NotificationLevel, ResultList, SearchRole},
    error::{upstream_error, Error},
    external::catalog::{default_catalog, filter_catalog},
};

#[derive(Default)]
pub struct FakeSource {
    pub delays: HashMap<String, Duration>,
    pub failing: bool,
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl LocationSource for FakeSource {
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>, Error> {
        self.queries.lock().unwrap().push(query.to_string());

        if let Some(delay) = self.delays.get(query) {
            sleep(*delay).await;
        }

        if self.failing {
            return Err(upstream_error());
        }

        Ok(filter_catalog(&default_catalog(), query))
    }

    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<String, Error> {
        Ok("Times Square, Manhattan, NY".into())
    }
}

pub struct FakeGeolocation(pub Result<Coordinates, Error>);

#[async_trait]
impl GeolocationProvider for FakeGeolocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        self.0.clone()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapCall {
    Pickup(Coordinates),
    Destination(Coordinates),
    CalculateRoute,
}

#[derive(Default)]
pub struct FakeMap {
    pub calls: Mutex<Vec<MapCall>>,
}

impl FakeMap {
    pub fn route_requests(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == MapCall::CalculateRoute)
            .count()
    }
}

#[async_trait]
impl MapView for FakeMap {
    async fn set_pickup_location(&self, coordinates: Coordinates) {
        self.calls.lock().unwrap().push(MapCall::Pickup(coordinates));
    }

    async fn set_destination_location(&self, coordinates: Coordinates) {
        self.calls
            .lock()
            .unwrap()
            .push(MapCall::Destination(coordinates));
    }

    async fn calculate_route(&self) {
        self.calls.lock().unwrap().push(MapCall::CalculateRoute);
    }
}

#[derive(Default)]
pub struct FakeNotifications {
    pub messages: Mutex<Vec<(String, NotificationLevel)>>,
}

impl NotificationSink for FakeNotifications {
    fn notify(&self, message: &str, level: NotificationLevel) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), level));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    Render(SearchRole, ResultList),
    Clear(SearchRole),
    Input(SearchRole, String),
}

#[derive(Default)]
pub struct FakeView {
    pub calls: Mutex<Vec<ViewCall>>,
}

impl FakeView {
    pub fn renders(&self, role: SearchRole) -> Vec<ResultList> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                ViewCall::Render(r, results) if *r == role => Some(results.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SearchView for FakeView {
    fn render_results(&self, role: SearchRole, results: &ResultList) {
        self.calls
            .lock()
            .unwrap()
            .push(ViewCall::Render(role, results.clone()));
    }

    fn clear_results(&self, role: SearchRole) {
        self.calls.lock().unwrap().push(ViewCall::Clear(role));
    }

    fn set_input_text(&self, role: SearchRole, text: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(ViewCall::Input(role, text.to_string()));
    }
}

pub struct Harness {
    pub engine: Engine,
    pub source: Arc<FakeSource>,
    pub map: Arc<FakeMap>,
    pub notifications: Arc<FakeNotifications>,
    pub view: Arc<FakeView>,
}

pub struct HarnessBuilder {
    source: FakeSource,
    geolocation: Result<Coordinates, Error>,
    with_map: bool,
    list_policy: ListPolicy,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            source: FakeSource::default(),
            geolocation: Ok(Coordinates::new(40.7580, -73.9855)),
            with_map: true,
            list_policy: ListPolicy::Independent,
        }
    }

    pub fn failing_source(mut self) -> Self {
        self.source.failing = true;
        self
    }

    pub fn delay(mut self, query: &str, delay: Duration) -> Self {
        self.source.delays.insert(query.to_string(), delay);
        self
    }

    pub fn geolocation(mut self, outcome: Result<Coordinates, Error>) -> Self {
        self.geolocation = outcome;
        self
    }

    pub fn without_map(mut self) -> Self {
        self.with_map = false;
        self
    }

    pub fn list_policy(mut self, list_policy: ListPolicy) -> Self {
        self.list_policy = list_policy;
        self
    }

    pub fn build(self) -> Harness {
        let source = Arc::new(self.source);
        let map = Arc::new(FakeMap::default());
        let notifications = Arc::new(FakeNotifications::default());
        let view = Arc::new(FakeView::default());

        let settings = Settings {
            route_delay: Duration::ZERO,
            list_policy: self.list_policy,
            ..Settings::default()
        };

        let collaborators = Collaborators {
            source: source.clone(),
            geolocation: Arc::new(FakeGeolocation(self.geolocation)),
            map: match self.with_map {
                true => Some(map.clone() as DynMapView),
                false => None,
            },
            notifications: notifications.clone(),
            view: view.clone(),
        };

        Harness {
            engine: Engine::new(collaborators, &settings),
            source,
            map,
            notifications,
            view,
        }
    }
}

impl Harness {
    pub fn lookups(&self) -> Vec<String> {
        self.source.queries.lock().unwrap().clone()
    }
}
