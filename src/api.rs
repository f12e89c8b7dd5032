use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Confirmation, Coordinates, LocationRecord, NotificationLevel, Phase, ResultList,
    RouteSelectionState, SearchRole,
};
use crate::error::Error;

#[async_trait]
pub trait SearchAPI {
    async fn on_query_changed(&self, role: SearchRole, text: &str);

    /// Renders `results` for `role` unless `request` has been superseded.
    /// Returns whether anything was rendered.
    async fn on_results_ready(
        &self,
        role: SearchRole,
        request: u64,
        results: Vec<LocationRecord>,
    ) -> bool;

    async fn on_outside_interaction(&self);

    async fn phase(&self, role: SearchRole) -> Phase;

    async fn input_text(&self, role: SearchRole) -> String;
}

#[async_trait]
pub trait SelectionAPI {
    async fn on_result_selected(&self, role: SearchRole, record: LocationRecord) -> Confirmation;

    async fn select_result(&self, role: SearchRole, index: usize) -> Result<Confirmation, Error>;

    async fn use_current_location(&self, role: SearchRole) -> Result<Confirmation, Error>;

    async fn reset(&self);

    async fn selection(&self) -> RouteSelectionState;
}

pub trait API: SearchAPI + SelectionAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;

#[async_trait]
pub trait LocationSource {
    async fn search(&self, query: &str) -> Result<Vec<LocationRecord>, Error>;

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<String, Error>;
}

#[async_trait]
pub trait GeolocationProvider {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

#[async_trait]
pub trait MapView {
    async fn set_pickup_location(&self, coordinates: Coordinates);

    async fn set_destination_location(&self, coordinates: Coordinates);

    async fn calculate_route(&self);
}

pub trait NotificationSink {
    fn notify(&self, message: &str, level: NotificationLevel);
}

/// Per-role input and results anchor owned by the page.
pub trait SearchView {
    fn render_results(&self, role: SearchRole, results: &ResultList);

    fn clear_results(&self, role: SearchRole);

    fn set_input_text(&self, role: SearchRole, text: &str);
}

pub type DynLocationSource = Arc<dyn LocationSource + Send + Sync>;
pub type DynGeolocationProvider = Arc<dyn GeolocationProvider + Send + Sync>;
pub type DynMapView = Arc<dyn MapView + Send + Sync>;
pub type DynNotificationSink = Arc<dyn NotificationSink + Send + Sync>;
pub type DynSearchView = Arc<dyn SearchView + Send + Sync>;
