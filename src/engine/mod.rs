mod helpers;
mod search_api;
mod selection_api;

#[cfg(test)]
mod fakes;

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Duration;

use crate::{
    api::{
        DynGeolocationProvider, DynLocationSource, DynMapView, DynNotificationSink,
        DynSearchView, API,
    },
    config::{ListPolicy, Settings},
    entities::{Phase, RouteSelectionState, SearchRole},
    external::{
        catalog::CatalogSource,
        console::{TracingMap, TracingNotifications, TracingView},
        geolocation,
    },
};

/// Queries shorter than this many characters never reach the source.
pub const MIN_QUERY_CHARS: usize = 2;

/// Everything the coordinator talks to, handed over at construction.
pub struct Collaborators {
    pub source: DynLocationSource,
    pub geolocation: DynGeolocationProvider,
    pub map: Option<DynMapView>,
    pub notifications: DynNotificationSink,
    pub view: DynSearchView,
}

impl Collaborators {
    pub fn standard(settings: &Settings) -> Self {
        Self {
            source: Arc::new(CatalogSource::new(settings)),
            geolocation: geolocation::from_settings(settings),
            map: Some(Arc::new(TracingMap)),
            notifications: Arc::new(TracingNotifications),
            view: Arc::new(TracingView),
        }
    }
}

#[derive(Debug, Default)]
struct RoleState {
    phase: Phase,
    latest_request: u64,
    input_text: String,
}

#[derive(Debug, Default)]
struct State {
    roles: [RoleState; 2],
    selection: RouteSelectionState,
}

impl State {
    fn role(&self, role: SearchRole) -> &RoleState {
        &self.roles[role.index()]
    }

    fn role_mut(&mut self, role: SearchRole) -> &mut RoleState {
        &mut self.roles[role.index()]
    }
}

/// Location search coordinator for the pickup and destination inputs.
pub struct Engine {
    source: DynLocationSource,
    geolocation: DynGeolocationProvider,
    map: Option<DynMapView>,
    notifications: DynNotificationSink,
    view: DynSearchView,
    list_policy: ListPolicy,
    route_delay: Duration,
    state: Mutex<State>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(collaborators: Collaborators, settings: &Settings) -> Self {
        let Collaborators {
            source,
            geolocation,
            map,
            notifications,
            view,
        } = collaborators;

        if map.is_none() {
            tracing::info!("no map attached, map updates are skipped");
        }

        Self {
            source,
            geolocation,
            map,
            notifications,
            view,
            list_policy: settings.list_policy,
            route_delay: settings.route_delay,
            state: Mutex::new(State::default()),
        }
    }
}

impl API for Engine {}
