use async_trait::async_trait;

use crate::{
    api::{MapView, NotificationSink, SearchView},
    entities::{Coordinates, NotificationLevel, ResultList, SearchRole},
};

/// Collaborators that report to the tracing subscriber instead of a page.
#[derive(Debug, Default)]
pub struct TracingMap;

#[async_trait]
impl MapView for TracingMap {
    async fn set_pickup_location(&self, coordinates: Coordinates) {
        tracing::info!("map pickup marker at {}", String::from(coordinates));
    }

    async fn set_destination_location(&self, coordinates: Coordinates) {
        tracing::info!("map destination marker at {}", String::from(coordinates));
    }

    async fn calculate_route(&self) {
        tracing::info!("map calculating route");
    }
}

#[derive(Debug, Default)]
pub struct TracingNotifications;

impl NotificationSink for TracingNotifications {
    fn notify(&self, message: &str, level: NotificationLevel) {
        match level {
            NotificationLevel::Error => tracing::error!("{}", message),
            NotificationLevel::Warning => tracing::warn!("{}", message),
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(?level, "{}", message)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct TracingView;

impl SearchView for TracingView {
    fn render_results(&self, role: SearchRole, results: &ResultList) {
        match results {
            ResultList::NoResults => tracing::info!(
                role = role.key(),
                "{}: {}",
                ResultList::NO_RESULTS_TITLE,
                ResultList::NO_RESULTS_HINT
            ),
            ResultList::Candidates(records) => {
                for (index, record) in records.iter().enumerate() {
                    tracing::info!(
                        role = role.key(),
                        "[{}] ({}) {} - {}",
                        index,
                        record.category.icon(),
                        record.name,
                        record.address
                    );
                }
            }
        }
    }

    fn clear_results(&self, role: SearchRole) {
        tracing::debug!(role = role.key(), "results closed");
    }

    fn set_input_text(&self, role: SearchRole, text: &str) {
        tracing::debug!(role = role.key(), "input set to {:?}", text);
    }
}
