use async_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::{
    api::DynAPI,
    entities::SearchRole,
    error::{unexpected_error, Error},
};

/// Input the page forwards to the coordinator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum UiEvent {
    QueryChanged { role: SearchRole, text: String },
    ResultSelected { role: SearchRole, index: usize },
    OutsideInteraction,
    UseCurrentLocation { role: SearchRole },
    Reset,
}

pub fn channel() -> (Sender<UiEvent>, Receiver<UiEvent>) {
    async_channel::unbounded()
}

pub async fn send(tx: &Sender<UiEvent>, event: UiEvent) -> Result<(), Error> {
    tx.send(event).await.map_err(|_| unexpected_error())
}

/// Drains a single event queue. Lookups are spawned so a slow search never
/// holds up the keystrokes behind it; everything else runs in queue order.
pub struct Dispatcher {
    api: DynAPI,
    rx: Receiver<UiEvent>,
}

impl Dispatcher {
    pub fn new(api: DynAPI, rx: Receiver<UiEvent>) -> Self {
        Self { api, rx }
    }

    /// Runs until every sender is gone, then waits for outstanding lookups.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) {
        let mut lookups: Vec<JoinHandle<()>> = vec![];

        while let Ok(event) = self.rx.recv().await {
            tracing::debug!("dispatching {:?}", &event);

            match event {
                UiEvent::QueryChanged { role, text } => {
                    let api = self.api.clone();

                    lookups.push(tokio::spawn(async move {
                        api.on_query_changed(role, &text).await;
                    }));
                }
                UiEvent::ResultSelected { role, index } => {
                    if let Err(err) = self.api.select_result(role, index).await {
                        tracing::warn!("ignoring selection of result {}: {}", index, err);
                    }
                }
                UiEvent::OutsideInteraction => self.api.on_outside_interaction().await,
                UiEvent::UseCurrentLocation { role } => {
                    if let Err(err) = self.api.use_current_location(role).await {
                        tracing::warn!("current location unavailable: {}", err);
                    }
                }
                UiEvent::Reset => self.api.reset().await,
            }

            lookups.retain(|handle| !handle.is_finished());
        }

        for result in futures::future::join_all(lookups).await {
            if let Err(err) = result {
                tracing::error!("lookup task failed: {}", err);
            }
        }
    }
}
