use async_channel::Sender;
use tokio::time::{sleep, Duration};

use crate::{
    dispatcher::{send, UiEvent},
    entities::SearchRole,
    error::Error,
};

/// One rider action in a scripted session.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Type { role: SearchRole, text: String },
    Pick { role: SearchRole, index: usize },
    ClickOutside,
    Locate { role: SearchRole },
}

impl Step {
    pub fn typing(role: SearchRole, text: &str) -> Self {
        Self::Type {
            role,
            text: text.into(),
        }
    }
}

pub fn default_session() -> Vec<Step> {
    vec![
        Step::typing(SearchRole::Pickup, "times"),
        Step::Pick {
            role: SearchRole::Pickup,
            index: 0,
        },
        Step::typing(SearchRole::Destination, "zzz"),
        Step::ClickOutside,
        Step::typing(SearchRole::Destination, "airport"),
        Step::Pick {
            role: SearchRole::Destination,
            index: 1,
        },
        Step::Locate {
            role: SearchRole::Pickup,
        },
    ]
}

/// Keystroke-by-keystroke expansion of `text`, as an input element would
/// report it.
pub fn keystrokes(text: &str) -> Vec<String> {
    text.char_indices()
        .map(|(offset, c)| text[..offset + c.len_utf8()].to_string())
        .collect()
}

/// Feeds `steps` into the queue, pausing after typing so lookups can land.
#[tracing::instrument(skip(tx, steps))]
pub async fn replay(tx: &Sender<UiEvent>, steps: Vec<Step>, pause: Duration) -> Result<(), Error> {
    for step in steps {
        match step {
            Step::Type { role, text } => {
                for text in keystrokes(&text) {
                    send(tx, UiEvent::QueryChanged { role, text }).await?;
                }

                sleep(pause).await;
            }
            Step::Pick { role, index } => send(tx, UiEvent::ResultSelected { role, index }).await?,
            Step::ClickOutside => send(tx, UiEvent::OutsideInteraction).await?,
            Step::Locate { role } => send(tx, UiEvent::UseCurrentLocation { role }).await?,
        }
    }

    Ok(())
}
