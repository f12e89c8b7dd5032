use std::sync::Arc;

use swiftride::api::SelectionAPI;
use swiftride::config::Settings;
use swiftride::dispatcher::{self, Dispatcher};
use swiftride::engine::{Collaborators, Engine};
use swiftride::error::{unexpected_error, Error};
use swiftride::simulation;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;
    let engine = Arc::new(Engine::new(Collaborators::standard(&settings), &settings));

    let (tx, rx) = dispatcher::channel();
    let dispatcher = Dispatcher::new(engine.clone(), rx);
    let handle = tokio::spawn(async move { dispatcher.run().await });

    let pause = settings.search_latency * 2 + settings.search_jitter * 3;
    simulation::replay(&tx, simulation::default_session(), pause).await?;

    tx.close();
    handle.await.map_err(|_| unexpected_error())?;

    let selection = engine.selection().await;
    tracing::info!("final selection: {}", serde_json::to_string(&selection)?);

    Ok(())
}
