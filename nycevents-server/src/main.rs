mod app;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Result;
use nycevents_core::OpenDataClient;
use nycevents_core::settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::create_app;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nycevents=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;
    let client = OpenDataClient::new(&settings)?;
    tracing::info!(endpoint = client.endpoint(), "using open-data endpoint");

    let app = create_app(AppState::new(Arc::new(client)));

    let addr = format!("{}:{}", settings.server_host, settings.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
