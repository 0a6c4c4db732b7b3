//! Forecast service entry point: loads the observation record and model
//! artifacts once, then serves the report over HTTP.

use std::error::Error;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gangamon_service::config::ServiceConfig;
use gangamon_service::context::ServiceContext;
use gangamon_service::server::{self, ServiceState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gangamon_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::load()?;

    // A missing data file or artifact must not kill the process: serve the
    // failure detail instead so probes and operators can see it.
    let state = match ServiceContext::load(&config) {
        Ok(context) => {
            tracing::info!(
                location = %context.location,
                models = context.registry.len(),
                observations = context.history.observations(),
                "service context loaded"
            );
            ServiceState::ready(context)
        }
        Err(err) => {
            tracing::error!(error = %err, "startup loading failed, serving in unavailable state");
            ServiceState::unavailable(&err)
        }
    };

    let app = server::router(state, &config.location);
    let addr: std::net::SocketAddr = config.server.addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "forecast service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
