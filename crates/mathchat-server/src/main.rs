mod configuration;
mod error;
mod routes;
mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = configuration::Settings::new()?;
    let addr = settings.server.socket_addr()?;
    let request_timeout = settings.server.request_timeout();
    info!(
        model = %settings.provider.model,
        tool = ?settings.tool,
        "loaded configuration"
    );

    let state = state::AppState::from_settings(settings)?;
    let app = routes::configure(state, request_timeout);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
