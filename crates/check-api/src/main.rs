//! provencheck server binary.
//!
//! Reads its settings from the environment (or `.env`):
//!
//! ```bash
//! PADDLE_API_KEY=pdl_live_apikey_... PORT=3000 provencheck
//! ```
//!
//! Log verbosity follows `RUST_LOG`.

use check_api::{routes, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let state = AppState::new()?;
    let addr = state.config.socket_addr()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %state.config.environment,
        provider = state.lookup.provider_name(),
        credential = state.paddle_configured(),
        report_offers = state.catalog.reports.len(),
        raw_data = state.config.include_raw_data,
        "provencheck configured"
    );

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
