//! bistro-server — restaurant ordering backend
//!
//! Long-running service that:
//! - Serves menu, review, cart and order CRUD over MongoDB
//! - Issues and verifies JWT identity tokens (user / admin tiers)
//! - Creates Stripe payment intents and records completed payments
//! - Exposes two aggregation-based reporting endpoints

mod api;
mod auth;
mod config;
mod db;
mod error;
mod state;
mod stripe;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bistro_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting bistro-server (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    // Confirm the store is reachable before accepting traffic
    state.ping().await?;
    tracing::info!("Database connected successfully");

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("bistro-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
