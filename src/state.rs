//! Application state for bistro-server

use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::auth::token::TokenService;
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, constructed once and cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// MongoDB database handle (collections: users, menu, reviews, carts, orders)
    pub db: Database,
    /// JWT token service for identity tokens
    pub tokens: TokenService,
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let db = client.database(&config.database_name);

        Ok(Self {
            db,
            tokens: TokenService::new(&config.jwt_secret),
            stripe_secret_key: config.stripe_secret_key.clone(),
            allowed_origins: config.allowed_origins.clone(),
        })
    }

    /// Round-trip a ping command to confirm the store is reachable
    pub async fn ping(&self) -> Result<(), BoxError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
