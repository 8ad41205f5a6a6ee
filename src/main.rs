//! Brand Challenge API - backend of the Telegram brand challenge mini-app
//!
//! Architecture:
//! - SeaORM for database access (PostgreSQL or SQLite)
//! - Axum for the HTTP API with rate limiting
//! - Tokio for async runtime

mod entity;
mod error;
mod model;
mod prelude;
mod server;
mod state;
mod sv;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  prelude::*,
  state::{AppState, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "brand_challenge=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;
  info!(
    "Starting Brand Challenge API v{} ({})",
    env!("CARGO_PKG_VERSION"),
    config.environment
  );

  let app = Arc::new(AppState::new(config).await?);

  server::serve(app).await
}
