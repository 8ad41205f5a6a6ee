use std::{env, str::FromStr};

use sea_orm::ConnectOptions;

use crate::{prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  pub environment: String,
  pub max_connections: u32,
  pub acquire_timeout: Duration,
  /// Token refill rate of the per-IP limiter
  pub rate_per_second: u64,
  pub rate_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: String::from("sqlite:challenges.db?mode=rwc"),
      port: 8000,
      environment: String::from("development"),

      max_connections: 10,
      acquire_timeout: Duration::from_secs(5),

      rate_per_second: 2,
      rate_burst: 100,
    }
  }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match env::var(key) {
    Ok(raw) if !raw.trim().is_empty() => {
      let value =
        raw.trim().parse().with_context(|| format!("Invalid {key}: {raw}"))?;
      Ok(Some(value))
    }
    _ => Ok(None),
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let mut config = Self::default();

    if let Some(url) = parse_var("DATABASE_URL")?
      .or(parse_var("TIMESCALE_SERVICE_URL")?)
    {
      config.database_url = url;
    }
    if let Some(port) = parse_var("PORT")? {
      config.port = port;
    }
    if let Some(environment) = parse_var("ENVIRONMENT")? {
      config.environment = environment;
    }
    if let Some(max) = parse_var("DB_MAX_CONNECTIONS")? {
      config.max_connections = max;
    }
    if let Some(timeout) = parse_var::<humantime::Duration>("DB_ACQUIRE_TIMEOUT")?
    {
      config.acquire_timeout = timeout.into();
    }
    if let Some(rate) = parse_var("RATE_LIMIT_PER_SECOND")? {
      config.rate_per_second = rate;
    }
    if let Some(burst) = parse_var("RATE_LIMIT_BURST")? {
      config.rate_burst = burst;
    }

    Ok(config)
  }
}

pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub challenge: sv::Challenge<'a>,
  pub submission: sv::Submission<'a>,
  pub stats: sv::Stats<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let mut options = ConnectOptions::new(&config.database_url);
    options
      .max_connections(config.max_connections)
      .acquire_timeout(config.acquire_timeout)
      .sqlx_logging(false);

    let db = Database::connect(options)
      .await
      .context("Failed to connect to database")?;

    Self::with_connection(db, config).await
  }

  pub async fn with_connection(
    db: DatabaseConnection,
    config: Config,
  ) -> anyhow::Result<Self> {
    info!("Running migrations...");
    migration::Migrator::up(&db, None)
      .await
      .context("Failed to run migrations")?;

    Ok(Self { db, config })
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      challenge: sv::Challenge::new(&self.db),
      submission: sv::Submission::new(&self.db),
      stats: sv::Stats::new(&self.db),
    }
  }
}
