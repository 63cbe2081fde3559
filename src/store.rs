//! Data-access capability handed to the validator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel_async::AsyncPgConnection;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use dotenvy::dotenv;
use thiserror::Error;

use crate::errno::{self, DomainError};

pub type PgPool = Pool<AsyncPgConnection>;

/// Access to persistent state for checks that need more than the input.
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies that the backing database answers queries.
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: Store + ?Sized> Store for Arc<T> {
    async fn ping(&self) -> Result<(), DomainError> {
        (**self).ping().await
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set before creating a connection pool")]
    Missing(&'static str),
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("DATABASE_MIN_IDLE ({min_idle}) must not exceed DATABASE_MAX_CONNECTIONS ({max_size})")]
    MinIdleExceedsMax { min_idle: u32, max_size: u32 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create database connection pool: {0}")]
    Pool(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_size: u32,
    pub min_idle: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

// The URL carries credentials.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("database_url", &"***")
            .field("max_size", &self.max_size)
            .field("min_idle", &self.min_idle)
            .field("connection_timeout", &self.connection_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("max_lifetime", &self.max_lifetime)
            .finish()
    }
}

impl StoreConfig {
    pub const DEFAULT_MAX_SIZE: u32 = 16;
    pub const DEFAULT_MIN_IDLE: u32 = 4;
    pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 5;
    pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
    pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 3600;

    /// Reads the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_size = parse_number(&lookup, "DATABASE_MAX_CONNECTIONS", Self::DEFAULT_MAX_SIZE)?;
        let min_idle = parse_number(&lookup, "DATABASE_MIN_IDLE", Self::DEFAULT_MIN_IDLE)?;
        if min_idle > max_size {
            return Err(ConfigError::MinIdleExceedsMax { min_idle, max_size });
        }

        let connection_timeout = parse_number(
            &lookup,
            "DATABASE_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECTION_TIMEOUT_SECS,
        )?;
        let idle_timeout = parse_number(
            &lookup,
            "DATABASE_IDLE_TIMEOUT_SECS",
            Self::DEFAULT_IDLE_TIMEOUT_SECS,
        )?;
        let max_lifetime = parse_number(
            &lookup,
            "DATABASE_MAX_LIFETIME_SECS",
            Self::DEFAULT_MAX_LIFETIME_SECS,
        )?;

        Ok(Self {
            database_url,
            max_size,
            min_idle,
            connection_timeout: Duration::from_secs(connection_timeout),
            idle_timeout: Duration::from_secs(idle_timeout),
            max_lifetime: Duration::from_secs(max_lifetime),
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}

/// [`Store`] backed by a pooled PostgreSQL connection.
#[derive(Clone)]
pub struct Datastore {
    pool: PgPool,
}

impl Datastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "database_pool_setup", skip(config))]
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        tracing::debug!("Initializing database connection pool");

        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.as_str());

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle))
            .connection_timeout(config.connection_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(Some(config.max_lifetime))
            .build(manager)
            .await
            .map_err(|err| StoreError::Pool(err.to_string()))?;

        tracing::info!(
            max_size = config.max_size,
            min_idle = config.min_idle,
            connection_timeout_secs = config.connection_timeout.as_secs(),
            "Database connection pool established"
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for Datastore {
    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.pool.get().await.map_err(|err| {
            tracing::error!(error = %err, "Failed to acquire database connection");
            errno::DB_READ
        })?;

        diesel::sql_query("SELECT 1").execute(&mut conn).await?;
        Ok(())
    }
}
