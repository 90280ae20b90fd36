//! Application state management
//!
//! Holds the resources every part of the tracker needs: the database handle
//! and the loaded configuration.

use crate::config::AppConfig;
use crate::db;
use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// - `db`: SqlitePool is internally Arc'd, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Open the configured database, prepare the schema and build the state
    pub async fn open(config: AppConfig) -> Result<Self> {
        let db = db::create_pool(&config.database).await?;
        db::init_schema(&db).await?;
        Ok(Self::new(db, config))
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
