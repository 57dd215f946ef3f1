//! Application state - shared across all handlers.

use std::sync::Arc;

use forum_core::error::RepoError;
use forum_infra::{DatabaseConfig, DbConn, UnitOfWork, connect, ensure_schema};

/// Shared application state. Every worker's clone points at the same pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbConn>,
}

impl AppState {
    /// Connect to the store and make sure the tables exist.
    pub async fn init(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let db = connect(config).await?;
        ensure_schema(&db).await?;

        tracing::info!("Application state initialized");
        Ok(Self { db: Arc::new(db) })
    }

    /// Start the unit of work for one request.
    pub async fn begin(&self) -> Result<UnitOfWork, RepoError> {
        UnitOfWork::begin(&self.db).await
    }
}
