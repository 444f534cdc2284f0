use crate::config::AppConfig;
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        Ok(Self {
            db,
            config: Arc::new(config),
        })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// State whose pool only connects on first use. Routes that never reach
    /// the store can be exercised against it without a running Postgres.
    pub fn lazy(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.database_url)
            .context("build lazy pool")?;

        Ok(Self {
            db,
            config: Arc::new(config),
        })
    }

    /// Release every pooled connection. Called once the server has drained.
    pub async fn close(&self) {
        self.db.close().await;
        tracing::info!("database pool closed");
    }
}
