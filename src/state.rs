use anyhow::Context;
use rollbook_config::AppConfig;
use rollbook_db::{SqlitePool, ensure_schema, init_db_pool};

use crate::engine::EnrollmentEngine;
use crate::router::Router;
use crate::store::Store;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub db: SqlitePool,
    pub engine: EnrollmentEngine,
}

impl AppState {
    pub fn router(&self) -> Router {
        Router::new(self.engine.clone())
    }
}

/// Opens the database, creates the schema and wires the engine to it.
pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let db = init_db_pool(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    ensure_schema(&db)
        .await
        .context("failed to create database schema")?;

    let engine = EnrollmentEngine::new(Store::new(db.clone()));
    Ok(AppState { config, db, engine })
}
