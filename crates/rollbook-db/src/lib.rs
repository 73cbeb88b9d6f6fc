//! # Rollbook DB
//!
//! Database pool and schema bootstrap for the Rollbook service.
//!
//! This crate creates the SQLite connection pool used by the entity store
//! and makes sure the four relations (`schools`, `persons`, `classes`,
//! `class_students`) exist.
//!
//! # Example
//!
//! ```ignore
//! use rollbook_config::DatabaseConfig;
//! use rollbook_db::{ensure_schema, init_db_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sqlx::Error> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     ensure_schema(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::str::FromStr;

use rollbook_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info, instrument};

// Re-export SqlitePool for convenience
pub use sqlx::SqlitePool;

/// Statements creating the schema, in dependency order.
///
/// Every statement is idempotent so the bootstrap can run on every start.
/// `AUTOINCREMENT` keeps ids strictly increasing and never reused.
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS schools (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'unassigned'
            CHECK (role IN ('unassigned', 'teacher', 'student')),
        home_school_id INTEGER DEFAULT NULL REFERENCES schools(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS classes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        school_id INTEGER NOT NULL REFERENCES schools(id),
        teacher_id INTEGER NOT NULL REFERENCES persons(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS class_students (
        class_id INTEGER NOT NULL REFERENCES classes(id),
        person_id INTEGER NOT NULL REFERENCES persons(id),
        PRIMARY KEY (class_id, person_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_classes_teacher_id ON classes (teacher_id)",
    "CREATE INDEX IF NOT EXISTS idx_class_students_person_id ON class_students (person_id)",
];

/// Initializes a SQLite connection pool.
///
/// The database file is created if it does not exist and foreign keys are
/// enforced on every connection. In-memory URLs get a single connection that
/// is never recycled, since closing it would discard the database.
///
/// # Errors
///
/// Returns the `sqlx` error if the URL is invalid or the first connection
/// cannot be opened.
#[instrument(skip(config), fields(db.max_connections = config.effective_max_connections()))]
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options =
        SqlitePoolOptions::new().max_connections(config.effective_max_connections());
    if config.is_in_memory() {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;
    debug!(db.in_memory = config.is_in_memory(), "Database pool ready");
    Ok(pool)
}

/// Creates the schema if absent.
///
/// # Errors
///
/// Returns the `sqlx` error of the first statement that fails.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    info!(relations = 4, "Database schema ready");
    Ok(())
}

/// Opens a fresh in-memory database with the schema applied.
///
/// # Errors
///
/// Returns the `sqlx` error if the pool or the schema cannot be created.
pub async fn init_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = init_db_pool(&DatabaseConfig::in_memory()).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
