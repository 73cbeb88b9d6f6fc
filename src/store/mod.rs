//! Entity store backed by SQLite.
//!
//! The store is the sole authority for identity and durable state. Every
//! call is a single statement against the pool, so each write is durable
//! when the call returns. Domain rules live in the enrollment engine; the
//! store only refuses what the schema or a conditional write refuses.

mod classes;
mod enrollments;
mod errors;
mod persons;
mod schools;

pub use errors::StoreError;

use rollbook_db::SqlitePool;

/// Outcome of a conditional role write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleWrite {
    Applied,
    /// The person's current role or home school did not allow the write.
    Rejected,
}

#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
