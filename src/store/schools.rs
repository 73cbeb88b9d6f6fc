use rollbook_models::{School, SchoolId};
use tracing::{debug, error, info, instrument};

use super::{Store, StoreError};

impl Store {
    #[instrument(skip(self, name), fields(db.operation = "INSERT", db.table = "schools"))]
    pub async fn create_school(&self, name: &str) -> Result<School, StoreError> {
        debug!(school.name = %name, "Creating new school");

        let school = sqlx::query_as::<_, School>(
            "INSERT INTO schools (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, school.name = %name, "Database error creating school");
            StoreError::from(e)
        })?;

        info!(school.id = %school.id, school.name = %school.name, "School created");
        Ok(school)
    }

    #[instrument(skip(self), fields(school.id = %id, db.operation = "SELECT", db.table = "schools"))]
    pub async fn school_exists(&self, id: SchoolId) -> Result<bool, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schools WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error checking school");
                StoreError::from(e)
            })?;

        Ok(count > 0)
    }
}
