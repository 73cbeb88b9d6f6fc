use rollbook_models::{ClassId, PersonId};
use tracing::{error, info, instrument, warn};

use super::{Store, StoreError};

impl Store {
    /// Records that `person_id` attends `class_id`.
    ///
    /// Enrollments are a set: recording an existing pair fails with
    /// [`StoreError::AlreadyEnrolled`] and leaves the set unchanged.
    #[instrument(skip(self), fields(class.id = %class_id, person.id = %person_id, db.operation = "INSERT", db.table = "class_students"))]
    pub async fn add_enrollment(
        &self,
        class_id: ClassId,
        person_id: PersonId,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO class_students (class_id, person_id) VALUES (?, ?)
             ON CONFLICT (class_id, person_id) DO NOTHING",
        )
        .bind(class_id)
        .bind(person_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error recording enrollment");
            StoreError::from(e)
        })?;

        if result.rows_affected() == 0 {
            warn!(class.id = %class_id, person.id = %person_id, "Duplicate enrollment");
            return Err(StoreError::AlreadyEnrolled {
                class_id,
                person_id,
            });
        }

        info!(class.id = %class_id, person.id = %person_id, "Enrollment recorded");
        Ok(())
    }

    #[instrument(skip(self), fields(person.id = %person_id, db.operation = "SELECT", db.table = "class_students"))]
    pub async fn classes_enrolled(&self, person_id: PersonId) -> Result<Vec<ClassId>, StoreError> {
        sqlx::query_scalar::<_, ClassId>(
            "SELECT class_id FROM class_students WHERE person_id = ? ORDER BY class_id",
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing enrollments");
            StoreError::from(e)
        })
    }
}
