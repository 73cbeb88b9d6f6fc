use rollbook_models::{Class, ClassId, PersonId, SchoolId};
use tracing::{debug, error, info, instrument};

use super::{Store, StoreError};

impl Store {
    #[instrument(
        skip(self, name),
        fields(school.id = %school_id, teacher.id = %teacher_id, db.operation = "INSERT", db.table = "classes")
    )]
    pub async fn create_class(
        &self,
        name: &str,
        school_id: SchoolId,
        teacher_id: PersonId,
    ) -> Result<Class, StoreError> {
        debug!(class.name = %name, "Creating new class");

        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name, school_id, teacher_id) VALUES (?, ?, ?)
             RETURNING id, name, school_id, teacher_id",
        )
        .bind(name)
        .bind(school_id)
        .bind(teacher_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, class.name = %name, "Database error creating class");
            StoreError::from(e)
        })?;

        info!(class.id = %class.id, school.id = %school_id, "Class created");
        Ok(class)
    }

    #[instrument(skip(self), fields(class.id = %id, db.operation = "SELECT", db.table = "classes"))]
    pub async fn class_school_id(&self, id: ClassId) -> Result<Option<SchoolId>, StoreError> {
        sqlx::query_scalar::<_, SchoolId>("SELECT school_id FROM classes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching class");
                StoreError::from(e)
            })
    }

    #[instrument(skip(self), fields(teacher.id = %teacher_id, db.operation = "SELECT", db.table = "classes"))]
    pub async fn classes_taught(&self, teacher_id: PersonId) -> Result<Vec<ClassId>, StoreError> {
        sqlx::query_scalar::<_, ClassId>("SELECT id FROM classes WHERE teacher_id = ? ORDER BY id")
            .bind(teacher_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error listing taught classes");
                StoreError::from(e)
            })
    }
}
