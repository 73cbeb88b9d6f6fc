use rollbook_models::{ClassId, PersonId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("person {person_id} is already enrolled in class {class_id}")]
    AlreadyEnrolled {
        class_id: ClassId,
        person_id: PersonId,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
