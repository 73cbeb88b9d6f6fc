use rollbook_core::{AppError, ErrorKind};
use rollbook_models::{ClassId, PersonId, Role, SchoolId};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("school name must not be empty")]
    EmptyName,

    #[error("school {0} not found")]
    SchoolNotFound(SchoolId),

    #[error("person {0} not found")]
    PersonNotFound(PersonId),

    #[error("class {0} not found")]
    ClassNotFound(ClassId),

    #[error("person {person_id} is already a {current}, cannot be a {requested}")]
    RoleConflict {
        person_id: PersonId,
        current: Role,
        requested: Role,
    },

    #[error(
        "student can only enroll in classes from one school: student {person_id} belongs to school {home_school_id}, class {class_id} is in school {class_school_id}"
    )]
    SchoolMismatch {
        person_id: PersonId,
        home_school_id: SchoolId,
        class_id: ClassId,
        class_school_id: SchoolId,
    },

    #[error("student {person_id} is already enrolled in class {class_id}")]
    AlreadyEnrolled {
        person_id: PersonId,
        class_id: ClassId,
    },

    #[error(transparent)]
    Store(sqlx::Error),
}

impl EnrollmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(_) => ErrorKind::Store,
            _ => ErrorKind::Validation,
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::new(self.kind(), self)
    }
}

impl From<StoreError> for EnrollmentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyEnrolled {
                class_id,
                person_id,
            } => Self::AlreadyEnrolled {
                person_id,
                class_id,
            },
            StoreError::Database(e) => Self::Store(e),
        }
    }
}
