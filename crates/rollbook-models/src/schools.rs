//! School models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::ids::SchoolId;

/// A school. Owns classes by reference.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
}

/// Payload of `/school/create`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateSchoolDto {
    #[validate(length(min = 1, message = "school name must not be empty"))]
    pub name: String,
}
