//! Class models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ids::{ClassId, PersonId, SchoolId};
use crate::persons::PersonSummary;

/// A class row. School and teacher are fixed at creation.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub school_id: SchoolId,
    pub teacher_id: PersonId,
}

/// Wire form of a class with its teacher resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClassView {
    pub id: ClassId,
    pub name: String,
    pub school_id: SchoolId,
    pub teacher: PersonSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub students: Vec<PersonSummary>,
}

impl ClassView {
    pub fn new(class: &Class, teacher: PersonSummary) -> Self {
        Self {
            id: class.id,
            name: class.name.clone(),
            school_id: class.school_id,
            teacher,
            students: Vec::new(),
        }
    }
}

/// Reference to the teacher of a new class. Only the id is read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeacherRef {
    pub id: PersonId,
}

/// Payload of `/class/create`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateClassDto {
    pub name: String,
    pub school_id: SchoolId,
    pub teacher: TeacherRef,
}

/// Payload of `/class/add/student`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddStudentToClassDto {
    pub student_id: PersonId,
    pub class_id: ClassId,
}
