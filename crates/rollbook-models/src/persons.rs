//! Person models and DTOs.
//!
//! A person starts out [`Role::Unassigned`] and becomes either a teacher (by
//! being assigned a class) or a student (by enrolling in one). The two roles
//! are mutually exclusive and permanent.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ids::{ClassId, PersonId, SchoolId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Unassigned,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Whether a person holding `self` may take on `target`.
    ///
    /// Only `unassigned -> teacher`, `unassigned -> student`, and staying in
    /// the current role are allowed.
    pub fn can_become(&self, target: Role) -> bool {
        *self == target || *self == Role::Unassigned
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unassigned" => Ok(Self::Unassigned),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A person row.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    /// Set on first enrollment as a student; never changed afterwards.
    pub home_school_id: Option<SchoolId>,
}

/// Wire form of a person without class membership.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonSummary {
    pub id: PersonId,
    pub name: String,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
        }
    }
}

/// Wire form of a person with the ids of their classes, ascending.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonWithClasses {
    pub id: PersonId,
    pub name: String,
    pub classes: Vec<ClassId>,
}

impl PersonWithClasses {
    pub fn new(person: &Person, classes: Vec<ClassId>) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            classes,
        }
    }
}

/// Payload of `/person/create`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatePersonDto {
    pub name: String,
}

/// Payload of `/who/am/i`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhoAmIDto {
    pub id: PersonId,
}
