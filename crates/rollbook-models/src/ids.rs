//! Strongly-typed ID newtypes for domain entities.
//!
//! Identifiers are positive integers assigned by the store. Wrapping each in
//! its own type prevents passing a `ClassId` where a `PersonId` is expected.
//! On the wire and in the database they are plain integers.
//!
//! # Example
//!
//! ```ignore
//! use rollbook_models::ids::{PersonId, SchoolId};
//!
//! fn who_am_i(id: PersonId) { /* ... */ }
//!
//! who_am_i(PersonId::new(1));    // OK
//! // who_am_i(SchoolId::new(1)); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to define a strongly-typed ID newtype.
///
/// This macro generates a newtype wrapper around `i64` with the trait
/// implementations needed for database binding, serialization, and ordering.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the inner integer value.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for School entities.
    SchoolId
);

define_id!(
    /// Strongly-typed ID for Person entities.
    PersonId
);

define_id!(
    /// Strongly-typed ID for Class entities.
    ClassId
);
