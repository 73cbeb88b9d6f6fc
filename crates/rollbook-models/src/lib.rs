//! # Rollbook Models
//!
//! Domain models and DTOs for the Rollbook service.
//!
//! This crate provides the data structures shared by the server and the
//! client: database rows, wire payloads, and the method table.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed integer ids
//! - [`schools`]: School models
//! - [`persons`]: Person models and the [`Role`] state
//! - [`classes`]: Class models
//! - [`requests`]: The [`Method`] table and the typed [`Request`]
//!
//! # Example
//!
//! ```ignore
//! use rollbook_core::RawRequest;
//! use rollbook_models::{Method, Request};
//!
//! let raw = RawRequest::parse(br#"{"method":"/who/am/i","data":{"id":1}}"#)?;
//! let request = Request::decode(raw)?;
//! assert_eq!(request.method(), Method::WhoAmI);
//! ```

pub mod classes;
pub mod ids;
pub mod persons;
pub mod requests;
pub mod schools;

// Re-export commonly used types at crate root for convenience
pub use classes::{AddStudentToClassDto, Class, ClassView, CreateClassDto, TeacherRef};
pub use ids::{ClassId, PersonId, SchoolId};
pub use persons::{
    CreatePersonDto, Person, PersonSummary, PersonWithClasses, Role, UnknownRole, WhoAmIDto,
};
pub use requests::{Method, Request};
pub use schools::{CreateSchoolDto, School};
