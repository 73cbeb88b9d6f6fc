//! # Rollbook Core
//!
//! Core types, errors, and utilities for the Rollbook service.
//!
//! This crate provides foundational types used by the server and the client:
//!
//! - [`errors`]: Application error type and its taxonomy
//! - [`envelope`]: The newline-delimited JSON request/response envelope
//! - [`validation`]: Payload validation helpers built on `validator`
//!
//! # Example
//!
//! ```ignore
//! use rollbook_core::{AppError, RawRequest, Response};
//!
//! let request = RawRequest::parse(br#"{"method":"/who/am/i","data":{"id":1}}"#)?;
//! let response = Response::from(AppError::validation(anyhow::anyhow!("person 1 not found")));
//! ```

pub mod envelope;
pub mod errors;
pub mod validation;

// Re-export commonly used types at crate root
pub use envelope::{RawRequest, Response};
pub use errors::{AppError, ErrorKind};
pub use validation::validate_payload;
