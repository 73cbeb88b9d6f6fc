//! Application error type shared by every layer that answers a request.
//!
//! Every failure reported to a client falls into one of three categories
//! ([`ErrorKind`]): a protocol problem with the frame or payload, a domain
//! rule that rejected the request, or a storage backend failure. The
//! underlying cause is carried as an [`anyhow::Error`].

use anyhow::Error;
use std::fmt;

/// Category of a request failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed JSON, unknown method, or a payload of the wrong shape.
    Protocol,
    /// A domain rule rejected the request (not found, role conflict, ...).
    Validation,
    /// The storage backend failed.
    Store,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Validation => "validation",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn protocol<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Protocol, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn store<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Store, err)
    }

    /// Message reported to the client.
    ///
    /// Storage failures are reported generically; their cause only reaches
    /// the logs.
    pub fn client_message(&self) -> String {
        match self.kind {
            ErrorKind::Store => "storage error".to_string(),
            ErrorKind::Protocol | ErrorKind::Validation => self.error.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {:#}", self.kind, self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::store(err)
    }
}
