//! The request/response envelope exchanged over a connection.
//!
//! Each direction carries one JSON object per line:
//!
//! ```text
//! -> {"method":"/school/create","data":{"name":"Northside"}}
//! <- {"status":true,"message":"school created","data":{"id":1,"name":"Northside"}}
//! ```
//!
//! [`RawRequest`] is the untyped envelope; the router decodes its payload into
//! a typed request exactly once. [`Response`] omits `data` on failure.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Request envelope as read from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRequest {
    pub method: String,
    #[serde(default)]
    pub data: Value,
}

impl RawRequest {
    pub fn new(method: impl Into<String>, data: Value) -> Self {
        Self {
            method: method.into(),
            data,
        }
    }

    /// Parses one framed line into a request envelope.
    ///
    /// Surrounding whitespace, including the newline delimiter, is ignored.
    ///
    /// # Errors
    ///
    /// Returns a protocol [`AppError`] if the line is empty, is not valid JSON,
    /// or is JSON that does not look like `{method, data}`.
    pub fn parse(line: &[u8]) -> Result<Self, AppError> {
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            return Err(AppError::protocol(anyhow!("empty request")));
        }

        serde_json::from_slice(trimmed).map_err(|e| match e.classify() {
            Category::Data => AppError::protocol(anyhow!("invalid request envelope: {e}")),
            Category::Io | Category::Syntax | Category::Eof => {
                AppError::protocol(anyhow!("invalid json: {e}"))
            }
        })
    }

    /// The method name exactly as sent; no normalization is applied.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Consumes the envelope and returns its payload.
    ///
    /// A missing or `null` payload is treated as an empty object.
    pub fn into_payload(self) -> Value {
        match self.data {
            Value::Null => Value::Object(Map::new()),
            other => other,
        }
    }

    /// Serializes the envelope as a newline-terminated frame.
    pub fn to_frame(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut frame = serde_json::to_vec(self)?;
        frame.push(b'\n');
        Ok(frame)
    }
}

/// Response envelope written back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    /// Builds a successful response carrying `data`.
    pub fn success<T>(message: impl Into<String>, data: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize,
    {
        Ok(Self {
            status: true,
            message: message.into(),
            data: Some(serde_json::to_value(data)?),
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
        }
    }

    /// Serializes the response as a newline-terminated frame.
    pub fn to_frame(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut frame = serde_json::to_vec(self)?;
        frame.push(b'\n');
        Ok(frame)
    }

    /// Parses a response frame, as a client does.
    pub fn parse(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line.trim_ascii())
    }
}

impl From<AppError> for Response {
    fn from(err: AppError) -> Self {
        Response::failure(err.client_message())
    }
}
