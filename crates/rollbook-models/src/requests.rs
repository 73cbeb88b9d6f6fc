//! The fixed method table and the typed request it decodes into.
//!
//! A [`RawRequest`] is decoded exactly once: the method name selects a
//! [`Method`], and the payload is deserialized straight into that method's
//! DTO, producing one [`Request`] variant.

use anyhow::anyhow;
use rollbook_core::{AppError, RawRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use crate::classes::{AddStudentToClassDto, CreateClassDto};
use crate::persons::{CreatePersonDto, WhoAmIDto};
use crate::schools::CreateSchoolDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    CreateSchool,
    CreatePerson,
    CreateClass,
    AddStudentToClass,
    WhoAmI,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::CreateSchool,
        Method::CreatePerson,
        Method::CreateClass,
        Method::AddStudentToClass,
        Method::WhoAmI,
    ];

    /// Looks up a method by its wire name.
    ///
    /// # Errors
    ///
    /// Returns a protocol [`AppError`] for names outside the method table.
    pub fn parse(name: &str) -> Result<Self, AppError> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == name)
            .ok_or_else(|| AppError::protocol(anyhow!("unknown method: {name}")))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSchool => "/school/create",
            Self::CreatePerson => "/person/create",
            Self::CreateClass => "/class/create",
            Self::AddStudentToClass => "/class/add/student",
            Self::WhoAmI => "/who/am/i",
        }
    }

    /// Message of a successful response.
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::CreateSchool => "school created",
            Self::CreatePerson => "person created",
            Self::CreateClass => "class created",
            Self::AddStudentToClass => "student added to class",
            Self::WhoAmI => "success",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request with its payload decoded for its method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CreateSchool(CreateSchoolDto),
    CreatePerson(CreatePersonDto),
    CreateClass(CreateClassDto),
    AddStudentToClass(AddStudentToClassDto),
    WhoAmI(WhoAmIDto),
}

impl Request {
    /// Decodes the payload of a raw envelope according to its method.
    ///
    /// # Errors
    ///
    /// Returns a protocol [`AppError`] for an unknown method or a payload
    /// that does not match the method's shape.
    pub fn decode(raw: RawRequest) -> Result<Self, AppError> {
        let method = Method::parse(raw.method())?;
        let payload = raw.into_payload();

        let request = match method {
            Method::CreateSchool => Self::CreateSchool(payload_as(method, payload)?),
            Method::CreatePerson => Self::CreatePerson(payload_as(method, payload)?),
            Method::CreateClass => Self::CreateClass(payload_as(method, payload)?),
            Method::AddStudentToClass => Self::AddStudentToClass(payload_as(method, payload)?),
            Method::WhoAmI => Self::WhoAmI(payload_as(method, payload)?),
        };
        Ok(request)
    }

    pub fn method(&self) -> Method {
        match self {
            Self::CreateSchool(_) => Method::CreateSchool,
            Self::CreatePerson(_) => Method::CreatePerson,
            Self::CreateClass(_) => Method::CreateClass,
            Self::AddStudentToClass(_) => Method::AddStudentToClass,
            Self::WhoAmI(_) => Method::WhoAmI,
        }
    }

    /// Encodes the request into its wire envelope.
    pub fn to_raw(&self) -> Result<RawRequest, serde_json::Error> {
        let data = match self {
            Self::CreateSchool(dto) => to_payload(dto)?,
            Self::CreatePerson(dto) => to_payload(dto)?,
            Self::CreateClass(dto) => to_payload(dto)?,
            Self::AddStudentToClass(dto) => to_payload(dto)?,
            Self::WhoAmI(dto) => to_payload(dto)?,
        };
        Ok(RawRequest::new(self.method().as_str(), data))
    }
}

fn payload_as<T>(method: Method, payload: Value) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    // Derived struct visitors also accept arrays positionally.
    if !payload.is_object() {
        return Err(AppError::protocol(anyhow!(
            "invalid payload for {method}: expected an object"
        )));
    }
    serde_json::from_value(payload)
        .map_err(|e| AppError::protocol(anyhow!("invalid payload for {method}: {e}")))
}

fn to_payload<T>(dto: &T) -> Result<Value, serde_json::Error>
where
    T: Serialize,
{
    serde_json::to_value(dto)
}
