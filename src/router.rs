//! Request router.
//!
//! Turns one framed line into one [`Response`]. The envelope is parsed, the
//! payload decoded into a typed [`Request`] once, and the request forwarded
//! to the matching [`EnrollmentEngine`] operation. Every failure, whatever
//! its layer, becomes a `status: false` response; the caller never sees an
//! error from [`Router::handle_frame`].

use rollbook_core::{AppError, ErrorKind, RawRequest, Response, validate_payload};
use rollbook_models::{Method, PersonSummary, Request};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, error, warn};

use crate::engine::{EnrollmentEngine, EnrollmentError};
use crate::metrics;

#[derive(Clone, Debug)]
pub struct Router {
    engine: EnrollmentEngine,
}

impl Router {
    pub fn new(engine: EnrollmentEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &EnrollmentEngine {
        &self.engine
    }

    pub async fn handle_frame(&self, frame: &[u8]) -> Response {
        let started = Instant::now();

        let request = match RawRequest::parse(frame).and_then(Request::decode) {
            Ok(request) => request,
            Err(err) => {
                report_failure(None, &err);
                metrics::track_request("unknown", "error", started.elapsed());
                return Response::from(err);
            }
        };

        let method = request.method();
        debug!(method = %method, "Handling request");

        let response = match self.route(request).await {
            Ok(response) => {
                metrics::track_request(method.as_str(), "ok", started.elapsed());
                response
            }
            Err(err) => {
                report_failure(Some(method), &err);
                metrics::track_request(method.as_str(), "error", started.elapsed());
                Response::from(err)
            }
        };

        debug!(
            method = %method,
            status = response.status,
            latency_ms = %started.elapsed().as_millis(),
            "Request completed"
        );
        response
    }

    pub async fn route(&self, request: Request) -> Result<Response, AppError> {
        let method = request.method();
        match request {
            Request::CreateSchool(dto) => {
                validate_payload(&dto)?;
                let school = self
                    .engine
                    .create_school(&dto.name)
                    .await
                    .map_err(EnrollmentError::into_app_error)?;
                respond(method, &school)
            }
            Request::CreatePerson(dto) => {
                let person = self
                    .engine
                    .create_person(&dto.name)
                    .await
                    .map_err(EnrollmentError::into_app_error)?;
                respond(method, &PersonSummary::from(&person))
            }
            Request::CreateClass(dto) => {
                let class = self
                    .engine
                    .create_class(&dto.name, dto.school_id, dto.teacher.id)
                    .await
                    .map_err(EnrollmentError::into_app_error)?;
                respond(method, &class)
            }
            Request::AddStudentToClass(dto) => {
                let person = self
                    .engine
                    .add_student_to_class(dto.student_id, dto.class_id)
                    .await
                    .map_err(EnrollmentError::into_app_error)?;
                respond(method, &person)
            }
            Request::WhoAmI(dto) => {
                let person = self
                    .engine
                    .who_am_i(dto.id)
                    .await
                    .map_err(EnrollmentError::into_app_error)?;
                respond(method, &person)
            }
        }
    }
}

fn respond<T>(method: Method, data: &T) -> Result<Response, AppError>
where
    T: Serialize,
{
    Response::success(method.success_message(), data).map_err(AppError::protocol)
}

fn report_failure(method: Option<Method>, err: &AppError) {
    let method = method.map_or("unknown", |m| m.as_str());
    metrics::track_rejection(err.kind.as_str());
    match err.kind {
        ErrorKind::Store => error!(method, error = %err, "Request failed"),
        ErrorKind::Protocol | ErrorKind::Validation => {
            warn!(method, error = %err, "Request rejected")
        }
    }
}
