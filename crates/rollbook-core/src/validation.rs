use anyhow::anyhow;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}

/// Runs the `validator` rules of a decoded payload.
///
/// # Errors
///
/// Returns a validation [`AppError`] listing every failed rule.
pub fn validate_payload<T>(payload: &T) -> Result<(), AppError>
where
    T: Validate,
{
    payload
        .validate()
        .map_err(|errors| AppError::validation(anyhow!("{}", format_errors(&errors))))
}
