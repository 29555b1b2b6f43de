//! Parsing helpers for flat key-value form fields and the failure payload returned by form
//! actions.
//!
//! Form structs keep every field as `Option<String>` so that a submission with missing or
//! malformed fields still deserializes and can be echoed back to the user.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{Error, alert::Alert, database_id::DatabaseId};

/// Exposes the raw submitted values of a form so they can be echoed back on failure.
pub trait FormFields {
    /// The field labels paired with the raw values that were submitted.
    fn field_values(&self) -> Vec<(&'static str, Option<&str>)>;
}

/// The structured failure of a form action.
///
/// Holds the status to respond with, a human-readable message and the original input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFailure<F> {
    pub status: StatusCode,
    pub message: String,
    pub fields: F,
}

impl<F> FormFailure<F> {
    /// A validation failure: the input was rejected before the database was touched.
    pub fn invalid(error: Error, fields: F) -> Self {
        Self {
            status: error.status_code(),
            message: error.to_string(),
            fields,
        }
    }

    /// A mutation failure: the database rejected the insert or delete.
    pub fn store(message: &str, fields: F) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_owned(),
            fields,
        }
    }
}

impl<F: FormFields> IntoResponse for FormFailure<F> {
    fn into_response(self) -> Response {
        let submitted: Vec<(&'static str, String)> = self
            .fields
            .field_values()
            .into_iter()
            .filter_map(|(label, value)| {
                value
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (label, value.to_owned()))
            })
            .collect();

        let alert = Alert {
            message: self.message,
            submitted,
        };

        (self.status, alert.into_html()).into_response()
    }
}

/// Get the trimmed value of a required field.
///
/// # Errors
/// Returns [Error::MissingField] if `value` is absent or blank.
pub fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, Error> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingField(field))
}

/// Get the trimmed value of an optional field, treating blank values as absent.
pub fn optional(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse a finite number, e.g. a transaction amount.
///
/// # Errors
/// Returns [Error::InvalidNumber] if `value` is not a number, or is infinite or NaN.
pub fn parse_number(value: &str, field: &'static str) -> Result<f64, Error> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            field,
            value: value.to_owned(),
        })
}

/// Parse a reference to a database row.
///
/// # Errors
/// Returns [Error::InvalidId] if `value` is not an integer.
pub fn parse_id(value: &str, field: &'static str) -> Result<DatabaseId, Error> {
    value.parse::<DatabaseId>().map_err(|_| Error::InvalidId {
        field,
        value: value.to_owned(),
    })
}
