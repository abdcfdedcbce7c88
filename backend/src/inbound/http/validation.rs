//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CourseId, CourseValidationError, Error, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidField,
    InvalidPayload,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::InvalidPayload => "invalid_payload",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) const ID: FieldName = FieldName::new("id");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");

pub(crate) fn missing_field_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::InvalidField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Body or query string could not be deserialised into the endpoint schema.
pub(crate) fn invalid_payload_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("invalid request payload: {reason}"))
        .with_details(json!({ "code": ErrorCode::InvalidPayload.as_str() }))
}

/// Parse a required course id taken from the query string.
pub(crate) fn parse_course_id(value: Option<&str>) -> Result<CourseId, Error> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_field_error(ID, "Course ID is required"))?;
    raw.parse().map_err(|_| invalid_uuid_error(ID, raw))
}

pub(crate) fn map_course_validation_error(error: CourseValidationError) -> Error {
    match error {
        CourseValidationError::EmptyName => {
            missing_field_error(NAME, "Name and description are required")
        }
        CourseValidationError::EmptyDescription => {
            missing_field_error(DESCRIPTION, "Name and description are required")
        }
        CourseValidationError::InvalidId => invalid_field_error(ID, error.to_string()),
    }
}

pub(crate) fn map_user_validation_error(error: UserValidationError) -> Error {
    let message = error.to_string();
    match error {
        UserValidationError::EmptyUsername => missing_field_error(USERNAME, message),
        UserValidationError::UsernameTooLong { .. }
        | UserValidationError::UsernameInvalidCharacters => {
            invalid_field_error(USERNAME, message)
        }
        UserValidationError::InvalidEmail => invalid_field_error(EMAIL, message),
        UserValidationError::EmptyName => missing_field_error(NAME, message),
        UserValidationError::EmptyPassword => missing_field_error(PASSWORD, message),
    }
}
