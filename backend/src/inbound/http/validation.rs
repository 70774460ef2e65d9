//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers are parsed by hand rather than through typed `Path`
//! extraction so failures carry the same structured `details` payload as
//! every other validation error.

use std::str::FromStr;

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, IdValidationError, MenuValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    EmptyName,
    NameTooLong,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::NameTooLong => "name_too_long",
            ErrorCode::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const MENU_ID: FieldName = FieldName::new("menu_id");
pub(crate) const FAVORITE_ID: FieldName = FieldName::new("favorite_id");
pub(crate) const MENU_NAME: FieldName = FieldName::new("menu_name");

pub(crate) fn invalid_id_error(field: FieldName, value: &str, cause: &IdValidationError) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a positive integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidId.as_str(),
        "reason": cause.to_string(),
    }))
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    value
        .parse::<T>()
        .map_err(|cause| invalid_id_error(field, value, &cause))
}

/// Validate an identifier supplied as a JSON number.
pub(crate) fn check_id<T, F>(raw: i64, field: FieldName, build: F) -> Result<T, Error>
where
    F: FnOnce(i64) -> Result<T, IdValidationError>,
{
    build(raw).map_err(|cause| invalid_id_error(field, &raw.to_string(), &cause))
}

pub(crate) fn menu_name_error(err: &MenuValidationError) -> Error {
    let code = match err {
        MenuValidationError::EmptyName => ErrorCode::EmptyName,
        MenuValidationError::NameTooLong { .. } => ErrorCode::NameTooLong,
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": MENU_NAME.as_str(),
        "code": code.as_str(),
    }))
}

/// JSON extractor configuration reporting malformed bodies as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request("request body is not valid JSON for this endpoint")
            .with_details(json!({
                "code": ErrorCode::InvalidJson.as_str(),
                "reason": err.to_string(),
            }))
            .into()
    })
}
