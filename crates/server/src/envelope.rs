//! Uniform response wrapper used by every endpoint.
use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{ timestamp, status, message, data?, path?, errors? }`; absent members are omitted.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            message: message.into(),
            data,
            path: None,
            errors: None,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl ApiEnvelope<()> {
    /// Success without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message, None)
    }

    pub fn error(status: StatusCode, message: impl Into<String>, errors: Option<BTreeMap<String, String>>) -> Self {
        let mut env = Self::new(status, message, None);
        env.errors = errors;
        env
    }
}

impl<T: Serialize> IntoResponse for ApiEnvelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_members_are_omitted() {
        let json = serde_json::to_value(ApiEnvelope::message("Category deleted successfully")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.get("status").and_then(|v| v.as_u64()), Some(200));
        assert!(obj.contains_key("timestamp"));
        assert!(!obj.contains_key("data"));
        assert!(!obj.contains_key("path"));
        assert!(!obj.contains_key("errors"));
    }

    #[test]
    fn error_carries_path_and_field_map() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), "too short".to_string());
        let env = ApiEnvelope::error(StatusCode::BAD_REQUEST, "Validation failed", Some(errors)).with_path("/api/v1/categories");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["path"], "/api/v1/categories");
        assert_eq!(json["errors"]["name"], "too short");
        assert!(json.get("data").is_none());
    }
}
