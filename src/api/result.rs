//! Handler results
//!
//! Controllers describe the response they want as an [`ActionResult`] value
//! and never touch the response stream themselves. The dispatch layer renders
//! the value once with [`ActionResult::write_response`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Free-form JSON object payload
pub type JsonDocument = Map<String, Value>;

/// A rendered-on-demand response
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// Serialized payload with an `application/json` content type
    Json { status: StatusCode, body: Value },
    /// Bare status code without a body
    Status(StatusCode),
}

impl ActionResult {
    /// 200 with `payload` as JSON body
    pub fn json<T>(payload: &T) -> Result<Self, DomainError>
    where
        T: Serialize + ?Sized,
    {
        Self::json_with_status(StatusCode::OK, payload)
    }

    /// 201 with `payload` as JSON body
    pub fn created<T>(payload: &T) -> Result<Self, DomainError>
    where
        T: Serialize + ?Sized,
    {
        Self::json_with_status(StatusCode::CREATED, payload)
    }

    pub fn json_with_status<T>(status: StatusCode, payload: &T) -> Result<Self, DomainError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload).map_err(|e| {
            DomainError::internal(format!("Failed to serialize response body: {}", e))
        })?;

        Ok(Self::Json { status, body })
    }

    pub fn status(status: StatusCode) -> Self {
        Self::Status(status)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Json { status, .. } | Self::Status(status) => *status,
        }
    }

    /// Render onto an HTTP response
    pub fn write_response(self) -> Response {
        match self {
            Self::Json { status, body } => (status, Json(body)).into_response(),
            Self::Status(status) => status.into_response(),
        }
    }
}

impl IntoResponse for ActionResult {
    fn into_response(self) -> Response {
        self.write_response()
    }
}
