//! Error types for the bridge API layer.
//!
//! [`ApiError`] unifies the few failure modes that surface as HTTP error
//! statuses. Most operation failures are deliberately *not* here: they are
//! caught at the boundary and returned as structured JSON payloads with an
//! HTTP 200, matching the contract the game page expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::tools::ToolError;

/// Errors that surface as HTTP error statuses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required request field was absent or not a string.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<ToolError> for ApiError {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::UnknownTool(name) => Self::NotFound(format!("unknown tool: {name}")),
            ToolError::MissingArgument(name) => Self::MissingField(name),
            ToolError::Serialization(e) => Self::Serialization(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_maps_to_bad_request() {
        let response = ApiError::MissingField("destination").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_tool_maps_to_not_found() {
        let api: ApiError = ToolError::UnknownTool(String::from("nope")).into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
