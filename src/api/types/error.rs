//! JSON error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error categories reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ConflictError,
    StoreError,
    TransportError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::StoreError => write!(f, "store_error"),
            Self::TransportError => write!(f, "transport_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    fn with_optional_code(self, code: Option<String>) -> Self {
        match code {
            Some(code) => self.with_code(code),
            None => self,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    /// The store rejected the operation
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::StoreError, message)
    }

    /// The store could not be reached
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::TransportError,
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message, field } => {
                let err = Self::bad_request(message);
                match field {
                    Some(field) => err.with_param(field),
                    None => err,
                }
            }
            DomainError::Conflict { message, code } => {
                Self::conflict(message).with_optional_code(code)
            }
            DomainError::Storage { message, code } => {
                Self::store(message).with_optional_code(code)
            }
            DomainError::Transport { message } => Self::unavailable(message),
            DomainError::Configuration { message } => {
                Self::internal(message).with_code("configuration")
            }
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Name is required");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(err.response.error.message, "Name is required");
    }

    #[test]
    fn test_api_error_with_param() {
        let err = ApiError::bad_request("Invalid value")
            .with_param("usageLimit")
            .with_code("invalid_type");

        assert_eq!(err.response.error.param, Some("usageLimit".to_string()));
        assert_eq!(err.response.error.code, Some("invalid_type".to_string()));
    }

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::validation("v"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("n"), StatusCode::NOT_FOUND),
            (DomainError::conflict("c"), StatusCode::CONFLICT),
            (DomainError::storage("s"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::transport("t"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::configuration("cfg"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("i"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_store_message_passes_through() {
        let api_err: ApiError = DomainError::storage("relation \"api_keys\" does not exist").into();

        assert_eq!(api_err.response.error.error_type, ApiErrorType::StoreError);
        assert_eq!(
            api_err.response.error.message,
            "relation \"api_keys\" does not exist"
        );
    }

    #[test]
    fn test_validation_field_becomes_param() {
        let api_err: ApiError = DomainError::invalid_field("name", "Name is required").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.response.error.param.as_deref(), Some("name"));

        let api_err: ApiError = DomainError::validation("No valid updates provided").into();
        assert!(api_err.response.error.param.is_none());
    }

    #[test]
    fn test_store_code_passes_through() {
        let api_err: ApiError = DomainError::storage("value too long")
            .with_code("22001")
            .into();
        let json = serde_json::to_value(&api_err.response).unwrap();

        assert_eq!(json["error"]["type"], "store_error");
        assert_eq!(json["error"]["message"], "value too long");
        assert_eq!(json["error"]["code"], "22001");

        let api_err: ApiError = DomainError::conflict("duplicate key")
            .with_code("23505")
            .into();
        assert_eq!(api_err.status, StatusCode::CONFLICT);
        assert_eq!(api_err.response.error.code.as_deref(), Some("23505"));
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unavailable("connection refused");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "transport_error");
        assert_eq!(json["error"]["message"], "connection refused");
        assert!(json["error"].get("param").is_none());
    }
}
