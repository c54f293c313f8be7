//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::portal::PortalError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wallet or contract error
    #[error(transparent)]
    Portal(#[from] PortalError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Portal(e) => match e {
                PortalError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
                PortalError::WriteInFlight => (StatusCode::CONFLICT, "WRITE_IN_FLIGHT"),
                PortalError::WalletAbsent => (StatusCode::SERVICE_UNAVAILABLE, "WALLET_ABSENT"),
                PortalError::NotConnected => (StatusCode::UNAUTHORIZED, "NOT_CONNECTED"),
                PortalError::NoAccounts => (StatusCode::UNAUTHORIZED, "NO_ACCOUNTS"),
                PortalError::Reverted(_) => (StatusCode::UNPROCESSABLE_ENTITY, "REVERTED"),
                PortalError::Rpc(_) => (StatusCode::BAD_GATEWAY, "RPC_ERROR"),
                PortalError::Confirmation(_) => (StatusCode::BAD_GATEWAY, "CONFIRMATION_ERROR"),
                PortalError::Decode(_) | PortalError::Timestamp(_) => {
                    (StatusCode::BAD_GATEWAY, "DECODE_ERROR")
                }
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_error_status() {
        let cases = [
            (PortalError::WriteInFlight, StatusCode::CONFLICT),
            (PortalError::WalletAbsent, StatusCode::SERVICE_UNAVAILABLE),
            (PortalError::NotConnected, StatusCode::UNAUTHORIZED),
            (
                PortalError::Reverted("0xabc".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (PortalError::Rpc("down".to_string()), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_validation_status() {
        let response = ApiError::Validation("bad note".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
