// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User already exists")]
    Conflict,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access token required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::Conflict => "USER_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Unauthorized => "AUTH_002",
            AppError::Forbidden => "AUTH_003",
            AppError::NotFound(_) => "NF_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use.
    ///
    /// Validation and conflict messages are already client-actionable and
    /// carry no internal detail, so they pass through. Credential errors
    /// stay deliberately uniform: the caller never learns which of
    /// identifier/password was wrong.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict => "User already exists".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized => "Access token required".to_string(),
            AppError::Forbidden => "Invalid or expired token".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::Io(_) => "Internal server error".to_string(),
            AppError::Json(_) => "Invalid request format".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        // Create a JSON response with error details
        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        let validation_error = AppError::Validation("Password too short".to_string());
        assert_eq!(
            validation_error.to_string(),
            "Validation error: Password too short"
        );

        let io_error = AppError::Io(IoError::new(ErrorKind::NotFound, "File not found"));
        assert!(io_error.to_string().contains("IO error"));

        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::Validation("bad input".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::NotFound("user".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        assert_eq!(
            AppError::Json(json_err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(
            AppError::Validation("test".to_string()).error_code(),
            "VAL_001"
        );
        assert_eq!(AppError::Conflict.error_code(), "USER_001");
        assert_eq!(AppError::InvalidCredentials.error_code(), "AUTH_001");
        assert_eq!(AppError::Unauthorized.error_code(), "AUTH_002");
        assert_eq!(AppError::Forbidden.error_code(), "AUTH_003");
        assert_eq!(AppError::Internal("test".to_string()).error_code(), "INT_001");
    }

    #[test]
    fn test_credential_errors_stay_uniform() {
        // Unknown identifier and wrong password both surface as the same
        // variant, so the sanitized message can never leak which one failed.
        assert_eq!(
            AppError::InvalidCredentials.sanitized_message(),
            "Invalid credentials"
        );
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            AppError::InvalidCredentials.sanitized_message()
        );
    }

    #[test]
    fn test_app_error_into_response() {
        let error = AppError::NotFound("user".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Conflict.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_from_impls() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "Permission denied");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));

        let string_err = "String error".to_string();
        let app_err: AppError = string_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response_headers = response.headers();
        assert!(response_headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));
    }
}
