//! Client error types

use http::StatusCode;
use shared::error::{AppError, AuthError, ErrorCode};
use shared::ApiResponse;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login rejected by the server
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Server returned a structured error
    #[error("API error {}: {}", .0.code, .0.message)]
    Api(AppError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// 从失败响应构造错误
    ///
    /// 优先解析服务端的 [`ApiResponse`] 错误体，失败时按状态码降级。
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        if let Ok(resp) = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body)
            && resp.code.is_some_and(|c| c != 0)
        {
            let err = resp.to_error();
            return match err.code {
                ErrorCode::InvalidCredentials => ClientError::Auth(AuthError::InvalidCredentials),
                ErrorCode::AccountNotFound => ClientError::Auth(AuthError::NotFound),
                _ => ClientError::Api(err),
            };
        }

        let text = String::from_utf8_lossy(body).to_string();
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(text),
        }
    }

    /// Error code carried by a structured API error
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api(err) => Some(err.code),
            ClientError::Auth(AuthError::InvalidCredentials) => Some(ErrorCode::InvalidCredentials),
            ClientError::Auth(AuthError::NotFound) => Some(ErrorCode::AccountNotFound),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
