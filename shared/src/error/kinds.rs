//! Domain error kinds
//!
//! Core operations return these narrow enums. Each converts into [`AppError`]
//! when it crosses the HTTP boundary.

use super::codes::ErrorCode;
use super::types::AppError;
use thiserror::Error;

/// Login failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No account with this email
    #[error("No account found for this email")]
    NotFound,
    /// Password does not match
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Input validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Start date cannot be in the past")]
    StartInPast,
    #[error("End date cannot be before start date")]
    EndBeforeStart,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Passwords don't match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Directory store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("{0} not found")]
    NotFound(String),
    /// 请求已处理，但员工记录未更新（不回滚）
    #[error("Request {request_id} was processed but employee {employee_id} was not updated: {reason}")]
    PartialFailure {
        request_id: i64,
        employee_id: i64,
        reason: String,
    },
}

/// Authorization denial
///
/// `redirect` is the view the caller should land on instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("Access denied: {reason}")]
    Denied { reason: String, redirect: String },
}

impl AuthzError {
    pub fn reason(&self) -> &str {
        match self {
            Self::Denied { reason, .. } => reason,
        }
    }

    pub fn redirect(&self) -> &str {
        match self {
            Self::Denied { redirect, .. } => redirect,
        }
    }
}

/// Time-off lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOffError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ========== AppError conversions ==========

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotFound => AppError::new(ErrorCode::AccountNotFound),
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields(fields) => AppError::required_fields(&fields),
            ValidationError::StartInPast => AppError::new(ErrorCode::TimeOffStartInPast),
            ValidationError::EndBeforeStart => AppError::new(ErrorCode::TimeOffEndBeforeStart),
            ValidationError::InvalidDate(value) => {
                AppError::new(ErrorCode::TimeOffInvalidDate).with_detail("value", value)
            }
            ValidationError::PasswordMismatch => AppError::new(ErrorCode::PasswordMismatch),
            ValidationError::PasswordTooShort { min } => AppError::with_message(
                ErrorCode::PasswordTooShort,
                format!("Password must be at least {} characters", min),
            )
            .with_detail("min_length", min),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Directory store unavailable");
                AppError::new(ErrorCode::StoreUnavailable)
            }
            StoreError::NotFound(resource) => AppError::not_found(resource),
            StoreError::PartialFailure {
                request_id,
                employee_id,
                reason,
            } => AppError::new(ErrorCode::TimeOffPartialFailure)
                .with_detail("request_id", request_id)
                .with_detail("employee_id", employee_id)
                .with_detail("reason", reason),
        }
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Denied { reason, redirect } => {
                AppError::permission_denied(reason.clone())
                    .with_detail("reason", reason)
                    .with_detail("redirect", redirect)
            }
        }
    }
}

impl From<TimeOffError> for AppError {
    fn from(err: TimeOffError) -> Self {
        match err {
            TimeOffError::Validation(ValidationError::MissingFields(fields)) => {
                AppError::new(ErrorCode::TimeOffMissingFields).with_detail("fields", fields)
            }
            TimeOffError::Validation(e) => e.into(),
            TimeOffError::Store(e) => e.into(),
        }
    }
}
