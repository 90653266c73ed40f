//! Unified error system for StaffEasy
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//! - Domain kinds ([`AuthError`], [`ValidationError`], [`StoreError`],
//!   [`AuthzError`], [`TimeOffError`]) returned by core operations
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Time-off errors
//! - 8xxx: Employee and team errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse, ValidationError};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! // Domain errors convert into AppError
//! let err: AppError = ValidationError::StartInPast.into();
//! assert_eq!(err.code, ErrorCode::TimeOffStartInPast);
//!
//! // Convert to API response
//! let response = ApiResponse::<()>::error(&err);
//! ```

mod category;
mod codes;
mod http;
mod kinds;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use kinds::{AuthError, AuthzError, StoreError, TimeOffError, ValidationError};
pub use types::{ApiResponse, AppError, AppResult};
