//! Unified error codes for StaffEasy
//!
//! This module defines all error codes used across staff-server, staff-client and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account / registration errors
//! - 4xxx: Time-off errors
//! - 8xxx: Employee and team errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// No account exists for this email
    AccountNotFound = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Account ====================
    /// Email is already registered
    EmailAlreadyRegistered = 3001,
    /// Password confirmation does not match
    PasswordMismatch = 3002,
    /// Password too short
    PasswordTooShort = 3003,

    // ==================== 4xxx: Time-off ====================
    /// Pending time-off request not found
    TimeOffRequestNotFound = 4001,
    /// Time-off request is missing reason or dates
    TimeOffMissingFields = 4002,
    /// Time-off start date is before today
    TimeOffStartInPast = 4003,
    /// Time-off end date is before the start date
    TimeOffEndBeforeStart = 4004,
    /// Time-off date could not be parsed
    TimeOffInvalidDate = 4005,
    /// Request was adjudicated but the employee record was not updated
    TimeOffPartialFailure = 4006,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee email already exists
    EmployeeEmailExists = 8002,
    /// No employee record is linked to the current account
    EmployeeNotLinked = 8003,
    /// Team not found
    TeamNotFound = 8101,
    /// Team name already exists
    TeamNameExists = 8102,
    /// Team must have at least one member
    TeamEmpty = 8103,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Directory store unavailable
    StoreUnavailable = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountNotFound => "No account found for this email",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Account
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordMismatch => "Passwords don't match",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",

            // Time-off
            ErrorCode::TimeOffRequestNotFound => "Pending time-off request not found",
            ErrorCode::TimeOffMissingFields => "Reason, start date and end date are required",
            ErrorCode::TimeOffStartInPast => "Start date cannot be in the past",
            ErrorCode::TimeOffEndBeforeStart => "End date cannot be before start date",
            ErrorCode::TimeOffInvalidDate => "Date must be formatted as YYYY-MM-DD",
            ErrorCode::TimeOffPartialFailure => {
                "Request was processed but the employee record was not updated"
            }

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::EmployeeNotLinked => "No employee record is linked to this account",
            ErrorCode::TeamNotFound => "Team not found",
            ErrorCode::TeamNameExists => "Team name already exists",
            ErrorCode::TeamEmpty => "Team must have at least one member",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StoreUnavailable => "Directory store is unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountNotFound),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Account
            3001 => Ok(ErrorCode::EmailAlreadyRegistered),
            3002 => Ok(ErrorCode::PasswordMismatch),
            3003 => Ok(ErrorCode::PasswordTooShort),

            // Time-off
            4001 => Ok(ErrorCode::TimeOffRequestNotFound),
            4002 => Ok(ErrorCode::TimeOffMissingFields),
            4003 => Ok(ErrorCode::TimeOffStartInPast),
            4004 => Ok(ErrorCode::TimeOffEndBeforeStart),
            4005 => Ok(ErrorCode::TimeOffInvalidDate),
            4006 => Ok(ErrorCode::TimeOffPartialFailure),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            8003 => Ok(ErrorCode::EmployeeNotLinked),
            8101 => Ok(ErrorCode::TeamNotFound),
            8102 => Ok(ErrorCode::TeamNameExists),
            8103 => Ok(ErrorCode::TeamEmpty),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9006 => Ok(ErrorCode::StoreUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::RequiredField.code(), 7);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::TokenExpired.code(), 1003);
        assert_eq!(ErrorCode::AccountNotFound.code(), 1005);

        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);

        assert_eq!(ErrorCode::EmailAlreadyRegistered.code(), 3001);
        assert_eq!(ErrorCode::PasswordMismatch.code(), 3002);
        assert_eq!(ErrorCode::PasswordTooShort.code(), 3003);

        assert_eq!(ErrorCode::TimeOffRequestNotFound.code(), 4001);
        assert_eq!(ErrorCode::TimeOffMissingFields.code(), 4002);
        assert_eq!(ErrorCode::TimeOffStartInPast.code(), 4003);
        assert_eq!(ErrorCode::TimeOffEndBeforeStart.code(), 4004);
        assert_eq!(ErrorCode::TimeOffPartialFailure.code(), 4006);

        assert_eq!(ErrorCode::EmployeeNotFound.code(), 8001);
        assert_eq!(ErrorCode::TeamNotFound.code(), 8101);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::StoreUnavailable.code(), 9006);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::TimeOffStartInPast.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1002), Ok(ErrorCode::InvalidCredentials));
        assert_eq!(ErrorCode::try_from(1005), Ok(ErrorCode::AccountNotFound));
        assert_eq!(ErrorCode::try_from(3003), Ok(ErrorCode::PasswordTooShort));
        assert_eq!(ErrorCode::try_from(4006), Ok(ErrorCode::TimeOffPartialFailure));
        assert_eq!(ErrorCode::try_from(8103), Ok(ErrorCode::TeamEmpty));
        assert_eq!(ErrorCode::try_from(9006), Ok(ErrorCode::StoreUnavailable));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(2003), Err(InvalidErrorCode(2003)));
        assert_eq!(ErrorCode::try_from(5001), Err(InvalidErrorCode(5001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::TimeOffStartInPast).unwrap();
        assert_eq!(json, "4003");

        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidCredentials);

        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }
}
