//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! These types are shared between staff-server and staff-client.

use serde::{Deserialize, Serialize};

use crate::models::Role;

// Re-export ApiResponse from the error module
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
///
/// `email` is matched exactly (case-sensitive).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
    /// Token expiry (unix seconds)
    pub expires_at: i64,
}

/// Sanitized identity of an authenticated account
///
/// Carries no password field by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
}

/// Registration request
///
/// Fields default to empty so missing ones are reported together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Policy probe result for `GET /api/access/{resource}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDecision {
    pub resource: String,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
