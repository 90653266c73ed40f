//! Shared types for StaffEasy
//!
//! Common types used by staff-server and staff-client: error codes and
//! response envelope, domain models, and API DTOs.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
