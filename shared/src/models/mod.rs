//! Data models
//!
//! Shared between staff-server and staff-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod activity;
pub mod employee;
pub mod role;
pub mod team;
pub mod time_off;
pub mod user;

// Re-exports
pub use activity::*;
pub use employee::*;
pub use role::*;
pub use team::*;
pub use time_off::*;
pub use user::*;
