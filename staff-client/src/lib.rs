//! StaffEasy Client - session and HTTP access for the StaffEasy server
//!
//! - [`SessionManager`]: login / logout / restore, persisted to `session_user.json`
//! - [`NetworkHttpClient`]: reqwest transport
//! - [`OneshotHttpClient`]: in-process transport over an axum `Router`
//!   (feature `in-process`)
//! - [`api`]: typed calls unwrapping the `ApiResponse` envelope

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "in-process")]
pub mod oneshot;
pub mod session;

pub use auth::Authenticator;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use oneshot::OneshotHttpClient;
pub use session::{SessionManager, SessionState, SessionStorage, StoredSession};

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, Identity, LoginResponse};
