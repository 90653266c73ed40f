//! User Model

use serde::{Deserialize, Serialize};

use super::Role;
use crate::client::Identity;

/// Login account (users 表)
///
/// `password_hash` is an Argon2 PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Stored role label, see [`User::role`]
    pub role: String,
    pub created_at: i64,
}

impl User {
    /// Canonical role (legacy `user` label maps to employee)
    pub fn role(&self) -> Role {
        Role::from_label(&self.role)
    }

    /// Sanitized identity for sessions and API responses
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role(),
        }
    }
}

/// Create user payload (hash already computed)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}
