//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
///
/// Canonical labels are `admin`, `manager` and `employee`. Older records use
/// `user` for the third role; it parses as [`Role::Employee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    /// Canonical label stored in the database and sent over the wire
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Parse a stored label, falling back to the least privileged role
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(label = %label, "Unknown role label, treating as employee");
            Role::Employee
        })
    }
}

/// Unrecognised role label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "employee" | "user" => Ok(Role::Employee),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Role::from_label(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_user_label_is_employee() {
        assert_eq!("user".parse::<Role>(), Ok(Role::Employee));
        assert_eq!("User".parse::<Role>(), Ok(Role::Employee));
        assert_eq!(Role::from_label("user").as_str(), "employee");
    }

    #[test]
    fn unknown_label_falls_back_to_employee() {
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::from_label("superuser"), Role::Employee);
    }

    #[test]
    fn serializes_canonical_label() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::Employee);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"employee\"");
    }
}
