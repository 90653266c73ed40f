//! Employee Model

use serde::{Deserialize, Serialize};

/// `time_off_status` value written when a request is approved
pub const TIME_OFF_APPROVED: &str = "approved";

/// Employee record (roster entry, independent of login accounts)
///
/// Linked to a [`super::User`] by exact email match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: f64,
    pub team: Option<String>,
    /// "approved" after an approved time-off request, otherwise null
    pub time_off_status: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
///
/// Required: name, position, department, email, salary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub salary: Option<f64>,
    pub team: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<f64>,
    pub team: Option<String>,
}
