//! Activity feed and dashboard summary

use serde::{Deserialize, Serialize};

/// Recent event shown on the dashboard (activity 表)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Activity {
    pub id: i64,
    /// employee | team | time_off
    pub kind: String,
    /// created | updated | deleted | submitted | withdrawn | approved | rejected
    pub action: String,
    /// Human-readable subject, e.g. employee or team name
    pub subject: String,
    /// Email of the acting account
    pub actor: String,
    pub created_at: i64,
}

/// Dashboard counts + recent activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub employee_count: i64,
    pub team_count: i64,
    pub pending_time_off: i64,
    /// Empty for roles that may not see the activity feed
    pub recent_activity: Vec<Activity>,
}
