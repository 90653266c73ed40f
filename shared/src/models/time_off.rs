//! Time-off Model

use serde::{Deserialize, Serialize};

/// Outcome recorded on a request row
///
/// `timeoff_requested` alone cannot tell withdrawn from rejected, so the row
/// carries this explicit status as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TimeOffStatus {
    Pending,
    Withdrawn,
    Approved,
    Rejected,
}

impl TimeOffStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Withdrawn => "withdrawn",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Time-off request row (time_off_request 表)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TimeOffRequest {
    pub id: i64,
    pub employee_id: i64,
    /// Composed reason, embeds both dates
    pub reason: String,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    /// true while pending
    pub timeoff_requested: bool,
    pub status: TimeOffStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Pending request joined with the employee name (manager queue)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PendingTimeOff {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: i64,
}

/// Submit payload
///
/// All fields are optional on the wire so missing ones surface as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeOffSubmit {
    pub reason: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Adjudication decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status recorded on the request row
    pub fn status(&self) -> TimeOffStatus {
        match self {
            Decision::Approve => TimeOffStatus::Approved,
            Decision::Reject => TimeOffStatus::Rejected,
        }
    }
}

/// Adjudication payload (request id comes from the path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjudicateRequest {
    pub employee_id: i64,
}

/// Derived per-employee lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    NoRequest,
    Pending,
    Approved,
    Rejected,
}

/// Current state plus the latest request row, for `GET /api/time-off/mine`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffOverview {
    pub employee_id: i64,
    pub state: RequestState,
    pub latest: Option<TimeOffRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_maps_to_status() {
        assert_eq!(Decision::Approve.status(), TimeOffStatus::Approved);
        assert_eq!(Decision::Reject.status(), TimeOffStatus::Rejected);
    }

    #[test]
    fn wire_labels() {
        assert_eq!(
            serde_json::to_string(&RequestState::NoRequest).unwrap(),
            "\"no_request\""
        );
        assert_eq!(
            serde_json::to_string(&TimeOffStatus::Withdrawn).unwrap(),
            "\"withdrawn\""
        );
        let d: Decision = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(d, Decision::Reject);
    }
}
