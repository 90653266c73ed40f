//! 请假生命周期
//!
//! ```text
//! NoRequest ──submit──▶ Pending ──approve──▶ Approved
//!     ▲                   │  └────reject───▶ Rejected
//!     └─────withdraw──────┘
//! ```
//!
//! 请求行上的 `timeoff_requested` 表示是否待审批；审批结果同时写回
//! 员工记录的 `time_off_status` ("approved" 或 NULL)。两步之间不回滚，
//! 第二步失败时返回 [`StoreError::PartialFailure`]。

use chrono::NaiveDate;
use shared::error::{StoreError, TimeOffError, ValidationError};
use shared::models::{
    Decision, PendingTimeOff, RequestState, TIME_OFF_APPROVED, TimeOffOverview, TimeOffStatus,
};
use sqlx::SqlitePool;

use crate::db::repository::{activity, employee, time_off};
use crate::utils::time::parse_date;

const ACTIVITY_KIND: &str = "time_off";

/// Submit (or resubmit) a time-off request
///
/// `today` is the current date in the business timezone. Returns the id of
/// the pending request row; resubmitting while pending returns the same id.
pub async fn submit_request(
    pool: &SqlitePool,
    employee_id: i64,
    reason: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<i64, TimeOffError> {
    let reason = reason.map(str::trim).filter(|s| !s.is_empty());
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    let (reason, start, end) = match (reason, start, end) {
        (Some(r), Some(s), Some(e)) => (r, s, e),
        _ => {
            let missing = [("reason", reason), ("start_date", start), ("end_date", end)]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(k, _)| k.to_string())
                .collect();
            return Err(ValidationError::MissingFields(missing).into());
        }
    };

    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if start_date < today {
        return Err(ValidationError::StartInPast.into());
    }
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart.into());
    }

    let emp = employee::find_by_id(pool, employee_id)
        .await
        .map_err(StoreError::from)?
        .ok_or_else(|| StoreError::NotFound(format!("Employee {employee_id}")))?;

    let composed = compose_reason(reason, start_date, end_date);
    let id = time_off::upsert_pending(
        pool,
        employee_id,
        &composed,
        &start_date.to_string(),
        &end_date.to_string(),
    )
    .await
    .map_err(StoreError::from)?;

    tracing::info!(employee_id, request_id = id, "Time-off request submitted");
    record_activity(pool, "submitted", &emp.name, &emp.email).await;
    Ok(id)
}

/// Withdraw the employee's pending request; no pending request is a no-op
pub async fn withdraw_request(pool: &SqlitePool, employee_id: i64) -> Result<(), StoreError> {
    let withdrawn = time_off::withdraw(pool, employee_id).await?;
    if withdrawn == 0 {
        tracing::debug!(employee_id, "No pending time-off request to withdraw");
        return Ok(());
    }

    tracing::info!(employee_id, "Time-off request withdrawn");
    if let Ok(Some(emp)) = employee::find_by_id(pool, employee_id).await {
        record_activity(pool, "withdrawn", &emp.name, &emp.email).await;
    }
    Ok(())
}

/// Approve or reject a pending request
///
/// Role checks happen in the policy layer before this is called. `actor` is
/// the adjudicator's email, recorded in the activity feed.
pub async fn adjudicate(
    pool: &SqlitePool,
    request_id: i64,
    employee_id: i64,
    decision: Decision,
    actor: &str,
) -> Result<(), StoreError> {
    let processed =
        time_off::mark_processed(pool, request_id, employee_id, decision.status()).await?;
    if processed == 0 {
        return Err(StoreError::NotFound(format!(
            "Pending time-off request {request_id} for employee {employee_id}"
        )));
    }

    let status = match decision {
        Decision::Approve => Some(TIME_OFF_APPROVED),
        Decision::Reject => None,
    };
    let partial = |reason: String| {
        tracing::error!(
            request_id,
            employee_id,
            reason = %reason,
            "Time-off request processed but employee record not updated"
        );
        StoreError::PartialFailure {
            request_id,
            employee_id,
            reason,
        }
    };
    match employee::set_time_off_status(pool, employee_id, status).await {
        Ok(0) => return Err(partial(format!("Employee {employee_id} not found"))),
        Ok(_) => {}
        Err(e) => return Err(partial(e.to_string())),
    }

    tracing::info!(request_id, employee_id, decision = ?decision, "Time-off request adjudicated");
    let subject = employee::find_by_id(pool, employee_id)
        .await
        .ok()
        .flatten()
        .map(|e| e.name)
        .unwrap_or_else(|| format!("Employee {employee_id}"));
    record_activity(pool, decision.status().as_str(), &subject, actor).await;
    Ok(())
}

/// Derive the employee's lifecycle state
pub async fn request_state(pool: &SqlitePool, employee_id: i64) -> Result<RequestState, StoreError> {
    Ok(overview(pool, employee_id).await?.state)
}

/// State plus the latest request row
pub async fn overview(pool: &SqlitePool, employee_id: i64) -> Result<TimeOffOverview, StoreError> {
    let latest = match time_off::find_pending(pool, employee_id).await? {
        Some(pending) => Some(pending),
        None => time_off::find_latest(pool, employee_id).await?,
    };
    let state = match latest.as_ref().map(|r| r.status) {
        Some(TimeOffStatus::Pending) => RequestState::Pending,
        Some(TimeOffStatus::Approved) => RequestState::Approved,
        Some(TimeOffStatus::Rejected) => RequestState::Rejected,
        Some(TimeOffStatus::Withdrawn) | None => RequestState::NoRequest,
    };
    Ok(TimeOffOverview {
        employee_id,
        state,
        latest,
    })
}

/// Manager queue
pub async fn list_pending(pool: &SqlitePool) -> Result<Vec<PendingTimeOff>, StoreError> {
    Ok(time_off::find_all_pending(pool).await?)
}

fn compose_reason(reason: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("{reason} ({start} to {end})")
}

/// 活动记录失败不影响主流程
async fn record_activity(pool: &SqlitePool, action: &str, subject: &str, actor: &str) {
    if let Err(e) = activity::record(pool, ACTIVITY_KIND, action, subject, actor).await {
        tracing::warn!(error = %e, action, "Failed to record time-off activity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        date("2025-05-01")
    }

    /// Employee row with a fixed id
    async fn seed_employee(pool: &SqlitePool, id: i64) {
        sqlx::query(
            "INSERT INTO employee (id, name, position, department, email, salary, created_at, updated_at) \
             VALUES (?, ?, 'Engineer', 'R&D', ?, 1000, 0, 0)",
        )
        .bind(id)
        .bind(format!("Employee {id}"))
        .bind(format!("e{id}@x.com"))
        .execute(pool)
        .await
        .unwrap();
    }

    async fn submit(pool: &SqlitePool, id: i64, start: &str, end: &str) -> Result<i64, TimeOffError> {
        submit_request(pool, id, Some("Family trip"), Some(start), Some(end), today()).await
    }

    #[tokio::test]
    async fn family_trip_example() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;

        let id = submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();
        let row = time_off::find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(row.timeoff_requested);
        assert!(row.reason.contains("Family trip"));
        assert!(row.reason.contains("2025-06-01"));
        assert!(row.reason.contains("2025-06-05"));
        assert_eq!(request_state(&pool, 7).await.unwrap(), RequestState::Pending);
    }

    #[tokio::test]
    async fn start_in_past_creates_no_row() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;

        let err = submit(&pool, 7, "2025-04-01", "2025-06-05").await.unwrap_err();
        assert_eq!(err, TimeOffError::Validation(ValidationError::StartInPast));
        assert_eq!(time_off::count_pending(&pool).await.unwrap(), 0);
        assert_eq!(request_state(&pool, 7).await.unwrap(), RequestState::NoRequest);
    }

    #[tokio::test]
    async fn start_today_is_allowed() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        submit(&pool, 7, "2025-05-01", "2025-05-01").await.unwrap();
    }

    #[tokio::test]
    async fn end_before_start() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        let err = submit(&pool, 7, "2025-06-05", "2025-06-01").await.unwrap_err();
        assert_eq!(err, TimeOffError::Validation(ValidationError::EndBeforeStart));
    }

    #[tokio::test]
    async fn missing_fields_are_listed() {
        let pool = test_pool().await;
        let err = submit_request(&pool, 7, Some("  "), Some("2025-06-01"), None, today())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TimeOffError::Validation(ValidationError::MissingFields(vec![
                "reason".into(),
                "end_date".into()
            ]))
        );
    }

    #[tokio::test]
    async fn invalid_date() {
        let pool = test_pool().await;
        let err = submit(&pool, 7, "06/01/2025", "2025-06-05").await.unwrap_err();
        assert!(matches!(
            err,
            TimeOffError::Validation(ValidationError::InvalidDate(_))
        ));
    }

    #[tokio::test]
    async fn unknown_employee() {
        let pool = test_pool().await;
        let err = submit(&pool, 404, "2025-06-01", "2025-06-05").await.unwrap_err();
        assert!(matches!(err, TimeOffError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn resubmit_updates_same_row() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        let first = submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();
        let second = submit(&pool, 7, "2025-07-01", "2025-07-03").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(time_off::count_pending(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn withdraw_returns_to_no_request() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();

        withdraw_request(&pool, 7).await.unwrap();
        assert_eq!(request_state(&pool, 7).await.unwrap(), RequestState::NoRequest);

        // nothing pending: still ok
        withdraw_request(&pool, 7).await.unwrap();
    }

    #[tokio::test]
    async fn approve_sets_employee_status() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        let id = submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();

        adjudicate(&pool, id, 7, Decision::Approve, "boss@x.com")
            .await
            .unwrap();

        let emp = employee::find_by_id(&pool, 7).await.unwrap().unwrap();
        assert_eq!(emp.time_off_status.as_deref(), Some(TIME_OFF_APPROVED));
        let row = time_off::find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(!row.timeoff_requested);
        assert_eq!(request_state(&pool, 7).await.unwrap(), RequestState::Approved);
    }

    #[tokio::test]
    async fn reject_clears_employee_status() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        employee::set_time_off_status(&pool, 7, Some(TIME_OFF_APPROVED))
            .await
            .unwrap();
        let id = submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();

        adjudicate(&pool, id, 7, Decision::Reject, "boss@x.com")
            .await
            .unwrap();

        let emp = employee::find_by_id(&pool, 7).await.unwrap().unwrap();
        assert!(emp.time_off_status.is_none());
        let row = time_off::find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(!row.timeoff_requested);
        assert_eq!(row.status, TimeOffStatus::Rejected);
        assert_eq!(request_state(&pool, 7).await.unwrap(), RequestState::Rejected);
    }

    #[tokio::test]
    async fn adjudicating_twice_is_not_found() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        let id = submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();
        adjudicate(&pool, id, 7, Decision::Approve, "boss@x.com")
            .await
            .unwrap();

        let err = adjudicate(&pool, id, 7, Decision::Reject, "boss@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_employee_is_partial_failure() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        let id = submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();
        // employee row vanishes without going through the repository
        sqlx::query("DELETE FROM employee WHERE id = 7")
            .execute(&pool)
            .await
            .unwrap();

        let err = adjudicate(&pool, id, 7, Decision::Approve, "boss@x.com")
            .await
            .unwrap_err();
        match err {
            StoreError::PartialFailure {
                request_id,
                employee_id,
                ..
            } => {
                assert_eq!(request_id, id);
                assert_eq!(employee_id, 7);
            }
            other => panic!("unexpected: {other:?}"),
        }
        // request stays processed
        let row = time_off::find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(!row.timeoff_requested);
    }

    #[tokio::test]
    async fn pending_queue_and_activity() {
        let pool = test_pool().await;
        seed_employee(&pool, 7).await;
        seed_employee(&pool, 8).await;
        submit(&pool, 7, "2025-06-01", "2025-06-05").await.unwrap();
        submit(&pool, 8, "2025-06-01", "2025-06-02").await.unwrap();

        let queue = list_pending(&pool).await.unwrap();
        assert_eq!(queue.len(), 2);
        assert!(queue.iter().any(|p| p.employee_name == "Employee 8"));

        let feed = activity::recent(&pool, 10).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|a| a.kind == ACTIVITY_KIND && a.action == "submitted"));
    }
}
