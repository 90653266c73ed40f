//! Time-off Request Repository
//!
//! `idx_time_off_one_pending` guarantees at most one row per employee with
//! `timeoff_requested = 1`; submissions upsert against it.

use super::RepoResult;
use shared::models::{PendingTimeOff, TimeOffRequest, TimeOffStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, reason, start_date, end_date, timeoff_requested, status, created_at, updated_at";

/// Insert a pending request or overwrite the current pending one
pub async fn upsert_pending(
    pool: &SqlitePool,
    employee_id: i64,
    reason: &str,
    start_date: &str,
    end_date: &str,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO time_off_request (employee_id, reason, start_date, end_date, timeoff_requested, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, 1, 'pending', ?5, ?5) \
         ON CONFLICT(employee_id) WHERE timeoff_requested = 1 DO UPDATE SET \
         reason = excluded.reason, \
         start_date = excluded.start_date, \
         end_date = excluded.end_date, \
         updated_at = excluded.updated_at \
         RETURNING id",
    )
    .bind(employee_id)
    .bind(reason)
    .bind(start_date)
    .bind(end_date)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TimeOffRequest>> {
    let request = sqlx::query_as::<_, TimeOffRequest>(&format!(
        "SELECT {COLUMNS} FROM time_off_request WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

pub async fn find_pending(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<TimeOffRequest>> {
    let request = sqlx::query_as::<_, TimeOffRequest>(&format!(
        "SELECT {COLUMNS} FROM time_off_request WHERE employee_id = ? AND timeoff_requested = 1"
    ))
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

/// Most recently touched request of the employee, any status
pub async fn find_latest(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<TimeOffRequest>> {
    let request = sqlx::query_as::<_, TimeOffRequest>(&format!(
        "SELECT {COLUMNS} FROM time_off_request WHERE employee_id = ? ORDER BY updated_at DESC, id DESC LIMIT 1"
    ))
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

/// Clear the pending flag of the employee's request; 0 rows = nothing pending
pub async fn withdraw(pool: &SqlitePool, employee_id: i64) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE time_off_request SET timeoff_requested = 0, status = ?, updated_at = ? \
         WHERE employee_id = ? AND timeoff_requested = 1",
    )
    .bind(TimeOffStatus::Withdrawn)
    .bind(now)
    .bind(employee_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Close a pending request with the given outcome
///
/// Matches on request id, employee id and the pending flag together, so a
/// second adjudication of the same request affects 0 rows.
pub async fn mark_processed(
    pool: &SqlitePool,
    request_id: i64,
    employee_id: i64,
    status: TimeOffStatus,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE time_off_request SET timeoff_requested = 0, status = ?, updated_at = ? \
         WHERE id = ? AND employee_id = ? AND timeoff_requested = 1",
    )
    .bind(status)
    .bind(now)
    .bind(request_id)
    .bind(employee_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Pending queue joined with employee names, oldest first
pub async fn find_all_pending(pool: &SqlitePool) -> RepoResult<Vec<PendingTimeOff>> {
    let rows = sqlx::query_as::<_, PendingTimeOff>(
        "SELECT r.id, r.employee_id, COALESCE(e.name, '') AS employee_name, r.reason, r.start_date, r.end_date, r.created_at \
         FROM time_off_request r LEFT JOIN employee e ON e.id = r.employee_id \
         WHERE r.timeoff_requested = 1 ORDER BY r.created_at, r.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_pending(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM time_off_request WHERE timeoff_requested = 1",
    )
    .fetch_one(pool)
    .await?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn upsert_keeps_single_pending_row() {
        let pool = test_pool().await;
        let first = upsert_pending(&pool, 7, "a", "2025-06-01", "2025-06-05")
            .await
            .unwrap();
        let second = upsert_pending(&pool, 7, "b", "2025-07-01", "2025-07-02")
            .await
            .unwrap();
        assert_eq!(first, second);

        let pending = find_pending(&pool, 7).await.unwrap().unwrap();
        assert_eq!(pending.reason, "b");
        assert_eq!(pending.start_date, "2025-07-01");
        assert!(pending.timeoff_requested);
        assert_eq!(pending.status, TimeOffStatus::Pending);
        assert_eq!(count_pending(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn withdraw_then_resubmit_creates_new_row() {
        let pool = test_pool().await;
        let first = upsert_pending(&pool, 7, "a", "2025-06-01", "2025-06-05")
            .await
            .unwrap();
        assert_eq!(withdraw(&pool, 7).await.unwrap(), 1);
        assert_eq!(withdraw(&pool, 7).await.unwrap(), 0);

        let old = find_by_id(&pool, first).await.unwrap().unwrap();
        assert!(!old.timeoff_requested);
        assert_eq!(old.status, TimeOffStatus::Withdrawn);

        let second = upsert_pending(&pool, 7, "b", "2025-06-01", "2025-06-05")
            .await
            .unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn mark_processed_only_once() {
        let pool = test_pool().await;
        let id = upsert_pending(&pool, 7, "a", "2025-06-01", "2025-06-05")
            .await
            .unwrap();
        // wrong employee does not match
        assert_eq!(
            mark_processed(&pool, id, 8, TimeOffStatus::Approved)
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            mark_processed(&pool, id, 7, TimeOffStatus::Approved)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            mark_processed(&pool, id, 7, TimeOffStatus::Rejected)
                .await
                .unwrap(),
            0
        );
        let latest = find_latest(&pool, 7).await.unwrap().unwrap();
        assert_eq!(latest.status, TimeOffStatus::Approved);
        assert!(find_pending(&pool, 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pending_queue_tolerates_missing_employee() {
        let pool = test_pool().await;
        upsert_pending(&pool, 99, "a", "2025-06-01", "2025-06-05")
            .await
            .unwrap();
        let queue = find_all_pending(&pool).await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].employee_name, "");
    }
}
