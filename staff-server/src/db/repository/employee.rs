//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, position, department, email, phone, salary, team, time_off_status, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee =
        sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employee WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(employee)
}

/// Exact email match, used to link a login account to its roster entry
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    let salary = data
        .salary
        .ok_or_else(|| RepoError::Validation("salary is required".into()))?;
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employee (name, position, department, email, phone, salary, team, time_off_status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, ?8, ?8) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.position)
    .bind(&data.department)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(salary)
    .bind(&data.team)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE employee SET \
         name = COALESCE(?1, name), \
         position = COALESCE(?2, position), \
         department = COALESCE(?3, department), \
         email = COALESCE(?4, email), \
         phone = COALESCE(?5, phone), \
         salary = COALESCE(?6, salary), \
         team = COALESCE(?7, team), \
         updated_at = ?8 \
         WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.position)
    .bind(&data.department)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.salary)
    .bind(&data.team)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }

    // Keep denormalized member names in sync
    if let Some(name) = &data.name {
        sqlx::query("UPDATE team_member SET employee_name = ? WHERE employee_id = ?")
            .bind(name)
            .bind(id)
            .execute(pool)
            .await?;
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Delete an employee
///
/// Team memberships go with it (FK cascade) and any pending time-off request
/// is withdrawn in the same transaction.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE time_off_request SET timeoff_requested = 0, status = 'withdrawn', updated_at = ? \
         WHERE employee_id = ? AND timeoff_requested = 1",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(existing)
}

/// Set `time_off_status`; returns affected row count (0 = employee missing)
pub async fn set_time_off_status(
    pool: &SqlitePool,
    id: i64,
    status: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE employee SET time_off_status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn sample(name: &str, email: &str) -> EmployeeCreate {
        EmployeeCreate {
            name: name.into(),
            position: "Engineer".into(),
            department: "R&D".into(),
            email: email.into(),
            phone: None,
            salary: Some(5000.0),
            team: None,
        }
    }

    #[tokio::test]
    async fn create_update_and_list() {
        let pool = test_pool().await;
        let ann = create(&pool, sample("Ann", "ann@x.com")).await.unwrap();
        create(&pool, sample("Bob", "bob@x.com")).await.unwrap();
        assert!(ann.time_off_status.is_none());

        let updated = update(
            &pool,
            ann.id,
            EmployeeUpdate {
                position: Some("Lead".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.position, "Lead");
        assert_eq!(updated.department, "R&D");

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ann");
        assert_eq!(count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn create_without_salary_fails() {
        let pool = test_pool().await;
        let mut data = sample("Ann", "ann@x.com");
        data.salary = None;
        assert!(matches!(
            create(&pool, data).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_missing_employee() {
        let pool = test_pool().await;
        let err = update(&pool, 42, EmployeeUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_cascades_memberships_and_withdraws_pending() {
        let pool = test_pool().await;
        let ann = create(&pool, sample("Ann", "ann@x.com")).await.unwrap();
        sqlx::query(
            "INSERT INTO team_member (team_name, employee_id, employee_name, created_at) VALUES ('Core', ?, 'Ann', 0)",
        )
        .bind(ann.id)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO time_off_request (employee_id, reason, start_date, end_date, created_at, updated_at) \
             VALUES (?, 'Trip', '2025-06-01', '2025-06-05', 0, 0)",
        )
        .bind(ann.id)
        .execute(&pool)
        .await
        .unwrap();

        delete(&pool, ann.id).await.unwrap();

        let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_member")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(members, 0);
        let pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM time_off_request WHERE timeoff_requested = 1",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(pending, 0);
    }

    #[tokio::test]
    async fn set_status_reports_missing_employee() {
        let pool = test_pool().await;
        let ann = create(&pool, sample("Ann", "ann@x.com")).await.unwrap();
        assert_eq!(
            set_time_off_status(&pool, ann.id, Some("approved"))
                .await
                .unwrap(),
            1
        );
        let ann = find_by_id(&pool, ann.id).await.unwrap().unwrap();
        assert_eq!(ann.time_off_status.as_deref(), Some("approved"));
        assert_eq!(set_time_off_status(&pool, 999, None).await.unwrap(), 0);
    }
}
