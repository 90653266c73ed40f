//! Activity Repository (dashboard feed)

use super::RepoResult;
use shared::models::Activity;
use sqlx::SqlitePool;

pub async fn record(
    pool: &SqlitePool,
    kind: &str,
    action: &str,
    subject: &str,
    actor: &str,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO activity (kind, action, subject, actor, created_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(kind)
    .bind(action)
    .bind(subject)
    .bind(actor)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Newest first
pub async fn recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Activity>> {
    let rows = sqlx::query_as::<_, Activity>(
        "SELECT id, kind, action, subject, actor, created_at FROM activity ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let pool = test_pool().await;
        for i in 0..5 {
            record(&pool, "employee", "created", &format!("E{i}"), "admin@x.com")
                .await
                .unwrap();
        }
        let rows = recent(&pool, 3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].subject, "E4");
        assert_eq!(rows[2].subject, "E2");
    }
}
