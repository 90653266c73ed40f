//! Team Repository
//!
//! Teams have no table of their own: a team is the set of `team_member` rows
//! sharing a `team_name`.

use super::{RepoError, RepoResult, employee};
use shared::models::{Team, TeamMember};
use sqlx::SqlitePool;
use std::collections::HashSet;

const COLUMNS: &str = "id, team_name, employee_id, employee_name, created_at";

/// All membership rows ordered by team, then member name
pub async fn find_all_rows(pool: &SqlitePool) -> RepoResult<Vec<TeamMember>> {
    let rows = sqlx::query_as::<_, TeamMember>(&format!(
        "SELECT {COLUMNS} FROM team_member ORDER BY team_name, employee_name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Team>> {
    Ok(Team::group(find_all_rows(pool).await?))
}

pub async fn members_of(pool: &SqlitePool, team_name: &str) -> RepoResult<Vec<TeamMember>> {
    let rows = sqlx::query_as::<_, TeamMember>(&format!(
        "SELECT {COLUMNS} FROM team_member WHERE team_name = ? ORDER BY employee_name"
    ))
    .bind(team_name)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_name(pool: &SqlitePool, team_name: &str) -> RepoResult<Option<Team>> {
    Ok(Team::group(members_of(pool, team_name).await?).pop())
}

/// Create a team with its initial members
pub async fn create(pool: &SqlitePool, name: &str, employee_ids: &[i64]) -> RepoResult<Team> {
    if !members_of(pool, name).await?.is_empty() {
        return Err(RepoError::Duplicate(format!("Team '{name}' already exists")));
    }

    let members = resolve_members(pool, &dedup(employee_ids)).await?;

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    for (employee_id, employee_name) in &members {
        sqlx::query(
            "INSERT INTO team_member (team_name, employee_id, employee_name, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(*employee_id)
        .bind(employee_name)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    find_by_name(pool, name)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create team".into()))
}

/// Rename and/or replace the member set
///
/// Only the difference is written: rows for removed members are deleted,
/// rows for new members are inserted, the rest are left alone.
pub async fn update(
    pool: &SqlitePool,
    name: &str,
    new_name: Option<&str>,
    employee_ids: &[i64],
) -> RepoResult<Team> {
    let current = members_of(pool, name).await?;
    if current.is_empty() {
        return Err(RepoError::NotFound(format!("Team '{name}' not found")));
    }

    let target_name = new_name.unwrap_or(name);
    if target_name != name && !members_of(pool, target_name).await?.is_empty() {
        return Err(RepoError::Duplicate(format!(
            "Team '{target_name}' already exists"
        )));
    }

    let wanted: HashSet<i64> = employee_ids.iter().copied().collect();
    let existing: HashSet<i64> = current.iter().map(|m| m.employee_id).collect();

    let added: Vec<i64> = dedup(employee_ids)
        .into_iter()
        .filter(|id| !existing.contains(id))
        .collect();
    let added = resolve_members(pool, &added).await?;

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    for removed in existing.difference(&wanted) {
        sqlx::query("DELETE FROM team_member WHERE team_name = ? AND employee_id = ?")
            .bind(name)
            .bind(*removed)
            .execute(&mut *tx)
            .await?;
    }

    for (employee_id, employee_name) in &added {
        sqlx::query(
            "INSERT INTO team_member (team_name, employee_id, employee_name, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(*employee_id)
        .bind(employee_name)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    if target_name != name {
        sqlx::query("UPDATE team_member SET team_name = ? WHERE team_name = ?")
            .bind(target_name)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    find_by_name(pool, target_name)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Team '{target_name}' not found")))
}

/// Delete every membership row of the team, returns removed row count
pub async fn delete(pool: &SqlitePool, name: &str) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM team_member WHERE team_name = ?")
        .bind(name)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Team '{name}' not found")));
    }
    Ok(rows.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT team_name) FROM team_member")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Look up member names before opening a transaction
async fn resolve_members(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<(i64, String)>> {
    let mut members = Vec::with_capacity(ids.len());
    for &employee_id in ids {
        let emp = employee::find_by_id(pool, employee_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {employee_id} not found")))?;
        members.push((employee_id, emp.name));
    }
    Ok(members)
}

/// Keep first occurrence order
fn dedup(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
