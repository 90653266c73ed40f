//! Team API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Team, TeamCreate, TeamUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, activity, team};
use crate::utils::validation::{MAX_NAME_LEN, require_fields, validate_text_len};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

const RESOURCE: &str = "team";

fn map_repo_error(err: RepoError, name: &str) -> AppError {
    match err {
        RepoError::NotFound(msg) if msg.starts_with("Employee") => {
            AppError::with_message(ErrorCode::EmployeeNotFound, msg)
        }
        RepoError::NotFound(_) => AppError::new(ErrorCode::TeamNotFound).with_detail("name", name),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TeamNameExists, msg),
        other => other.into(),
    }
}

async fn record(state: &ServerState, action: &str, subject: &str, actor: &CurrentUser) {
    if let Err(e) = activity::record(state.pool(), RESOURCE, action, subject, &actor.email).await {
        tracing::warn!(error = %e, action, "Failed to record team activity");
    }
}

/// All teams grouped with their members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Team>>>> {
    let teams = team::find_all(state.pool()).await?;
    Ok(ok(teams))
}

/// Create a team (name + at least one employee)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TeamCreate>,
) -> AppResult<Json<ApiResponse<Team>>> {
    let name = payload.name.trim();
    require_fields(&[("name", name)])?;
    validate_text_len(name, "name", MAX_NAME_LEN)?;
    if payload.employee_ids.is_empty() {
        return Err(AppError::new(ErrorCode::TeamEmpty));
    }

    let created = team::create(state.pool(), name, &payload.employee_ids)
        .await
        .map_err(|e| map_repo_error(e, name))?;

    tracing::info!(team = %created.name, members = created.members.len(), "Team created");
    record(&state, "created", &created.name, &user).await;
    Ok(ok(created))
}

/// Rename a team and/or replace its member set
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(name): Path<String>,
    Json(payload): Json<TeamUpdate>,
) -> AppResult<Json<ApiResponse<Team>>> {
    let new_name = payload.name.as_deref().map(str::trim);
    if let Some(new_name) = new_name {
        require_fields(&[("name", new_name)])?;
        validate_text_len(new_name, "name", MAX_NAME_LEN)?;
    }
    if payload.employee_ids.is_empty() {
        return Err(AppError::new(ErrorCode::TeamEmpty));
    }

    let updated = team::update(state.pool(), &name, new_name, &payload.employee_ids)
        .await
        .map_err(|e| map_repo_error(e, &name))?;

    tracing::info!(team = %name, renamed_to = %updated.name, "Team updated");
    record(&state, "updated", &updated.name, &user).await;
    Ok(ok(updated))
}

/// Delete a team (all membership rows)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = team::delete(state.pool(), &name)
        .await
        .map_err(|e| map_repo_error(e, &name))?;

    tracing::info!(team = %name, removed, "Team deleted");
    record(&state, "deleted", &name, &user).await;
    Ok(Json(ApiResponse::ok()))
}
