//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ValidationError;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, activity, employee};
use crate::policy;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, missing_fields, require_fields,
    validate_optional_text, validate_text_len,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

const RESOURCE: &str = "employee";

fn map_repo_error(err: RepoError, id: Option<i64>) -> AppError {
    match err {
        RepoError::NotFound(_) => {
            let err = AppError::new(ErrorCode::EmployeeNotFound);
            match id {
                Some(id) => err.with_detail("id", id),
                None => err,
            }
        }
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmployeeEmailExists),
        other => other.into(),
    }
}

async fn record(state: &ServerState, action: &str, subject: &str, actor: &CurrentUser) {
    if let Err(e) = activity::record(state.pool(), RESOURCE, action, subject, &actor.email).await {
        tracing::warn!(error = %e, action, "Failed to record employee activity");
    }
}

/// List employees visible to the caller
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Employee>>>> {
    let employees = policy::visible_employees(state.pool(), &user).await?;
    Ok(ok(employees))
}

/// Get employee by id (employees may only read their own record)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = policy::find_visible_employee(state.pool(), &user, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    Ok(ok(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let mut missing = missing_fields(&[
        ("name", payload.name.as_str()),
        ("position", payload.position.as_str()),
        ("department", payload.department.as_str()),
        ("email", payload.email.as_str()),
    ]);
    if payload.salary.is_none() {
        missing.push("salary".to_string());
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing).into());
    }
    validate_text_len(&payload.name, "name", MAX_NAME_LEN)?;
    validate_text_len(&payload.position, "position", MAX_NAME_LEN)?;
    validate_text_len(&payload.department, "department", MAX_NAME_LEN)?;
    validate_text_len(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.team, "team", MAX_NAME_LEN)?;

    let employee = employee::create(state.pool(), payload)
        .await
        .map_err(|e| map_repo_error(e, None))?;

    tracing::info!(id = employee.id, name = %employee.name, "Employee created");
    record(&state, "created", &employee.name, &user).await;
    Ok(ok(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    for (field, value) in [
        ("name", &payload.name),
        ("position", &payload.position),
        ("department", &payload.department),
        ("email", &payload.email),
    ] {
        if let Some(v) = value {
            require_fields(&[(field, v.as_str())])?;
        }
    }
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;
    validate_optional_text(&payload.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.team, "team", MAX_NAME_LEN)?;

    let employee = employee::update(state.pool(), id, payload)
        .await
        .map_err(|e| map_repo_error(e, Some(id)))?;

    tracing::info!(id, "Employee updated");
    record(&state, "updated", &employee.name, &user).await;
    Ok(ok(employee))
}

/// Delete an employee (team memberships and pending time-off go with it)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let employee = employee::delete(state.pool(), id)
        .await
        .map_err(|e| map_repo_error(e, Some(id)))?;

    tracing::info!(id, name = %employee.name, "Employee deleted");
    record(&state, "deleted", &employee.name, &user).await;
    Ok(ok(employee))
}
