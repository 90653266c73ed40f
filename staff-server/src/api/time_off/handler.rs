//! Time-off API Handlers
//!
//! Requests are always made on the caller's own employee record, found by
//! exact email match with the login account.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    AdjudicateRequest, Decision, Employee, PendingTimeOff, TimeOffOverview, TimeOffSubmit,
};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::time_off;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

/// 当前登录账号对应的员工记录
async fn own_employee(state: &ServerState, user: &CurrentUser) -> AppResult<Employee> {
    employee::find_by_email(state.pool(), &user.email)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::EmployeeNotLinked).with_detail("email", user.email.clone())
        })
}

#[derive(serde::Serialize)]
pub struct Submitted {
    pub id: i64,
    pub submitted_at: i64,
}

/// Submit or update the caller's pending request
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TimeOffSubmit>,
) -> AppResult<Json<ApiResponse<Submitted>>> {
    validate_optional_text(&payload.reason, "reason", MAX_NOTE_LEN)?;
    let me = own_employee(&state, &user).await?;

    let id = time_off::submit_request(
        state.pool(),
        me.id,
        payload.reason.as_deref(),
        payload.start_date.as_deref(),
        payload.end_date.as_deref(),
        state.today(),
    )
    .await?;

    Ok(ok(Submitted {
        id,
        submitted_at: now_millis(),
    }))
}

/// Current state of the caller's request
pub async fn mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<TimeOffOverview>>> {
    let me = own_employee(&state, &user).await?;
    let overview = time_off::overview(state.pool(), me.id).await?;
    Ok(ok(overview))
}

/// Withdraw the caller's pending request (no-op when nothing is pending)
pub async fn withdraw(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let me = own_employee(&state, &user).await?;
    time_off::withdraw_request(state.pool(), me.id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// Manager queue
pub async fn pending(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<PendingTimeOff>>>> {
    Ok(ok(time_off::list_pending(state.pool()).await?))
}

async fn adjudicate(
    state: ServerState,
    user: CurrentUser,
    request_id: i64,
    employee_id: i64,
    decision: Decision,
) -> AppResult<Json<ApiResponse<()>>> {
    time_off::adjudicate(state.pool(), request_id, employee_id, decision, &user.email)
        .await
        .map_err(|e| match e {
            shared::error::StoreError::NotFound(msg) => {
                AppError::with_message(ErrorCode::TimeOffRequestNotFound, msg)
                    .with_detail("request_id", request_id)
            }
            other => other.into(),
        })?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AdjudicateRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    adjudicate(state, user, id, payload.employee_id, Decision::Approve).await
}

pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AdjudicateRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    adjudicate(state, user, id, payload.employee_id, Decision::Reject).await
}
