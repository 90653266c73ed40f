//! Typed calls for the StaffEasy API
//!
//! Thin wrappers that unwrap the `ApiResponse` envelope.

use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::client::{AccessDecision, Identity};
use shared::models::{
    AdjudicateRequest, DashboardSummary, Employee, PendingTimeOff, Team, TimeOffOverview,
    TimeOffSubmit,
};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

fn unwrap_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {what} data")))
}

async fn fetch<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    path: &str,
    what: &str,
) -> ClientResult<T> {
    unwrap_data(client.get::<ApiResponse<T>>(path).await?, what)
}

/// Current account, fresh from the server
pub async fn me<C: HttpClient>(client: &C) -> ClientResult<Identity> {
    fetch(client, "/api/auth/me", "user").await
}

/// Whether the current role may open a view
pub async fn check_access<C: HttpClient>(client: &C, resource: &str) -> ClientResult<AccessDecision> {
    fetch(client, &format!("/api/access/{resource}"), "access").await
}

pub async fn dashboard<C: HttpClient>(client: &C) -> ClientResult<DashboardSummary> {
    fetch(client, "/api/dashboard", "dashboard").await
}

/// Employees visible to the current role
pub async fn list_employees<C: HttpClient>(client: &C) -> ClientResult<Vec<Employee>> {
    fetch(client, "/api/employees", "employee").await
}

pub async fn list_teams<C: HttpClient>(client: &C) -> ClientResult<Vec<Team>> {
    fetch(client, "/api/teams", "team").await
}

/// Submit or update the caller's pending request, returns the request id
pub async fn submit_time_off<C: HttpClient>(client: &C, req: &TimeOffSubmit) -> ClientResult<i64> {
    #[derive(serde::Deserialize)]
    struct Submitted {
        id: i64,
    }

    let resp: ApiResponse<Submitted> = client.post("/api/time-off", req).await?;
    Ok(unwrap_data(resp, "time-off")?.id)
}

pub async fn my_time_off<C: HttpClient>(client: &C) -> ClientResult<TimeOffOverview> {
    fetch(client, "/api/time-off/mine", "time-off").await
}

pub async fn withdraw_time_off<C: HttpClient>(client: &C) -> ClientResult<()> {
    let _: ApiResponse<()> = client.post_empty("/api/time-off/withdraw").await?;
    Ok(())
}

/// Manager queue
pub async fn pending_time_off<C: HttpClient>(client: &C) -> ClientResult<Vec<PendingTimeOff>> {
    fetch(client, "/api/time-off", "time-off").await
}

pub async fn approve_time_off<C: HttpClient>(
    client: &C,
    request_id: i64,
    employee_id: i64,
) -> ClientResult<()> {
    let body = AdjudicateRequest { employee_id };
    let _: ApiResponse<()> = client
        .post(&format!("/api/time-off/{request_id}/approve"), &body)
        .await?;
    Ok(())
}

pub async fn reject_time_off<C: HttpClient>(
    client: &C,
    request_id: i64,
    employee_id: i64,
) -> ClientResult<()> {
    let body = AdjudicateRequest { employee_id };
    let _: ApiResponse<()> = client
        .post(&format!("/api/time-off/{request_id}/reject"), &body)
        .await?;
    Ok(())
}
