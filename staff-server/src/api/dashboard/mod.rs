//! Dashboard summary
//!
//! Counts are visible to every role; the activity feed only to roles that may
//! access `activity`.

use axum::{Json, Router, extract::State, routing::get};
use shared::models::DashboardSummary;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{activity, employee, team, time_off};
use crate::policy::{self, Resource};
use crate::utils::{ApiResponse, AppResult, ok};

/// 最近活动条数
const RECENT_ACTIVITY_LIMIT: i64 = 10;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(summary))
}

async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let pool = state.pool();
    let recent_activity = if policy::can_access(user.role, Resource::Activity) {
        activity::recent(pool, RECENT_ACTIVITY_LIMIT).await?
    } else {
        Vec::new()
    };

    Ok(ok(DashboardSummary {
        employee_count: employee::count(pool).await?,
        team_count: team::count(pool).await?,
        pending_time_off: time_off::count_pending(pool).await?,
        recent_activity,
    }))
}
