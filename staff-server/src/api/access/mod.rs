//! Policy probe
//!
//! `GET /api/access/{resource}` tells the presentation layer whether the
//! current role may open a view, and where to go instead.

use axum::{Json, Router, extract::Path, routing::get};
use shared::client::AccessDecision;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::policy::{self, Resource};
use crate::utils::{ApiResponse, AppError, AppResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/access/{resource}", get(probe))
}

async fn probe(
    user: CurrentUser,
    Path(resource): Path<String>,
) -> AppResult<Json<ApiResponse<AccessDecision>>> {
    let resource: Resource = resource
        .parse()
        .map_err(|e: policy::UnknownResource| AppError::invalid_request(e.to_string()))?;

    let decision = match policy::authorize(user.role, resource) {
        Ok(()) => AccessDecision {
            resource: resource.to_string(),
            allowed: true,
            reason: None,
            redirect: None,
        },
        Err(denied) => AccessDecision {
            resource: resource.to_string(),
            allowed: false,
            reason: Some(denied.reason().to_string()),
            redirect: Some(denied.redirect().to_string()),
        },
    };
    Ok(ok(decision))
}
