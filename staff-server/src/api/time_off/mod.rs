//! Time-off API Module
//!
//! | 路径 | 方法 | 资源 |
//! |------|------|------|
//! | /api/time-off | GET | timeOffAdjudication (待审批队列) |
//! | /api/time-off/mine | GET | timeOffRequest |
//! | /api/time-off | POST | timeOffRequest |
//! | /api/time-off/withdraw | POST | timeOffRequest |
//! | /api/time-off/{id}/approve | POST | timeOffAdjudication |
//! | /api/time-off/{id}/reject | POST | timeOffAdjudication |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_access;
use crate::core::ServerState;
use crate::policy::Resource;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/time-off", routes())
}

fn routes() -> Router<ServerState> {
    let request_routes = Router::new()
        .route("/", post(handler::submit))
        .route("/mine", get(handler::mine))
        .route("/withdraw", post(handler::withdraw))
        .layer(middleware::from_fn(require_access(Resource::TimeOffRequest)));

    let adjudication_routes = Router::new()
        .route("/", get(handler::pending))
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
        .layer(middleware::from_fn(require_access(
            Resource::TimeOffAdjudication,
        )));

    request_routes.merge(adjudication_routes)
}
