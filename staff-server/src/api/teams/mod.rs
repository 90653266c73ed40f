//! Team API Module
//!
//! | 路径 | 方法 | 资源 |
//! |------|------|------|
//! | /api/teams | GET | teams |
//! | /api/teams | POST | teamManagement |
//! | /api/teams/{name} | PUT / DELETE | teamManagement |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_access;
use crate::core::ServerState;
use crate::policy::Resource;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/teams", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_access(Resource::Teams)));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{name}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_access(Resource::TeamManagement)));

    read_routes.merge(manage_routes)
}
