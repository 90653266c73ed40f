//! Employee API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_access;
use crate::core::ServerState;
use crate::policy::Resource;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由：按角色过滤可见数据 (employee 只能看到自己)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // 管理路由：仅管理员可用
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_access(
            Resource::EmployeeManagement,
        )));

    read_routes.merge(manage_routes)
}
