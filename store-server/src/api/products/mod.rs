//! Product API 模块
//!
//! 读路径对顾客端开放，写路径挂在 `/api/admin/` 下由中间件保护。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/products", public_routes())
        .nest("/api/admin/products", admin_routes())
}

fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{code}", get(handler::get_by_code))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route(
            "/{code}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
}
