//! Sync API 模块 (管理端)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/sync/refresh", post(handler::refresh))
}
