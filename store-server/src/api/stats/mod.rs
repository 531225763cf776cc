//! Statistics API 模块 (管理端)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/stats/dashboard", get(handler::dashboard))
}
