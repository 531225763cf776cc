//! Point-of-Sale API 模块 (管理端)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/pos/orders", pos_routes())
}

fn pos_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list_month))
        .route("/{id}", get(handler::get_by_id))
}
