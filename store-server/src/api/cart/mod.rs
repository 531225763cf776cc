//! Cart API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::add))
        .route("/{customer_id}", get(handler::list))
        .route(
            "/line/{line_id}",
            put(handler::set_quantity).delete(handler::remove),
        )
}
