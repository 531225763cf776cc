//! Customer API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id).put(handler::update),
        )
        .route("/{id}/addresses", post(handler::add_address))
        .route(
            "/{id}/addresses/{address_id}",
            axum::routing::delete(handler::delete_address),
        )
}
