//! Checkout Handler

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CheckoutRequest, Order};

/// POST /api/checkout - 购物车结算下单
pub async fn checkout(
    State(state): State<ServerState>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders().checkout(req).await?;
    Ok(Json(order))
}
