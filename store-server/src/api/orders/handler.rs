//! Online Order Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};
use shared::models::Order;

/// GET /api/orders/:id - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderRepository::new(state.pool.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(Json(order))
}

/// GET /api/orders/by-customer/:customer_id - 顾客订单历史
pub async fn list_by_customer(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool.clone())
        .find_by_customer(&customer_id)
        .await?;
    Ok(Json(orders))
}
