//! Point-of-Sale Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::PosOrderRepository;
use crate::utils::{AppError, AppResult, time};
use shared::models::{PosOrder, PosOrderCreate};

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// 1-based month
    pub month: u32,
    pub year: i32,
}

/// POST /api/admin/pos/orders - 录入门店销售
pub async fn create(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(data): Json<PosOrderCreate>,
) -> AppResult<Json<PosOrder>> {
    let order = state
        .orders()
        .place_pos_order(Some(admin.admin_id), data)
        .await?;
    Ok(Json(order))
}

/// GET /api/admin/pos/orders?month=&year= - 当月销售列表
pub async fn list_month(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<PosOrder>>> {
    let (start, end) =
        time::month_range_millis(query.month, query.year, state.config.timezone)?;
    let orders = PosOrderRepository::new(state.pool.clone())
        .find_between(start, end)
        .await?;
    Ok(Json(orders))
}

/// GET /api/admin/pos/orders/:id - 单笔销售
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PosOrder>> {
    let order = PosOrderRepository::new(state.pool.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("POS order {}", id)))?;
    Ok(Json(order))
}
