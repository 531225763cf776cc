//! Promotion API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::PromotionRepository;
use crate::remote::RemoteMirror;
use crate::utils::{AppError, AppResult};
use shared::models::{Promotion, PromotionCreate, PromotionUpdate};
use shared::util::now_millis;

/// GET /api/promotions/current - 当前有效的促销
pub async fn list_current(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Promotion>>> {
    let promotions = PromotionRepository::new(state.pool.clone())
        .find_current(now_millis())
        .await?;
    Ok(Json(promotions))
}

/// GET /api/admin/promotions - 全部促销
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Promotion>>> {
    let promotions = PromotionRepository::new(state.pool.clone())
        .find_all()
        .await?;
    Ok(Json(promotions))
}

/// GET /api/admin/promotions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepository::new(state.pool.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Promotion {}", id)))?;
    Ok(Json(promotion))
}

/// POST /api/admin/promotions - 创建促销
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<PromotionCreate>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepository::new(state.pool.clone())
        .create(data)
        .await?;

    RemoteMirror::new(state.remote.clone())
        .upsert_promotion(&promotion)
        .await?;
    Ok(Json(promotion))
}

/// PUT /api/admin/promotions/:id - 更新促销
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<PromotionUpdate>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepository::new(state.pool.clone())
        .update(&id, data)
        .await?;

    RemoteMirror::new(state.remote.clone())
        .upsert_promotion(&promotion)
        .await?;
    Ok(Json(promotion))
}

/// DELETE /api/admin/promotions/:id - 删除促销
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<()>> {
    PromotionRepository::new(state.pool.clone())
        .delete(&id)
        .await?;
    RemoteMirror::new(state.remote.clone())
        .delete_promotion(&id)
        .await?;
    Ok(Json(()))
}
