//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate, ProductUpdate};

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog().list_products().await?;
    Ok(Json(products))
}

/// GET /api/products/:code - 获取单个商品
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.catalog().get_product(&code).await?;
    Ok(Json(product))
}

/// POST /api/admin/products - 创建商品 (分配顺序编号)
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state.catalog().create_product(data).await?;
    Ok(Json(product))
}

/// PUT /api/admin/products/:code - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(data): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state.catalog().update_product(&code, data).await?;
    Ok(Json(product))
}

/// DELETE /api/admin/products/:code - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<()>> {
    state.catalog().delete_product(&code).await?;
    Ok(Json(()))
}
