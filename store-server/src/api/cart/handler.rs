//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::{AppError, AppResult};
use shared::models::{CartAdd, CartItem, CartUpdateQuantity};
use shared::util::new_id;

/// GET /api/cart/:customer_id - 购物车内容
pub async fn list(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<Vec<CartItem>>> {
    let items = CartRepository::new(state.pool.clone())
        .find_by_customer(&customer_id)
        .await?;
    Ok(Json(items))
}

/// POST /api/cart - 加入购物车
///
/// 名称/价格/图片从商品缓存解析后快照进购物车行。
pub async fn add(
    State(state): State<ServerState>,
    Json(data): Json<CartAdd>,
) -> AppResult<Json<CartItem>> {
    if data.quantity < 1 {
        return Err(AppError::validation(format!(
            "Invalid quantity: {}",
            data.quantity
        )));
    }

    let products = ProductRepository::new(state.pool.clone());
    let product = products
        .find_by_code(&data.product_code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", data.product_code)))?;
    let variant = product
        .variants
        .iter()
        .find(|v| v.sku == data.sku)
        .ok_or_else(|| AppError::not_found(format!("Variant {}", data.sku)))?;

    let item = CartItem {
        id: new_id(),
        customer_id: data.customer_id,
        product_code: product.code.clone(),
        sku: variant.sku.clone(),
        name: product.name.clone(),
        unit_price: variant.price,
        quantity: data.quantity,
        image: (!product.image.is_empty()).then(|| product.image.clone()),
    };
    CartRepository::new(state.pool.clone()).add(&item).await?;
    Ok(Json(item))
}

/// PUT /api/cart/line/:line_id - 修改数量 (0 删除)
pub async fn set_quantity(
    State(state): State<ServerState>,
    Path(line_id): Path<String>,
    Json(data): Json<CartUpdateQuantity>,
) -> AppResult<Json<()>> {
    if data.quantity < 0 {
        return Err(AppError::validation(format!(
            "Invalid quantity: {}",
            data.quantity
        )));
    }
    CartRepository::new(state.pool.clone())
        .set_quantity(&line_id, data.quantity)
        .await?;
    Ok(Json(()))
}

/// DELETE /api/cart/line/:line_id - 删除行
pub async fn remove(
    State(state): State<ServerState>,
    Path(line_id): Path<String>,
) -> AppResult<Json<()>> {
    CartRepository::new(state.pool.clone()).remove(&line_id).await?;
    Ok(Json(()))
}
