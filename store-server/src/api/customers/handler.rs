//! Customer API Handlers
//!
//! Profile and address book. Every mutation re-mirrors the full customer
//! document (with embedded addresses) to the remote ledger.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::CustomerRepository;
use crate::remote::RemoteMirror;
use crate::utils::{AppError, AppResult};
use shared::models::{Address, AddressCreate, Customer, CustomerCreate, CustomerUpdate};

/// POST /api/customers - 注册顾客资料
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    if data.name.trim().is_empty() || data.email.trim().is_empty() {
        return Err(AppError::validation("Name and email are required"));
    }

    let repo = CustomerRepository::new(state.pool.clone());
    let customer = repo.create(data).await?;

    RemoteMirror::new(state.remote.clone())
        .upsert_customer(&customer)
        .await?;
    Ok(Json(customer))
}

/// GET /api/customers/:id - 顾客资料
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepository::new(state.pool.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {}", id)))?;
    Ok(Json(customer))
}

/// PUT /api/customers/:id - 更新资料
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let repo = CustomerRepository::new(state.pool.clone());
    let customer = repo.update(&id, data).await?;

    RemoteMirror::new(state.remote.clone())
        .upsert_customer(&customer)
        .await?;
    Ok(Json(customer))
}

/// POST /api/customers/:id/addresses - 新增地址
pub async fn add_address(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<AddressCreate>,
) -> AppResult<Json<Address>> {
    let repo = CustomerRepository::new(state.pool.clone());
    let address = repo.add_address(&id, data).await?;

    // Re-mirror the whole document so the embedded address list stays current
    if let Some(customer) = repo.find_by_id(&id).await? {
        RemoteMirror::new(state.remote.clone())
            .upsert_customer(&customer)
            .await?;
    }
    Ok(Json(address))
}

/// DELETE /api/customers/:id/addresses/:address_id - 删除地址
pub async fn delete_address(
    State(state): State<ServerState>,
    Path((id, address_id)): Path<(String, String)>,
) -> AppResult<Json<()>> {
    let repo = CustomerRepository::new(state.pool.clone());
    repo.delete_address(&id, &address_id).await?;

    if let Some(customer) = repo.find_by_id(&id).await? {
        RemoteMirror::new(state.remote.clone())
            .upsert_customer(&customer)
            .await?;
    }
    Ok(Json(()))
}
