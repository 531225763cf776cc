//! Sync API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::sync::RefreshSummary;
use crate::utils::AppResult;

/// POST /api/admin/sync/refresh - 从远端账本拉取最新数据
///
/// 仪表盘刷新前的前置步骤；聚合本身只读本地缓存。
pub async fn refresh(State(state): State<ServerState>) -> AppResult<Json<RefreshSummary>> {
    let summary = state.sync().refresh_data().await?;
    Ok(Json(summary))
}
