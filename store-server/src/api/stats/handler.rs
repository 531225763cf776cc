//! Statistics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{DashboardStats, SalesChannel};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// online | physical | summary
    pub channel: SalesChannel,
    /// 1-based month
    pub month: u32,
    pub year: i32,
}

/// GET /api/admin/stats/dashboard - 月度销售统计
pub async fn dashboard(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardStats>> {
    tracing::debug!(
        channel = ?query.channel,
        month = query.month,
        year = query.year,
        "Fetching dashboard statistics"
    );

    let stats = state
        .aggregator()
        .stats(query.channel, query.month, query.year)
        .await?;
    Ok(Json(stats))
}
