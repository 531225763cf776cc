//! Sales Aggregation
//!
//! Computes monthly dashboard statistics over the two order ledgers in the
//! local cache. Each channel runs four aggregate queries (revenue, order
//! count, items sold, top-3 best sellers); the summary channel runs both
//! ledgers concurrently, waits for both, and merges. Any sub-query failure
//! fails the whole request; no partial or zeroed stats are ever returned.

pub mod merge;

pub use merge::merge_best_sellers;

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{OrderRepository, PosOrderRepository};
use crate::orders::money;
use crate::utils::{AppResult, time};
use shared::models::{BestSeller, DashboardStats, SalesChannel};

/// Best sellers shown on the dashboard
const TOP_N: usize = 3;

/// One ledger's four aggregates over a range
struct ChannelTotals {
    revenue: f64,
    orders: i64,
    items_sold: i64,
    best_sellers: Vec<BestSeller>,
}

#[derive(Clone)]
pub struct SalesAggregator {
    orders: OrderRepository,
    pos_orders: PosOrderRepository,
    tz: Tz,
}

impl SalesAggregator {
    pub fn new(pool: SqlitePool, tz: Tz) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            pos_orders: PosOrderRepository::new(pool),
            tz,
        }
    }

    /// Dashboard statistics for one channel and one calendar month (1-based)
    pub async fn stats(
        &self,
        channel: SalesChannel,
        month: u32,
        year: i32,
    ) -> AppResult<DashboardStats> {
        let (start, end) = time::month_range_millis(month, year, self.tz)?;

        let totals = match channel {
            SalesChannel::Online => self.online_totals(start, end).await?,
            SalesChannel::Physical => self.physical_totals(start, end).await?,
            SalesChannel::Summary => {
                // Both ledgers query concurrently; the merge waits for both
                let (online, physical) = tokio::try_join!(
                    self.online_totals(start, end),
                    self.physical_totals(start, end),
                )?;
                ChannelTotals {
                    revenue: money::add(online.revenue, physical.revenue),
                    orders: online.orders + physical.orders,
                    items_sold: online.items_sold + physical.items_sold,
                    best_sellers: merge_best_sellers(
                        &online.best_sellers,
                        &physical.best_sellers,
                        TOP_N,
                    ),
                }
            }
        };

        tracing::debug!(
            ?channel,
            month,
            year,
            revenue = totals.revenue,
            orders = totals.orders,
            "Dashboard stats computed"
        );

        Ok(DashboardStats {
            channel,
            month,
            year,
            revenue: totals.revenue,
            orders: totals.orders,
            items_sold: totals.items_sold,
            best_sellers: totals.best_sellers,
        })
    }

    async fn online_totals(&self, start: i64, end: i64) -> AppResult<ChannelTotals> {
        let (revenue, orders, items_sold, best_sellers) = tokio::try_join!(
            self.orders.revenue_between(start, end),
            self.orders.count_between(start, end),
            self.orders.items_sold_between(start, end),
            self.orders.best_sellers_between(start, end),
        )?;
        Ok(ChannelTotals {
            revenue,
            orders,
            items_sold,
            best_sellers,
        })
    }

    async fn physical_totals(&self, start: i64, end: i64) -> AppResult<ChannelTotals> {
        let (revenue, orders, items_sold, best_sellers) = tokio::try_join!(
            self.pos_orders.revenue_between(start, end),
            self.pos_orders.count_between(start, end),
            self.pos_orders.items_sold_between(start, end),
            self.pos_orders.best_sellers_between(start, end),
        )?;
        Ok(ChannelTotals {
            revenue,
            orders,
            items_sold,
            best_sellers,
        })
    }
}
