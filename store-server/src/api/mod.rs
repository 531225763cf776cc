//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理端登录
//! - [`products`] - 商品浏览 + 后台商品管理
//! - [`cart`] - 购物车
//! - [`checkout`] - 下单
//! - [`orders`] - 在线订单查询
//! - [`customers`] - 顾客资料与地址簿
//! - [`promotions`] - 促销活动
//! - [`pos`] - 门店销售录入
//! - [`stats`] - 销售仪表盘
//! - [`sync`] - 远端账本同步

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod customers;
pub mod health;
pub mod orders;
pub mod pos;
pub mod products;
pub mod promotions;
pub mod stats;
pub mod sync;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_admin_auth;
use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(promotions::router())
        .merge(pos::router())
        .merge(stats::router())
        .merge(sync::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
