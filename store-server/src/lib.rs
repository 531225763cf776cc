//! Mercat Store Server - 零售门店后端
//!
//! # 架构概述
//!
//! 为 Mercat 购物端与门店管理端提供数据层：
//!
//! - **本地缓存** (`db`): SQLite 关系缓存，所有读路径与仪表盘聚合查询
//! - **远端账本** (`remote`): 文档存储，原子事务与记录镜像
//! - **商品目录** (`catalog`): 商品/规格管理与顺序编号分配器
//! - **订单** (`orders`): 购物车结算与门店销售录入（双账本，只追加）
//! - **统计** (`stats`): 月度销售聚合（线上 / 门店 / 汇总）
//! - **认证** (`auth`): JWT + Argon2 管理端认证
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── utils/         # 错误、日志、时间
//! ├── db/            # 本地缓存与 repository
//! ├── remote/        # 远端账本、文档类型、镜像
//! ├── catalog/       # 商品目录与编号分配器
//! ├── orders/        # 结算与门店销售
//! ├── stats/         # 销售聚合
//! ├── sync/          # 远端 → 本地刷新
//! ├── auth/          # JWT 认证、密码
//! └── api/           # HTTP 路由和处理器
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod orders;
pub mod remote;
pub mod stats;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use auth::{CurrentAdmin, JwtService};
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use stats::SalesAggregator;
pub use sync::SyncService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   __  ___                     __
  /  |/  /__ ___________ _____/ /_
 / /|_/ / -_) __/ __/ _ `/ __/ __/
/_/  /_/\__/_/  \__/\_,_/\__/\__/
    "#
    );
}
