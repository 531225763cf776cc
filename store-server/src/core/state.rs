use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, password};
use crate::catalog::CatalogService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::AdminRepository;
use crate::orders::OrderService;
use crate::remote::RemoteLedger;
use crate::stats::SalesAggregator;
use crate::sync::SyncService;
use crate::utils::{AppError, AppResult};
use shared::models::AdminUser;
use shared::util::{new_id, now_millis};

/// 服务器状态 - 持有所有共享句柄
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 本地缓存 (SQLite) |
/// | remote | RemoteLedger | 远端文档账本 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 本地缓存连接池
    pub pool: SqlitePool,
    /// 远端账本连接
    pub remote: RemoteLedger,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 本地数据库 (work_dir/database/store.db)
    /// 3. 远端账本连接
    /// 4. 种子管理员 (首次启动)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("store.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let remote = RemoteLedger::connect(
            &config.remote_url,
            &config.remote_namespace,
            &config.remote_database,
            config.remote_credentials(),
        )
        .await?;

        let state = Self {
            config: config.clone(),
            pool: db_service.pool,
            remote,
            jwt_service: Arc::new(JwtService::new(config.jwt.clone())),
        };

        state.seed_default_admin().await?;
        Ok(state)
    }

    /// 首次启动时创建默认管理员
    ///
    /// 仅当 admins 表为空且配置了 ADMIN_PASSWORD 时生效。
    async fn seed_default_admin(&self) -> AppResult<()> {
        let admins = AdminRepository::new(self.pool.clone());
        if admins.count().await? > 0 {
            return Ok(());
        }

        match &self.config.admin_password {
            Some(password) => {
                let admin = AdminUser {
                    id: new_id(),
                    username: "admin".into(),
                    password_hash: password::hash_password(password)?,
                    display_name: "Administrator".into(),
                    is_active: true,
                    created_at: now_millis(),
                };
                admins.insert(&admin).await?;
                tracing::info!("Seeded default admin user 'admin'");
            }
            None => {
                tracing::warn!(
                    "No admin users exist and ADMIN_PASSWORD is not set; back office is unreachable"
                );
            }
        }
        Ok(())
    }

    // ========== Service accessors ==========

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.pool.clone(), self.remote.clone())
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.pool.clone(), self.remote.clone())
    }

    pub fn aggregator(&self) -> SalesAggregator {
        SalesAggregator::new(self.pool.clone(), self.config.timezone)
    }

    pub fn sync(&self) -> SyncService {
        SyncService::new(self.pool.clone(), self.remote.clone())
    }
}
