use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 门店后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/mercat/store | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | TIMEZONE | Europe/Madrid | 营业时区 |
/// | REMOTE_LEDGER_URL | ws://127.0.0.1:8000 | 远端账本地址 |
/// | REMOTE_LEDGER_NS | mercat | 远端命名空间 |
/// | REMOTE_LEDGER_DB | store | 远端数据库 |
/// | REMOTE_LEDGER_USER | - | 远端用户名 (可选) |
/// | REMOTE_LEDGER_PASSWORD | - | 远端密码 (可选) |
/// | ADMIN_PASSWORD | - | 首次启动时种子管理员的密码 (可选) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/mercat HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 营业时区 (仪表盘月份区间按此时区计算)
    pub timezone: chrono_tz::Tz,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 远端账本 ===
    /// 远端账本连接串 (ws:// 生产, mem:// 测试)
    pub remote_url: String,
    pub remote_namespace: String,
    pub remote_database: String,
    pub remote_username: Option<String>,
    pub remote_password: Option<String>,

    /// 首次启动时种子管理员账号的密码
    pub admin_password: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/mercat/store".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Madrid),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            remote_url: std::env::var("REMOTE_LEDGER_URL")
                .unwrap_or_else(|_| "ws://127.0.0.1:8000".into()),
            remote_namespace: std::env::var("REMOTE_LEDGER_NS").unwrap_or_else(|_| "mercat".into()),
            remote_database: std::env::var("REMOTE_LEDGER_DB").unwrap_or_else(|_| "store".into()),
            remote_username: std::env::var("REMOTE_LEDGER_USER").ok(),
            remote_password: std::env::var("REMOTE_LEDGER_PASSWORD").ok(),

            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 远端账本登录凭据 (两项都配置时才启用)
    pub fn remote_credentials(&self) -> Option<(&str, &str)> {
        match (&self.remote_username, &self.remote_password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
