use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, ensure_bootstrap_admin};
use crate::core::{Config, Result};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，每个请求克隆一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 手动构造，通常使用 [`ServerState::initialize`]
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. 数据库 (迁移)
    /// 3. 首次启动管理员 (如已配置)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let db_path = config.database_file();
        let db = DbService::new(&db_path.to_string_lossy()).await?;
        tracing::info!(path = %db_path.display(), "Database ready");

        let state = Self::new(config.clone(), db);
        state.bootstrap().await?;
        Ok(state)
    }

    /// 内存数据库状态 (测试 / 进程内客户端)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        let state = Self::new(config, db);
        state.bootstrap().await?;
        Ok(state)
    }

    async fn bootstrap(&self) -> Result<()> {
        if let Some((email, password)) = &self.config.bootstrap_admin {
            ensure_bootstrap_admin(self.pool(), email, password).await?;
        }
        Ok(())
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 业务时区的今天
    pub fn today(&self) -> chrono::NaiveDate {
        crate::utils::time::today_in(self.config.business_tz)
    }
}
