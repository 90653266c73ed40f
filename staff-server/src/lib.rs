//! StaffEasy Server - 员工管理后端
//!
//! # 架构概述
//!
//! - **会话** (`auth`): 邮箱 + 密码登录, Argon2 哈希, JWT 令牌
//! - **授权策略** (`policy`): 角色 → 资源的访问判定
//! - **请假流程** (`time_off`): 提交、撤回、审批
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx)
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! staff-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务
//! ├── auth/          # JWT、登录注册、中间件
//! ├── policy/        # 角色与资源
//! ├── time_off/      # 请假生命周期
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、日期、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod policy;
pub mod time_off;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env 并初始化日志
///
/// 日志参数直接读环境变量 (LOG_LEVEL / LOG_JSON / LOG_DIR)，
/// 这样配置加载失败时也有日志输出。
pub fn setup_environment() -> anyhow::Result<()> {
    if let Err(e) = dotenv::dotenv() {
        // .env 可选
        eprintln!("No .env loaded: {e}");
    }

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __        __________
  / ___// /_____ _/ __/ __/ ___  ____ ________  __
  \__ \/ __/ __ `/ /_/ /_/ _ \/ __ `/ ___/ / / /
 ___/ / /_/ /_/ / __/ __/  __/ /_/ (__  ) /_/ /
/____/\__/\__,_/_/ /_/  \___/\__,_/____/\__, /
                                       /____/
    "#
    );
}
