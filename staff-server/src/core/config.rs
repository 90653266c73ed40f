use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::utils::time::parse_tz;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/staffeasy.db | SQLite 数据库文件 |
/// | ALLOWED_ORIGIN | (空, 允许任意来源) | CORS 允许的来源 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (空, 仅输出到终端) | 日志目录 (按天滚动) |
/// | BUSINESS_TZ | UTC | 业务时区, 用于计算 "今天" |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | BOOTSTRAP_ADMIN_EMAIL | (空) | 首次启动创建的管理员邮箱 |
/// | BOOTSTRAP_ADMIN_PASSWORD | (空) | 首次启动创建的管理员密码 |
///
/// JWT 相关变量见 [`JwtConfig::from_env`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/staff HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库文件路径, None 时使用 work_dir 下的默认文件
    pub database_path: Option<String>,
    /// CORS 允许的来源
    pub allowed_origin: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 业务时区
    pub business_tz: Tz,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 首次启动管理员 (email, password)
    pub bootstrap_admin: Option<(String, String)>,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值；JWT 密钥无效时报错
    pub fn from_env() -> Result<Self> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            work_dir: env_opt("WORK_DIR").unwrap_or_else(|| "./data".into()),
            http_port: env_opt("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: env_opt("DATABASE_PATH"),
            allowed_origin: env_opt("ALLOWED_ORIGIN"),
            jwt,
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: env_opt("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: env_opt("LOG_DIR"),
            business_tz: env_opt("BUSINESS_TZ")
                .map(|tz| parse_tz(&tz))
                .unwrap_or(Tz::UTC),
            request_timeout_ms: env_opt("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            bootstrap_admin: env_opt("BOOTSTRAP_ADMIN_EMAIL").zip(env_opt("BOOTSTRAP_ADMIN_PASSWORD")),
        })
    }

    /// 测试用配置: 随机 JWT 密钥, 不读取环境变量
    pub fn for_tests(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            database_path: None,
            allowed_origin: None,
            jwt: JwtConfig::ephemeral(),
            environment: "test".into(),
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
            business_tz: Tz::UTC,
            request_timeout_ms: 30000,
            bootstrap_admin: None,
        }
    }

    /// 使用自定义值覆盖部分配置
    pub fn with_overrides(mut self, work_dir: impl Into<String>, http_port: u16) -> Self {
        self.work_dir = work_dir.into();
        self.http_port = http_port;
        self
    }

    /// 数据库文件路径
    pub fn database_file(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.work_dir).join("staffeasy.db"),
        }
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_file_defaults_to_work_dir() {
        let config = Config::for_tests("/tmp/staff");
        assert_eq!(
            config.database_file(),
            PathBuf::from("/tmp/staff/staffeasy.db")
        );

        let config = Config {
            database_path: Some("/srv/db.sqlite".into()),
            ..Config::for_tests("/tmp/staff")
        };
        assert_eq!(config.database_file(), PathBuf::from("/srv/db.sqlite"));
    }

    #[test]
    fn overrides() {
        let config = Config::for_tests("a").with_overrides("b", 8080);
        assert_eq!(config.work_dir, "b");
        assert_eq!(config.http_port, 8080);
        assert!(!config.is_production());
    }
}
