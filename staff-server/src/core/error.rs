//! 服务器启动/运行错误
//!
//! 请求级错误使用 [`crate::AppError`]；这里只处理进程级失败。

use thiserror::Error;

use crate::AppError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Database(err.message)
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
