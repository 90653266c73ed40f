//! 认证授权模块
//!
//! 提供 JWT 认证、密码哈希、登录注册和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_access`] - 资源授权中间件 (见 [`crate::policy`])

pub mod extractor;
pub mod jwt;
pub mod login;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use login::{LoginError, RegisterError, authenticate, ensure_bootstrap_admin, register};
pub use middleware::{CurrentUserExt, require_access, require_auth};
