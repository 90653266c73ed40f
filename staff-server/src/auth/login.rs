//! 登录 / 注册核心逻辑
//!
//! HTTP 层之外的纯业务部分，便于直接测试。

use shared::client::{Identity, RegisterRequest};
use shared::error::{AppError, AuthError, ErrorCode, StoreError, ValidationError};
use shared::models::{Role, UserCreate};
use sqlx::SqlitePool;
use thiserror::Error;

use super::password::{hash_password, verify_password};
use crate::db::repository::{RepoError, user};

/// 最短密码长度
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login failure: credential problem or store problem
#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Auth(e) => e.into(),
            LoginError::Store(e) => e.into(),
        }
    }
}

/// Registration failure
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Email is already registered")]
    EmailTaken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RegisterError> for AppError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Validation(e) => e.into(),
            RegisterError::EmailTaken => AppError::new(ErrorCode::EmailAlreadyRegistered),
            RegisterError::Store(e) => e.into(),
        }
    }
}

/// Verify credentials and return the sanitized identity
///
/// Email match is exact (case-sensitive).
pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Identity, LoginError> {
    let user = user::find_by_email(pool, email)
        .await
        .map_err(StoreError::from)?
        .ok_or(AuthError::NotFound)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(user.identity())
}

/// Create an employee-role account
pub async fn register(pool: &SqlitePool, req: &RegisterRequest) -> Result<Identity, RegisterError> {
    let missing: Vec<String> = [
        ("name", req.name.trim()),
        ("email", req.email.trim()),
        ("password", req.password.as_str()),
        ("confirm_password", req.confirm_password.as_str()),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(k, _)| k.to_string())
    .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing).into());
    }

    if req.password != req.confirm_password {
        return Err(ValidationError::PasswordMismatch.into());
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        }
        .into());
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| StoreError::Unavailable(format!("Failed to hash password: {e}")))?;

    let created = user::create(
        pool,
        UserCreate {
            email: req.email.trim().to_string(),
            username: req.name.trim().to_string(),
            password_hash,
            role: Role::Employee,
        },
    )
    .await;

    match created {
        Ok(user) => Ok(user.identity()),
        Err(RepoError::Duplicate(_)) => Err(RegisterError::EmailTaken),
        Err(e) => Err(StoreError::from(e).into()),
    }
}

/// 首次启动时创建管理员账号 (仅当 users 表为空)
///
/// 返回是否创建了新账号。
pub async fn ensure_bootstrap_admin(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<bool, AppError> {
    if user::count(pool).await? > 0 {
        return Ok(false);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        }
        .into());
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    user::create(
        pool,
        UserCreate {
            email: email.to_string(),
            username: "Administrator".to_string(),
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    tracing::info!(email = %email, "Bootstrap administrator created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn request(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let pool = test_pool().await;
        let created = register(&pool, &request("secret1", "secret1")).await.unwrap();
        assert_eq!(created.role, Role::Employee);
        assert_eq!(created.username, "Ann");

        let identity = authenticate(&pool, "ann@x.com", "secret1").await.unwrap();
        assert_eq!(identity, created);
    }

    #[tokio::test]
    async fn login_failures() {
        let pool = test_pool().await;
        register(&pool, &request("secret1", "secret1")).await.unwrap();

        assert!(matches!(
            authenticate(&pool, "nobody@x.com", "secret1").await,
            Err(LoginError::Auth(AuthError::NotFound))
        ));
        assert!(matches!(
            authenticate(&pool, "ann@x.com", "wrong!!").await,
            Err(LoginError::Auth(AuthError::InvalidCredentials))
        ));
        // case-sensitive identifier
        assert!(matches!(
            authenticate(&pool, "Ann@x.com", "secret1").await,
            Err(LoginError::Auth(AuthError::NotFound))
        ));
    }

    #[tokio::test]
    async fn register_validation() {
        let pool = test_pool().await;

        let err = register(&pool, &request("", "")).await.unwrap_err();
        match err {
            RegisterError::Validation(ValidationError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["password", "confirm_password"]);
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(
            register(&pool, &request("secret1", "secret2")).await,
            Err(RegisterError::Validation(ValidationError::PasswordMismatch))
        ));
        assert!(matches!(
            register(&pool, &request("abc", "abc")).await,
            Err(RegisterError::Validation(ValidationError::PasswordTooShort { min: 6 }))
        ));

        register(&pool, &request("secret1", "secret1")).await.unwrap();
        assert!(matches!(
            register(&pool, &request("secret1", "secret1")).await,
            Err(RegisterError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn bootstrap_admin_only_on_empty_table() {
        let pool = test_pool().await;
        assert!(ensure_bootstrap_admin(&pool, "admin@x.com", "adminpw").await.unwrap());
        assert!(!ensure_bootstrap_admin(&pool, "other@x.com", "adminpw").await.unwrap());

        let admin = authenticate(&pool, "admin@x.com", "adminpw").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
