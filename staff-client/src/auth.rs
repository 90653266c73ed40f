//! Authenticator seam used by the session manager
//!
//! Any [`HttpClient`] transport is an authenticator; tests plug in fakes.

use async_trait::async_trait;
use shared::client::{LoginRequest, LoginResponse};
use shared::ApiResponse;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a token and identity
    async fn authenticate(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;

    /// Tell the server the session ended
    async fn sign_out(&self) -> ClientResult<()>;

    /// Attach (or detach) the bearer token for later calls
    async fn use_token(&self, token: Option<String>);
}

#[async_trait]
impl<C: HttpClient> Authenticator for C {
    async fn authenticate(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: ApiResponse<LoginResponse> = self.post("/api/auth/login", &req).await?;
        let login = resp
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing login data".to_string()))?;
        self.set_token(Some(login.token.clone())).await;
        Ok(login)
    }

    async fn sign_out(&self) -> ClientResult<()> {
        let _: ApiResponse<()> = self.post_empty("/api/auth/logout").await?;
        Ok(())
    }

    async fn use_token(&self, token: Option<String>) {
        self.set_token(token).await;
    }
}
