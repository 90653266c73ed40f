//! Session manager
//!
//! ```text
//! Unauthenticated ──login ok──▶ Authenticated ──logout──▶ Unauthenticated
//!                               Authenticated ──login ok──▶ Authenticated (identity replaced)
//! ```
//!
//! 登录失败不改变当前状态。

use serde::Serialize;
use shared::client::Identity;
use shared::util::{now_millis, now_secs};
use tokio::sync::RwLock;

use super::storage::{SessionStorage, StoredSession};
use crate::ClientResult;
use crate::auth::Authenticator;

/// Snapshot for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub user: Option<Identity>,
    pub is_authenticated: bool,
    /// true until the first restore attempt finishes
    pub is_loading: bool,
}

#[derive(Debug, Default)]
struct Inner {
    session: Option<StoredSession>,
    restored: bool,
}

/// Owns the current identity and its persisted copy
pub struct SessionManager<A: Authenticator> {
    authenticator: A,
    storage: SessionStorage,
    inner: RwLock<Inner>,
}

impl<A: Authenticator> SessionManager<A> {
    pub fn new(authenticator: A, storage: SessionStorage) -> Self {
        Self {
            authenticator,
            storage,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Underlying transport (for API calls with the session token)
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Log in and persist the session
    ///
    /// On failure the current session, if any, is kept.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Identity> {
        let resp = match self.authenticator.authenticate(email, password).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Login failed");
                return Err(e);
            }
        };

        let session = StoredSession {
            user: resp.user,
            token: resp.token,
            expires_at: resp.expires_at,
            logged_in_at: now_millis(),
        };

        // 持有写锁期间落盘, 内存与存储一起更新
        let mut inner = self.inner.write().await;
        self.authenticator.use_token(Some(session.token.clone())).await;
        if let Err(e) = self.storage.save(&session).await {
            tracing::warn!(error = %e, path = %self.storage.path().display(), "Failed to persist session");
        }

        let identity = session.user.clone();
        inner.session = Some(session);
        inner.restored = true;
        tracing::info!(user_id = identity.id, role = %identity.role, "Logged in");
        Ok(identity)
    }

    /// Clear the session; always succeeds
    pub async fn logout(&self) {
        let had_session = self.inner.read().await.session.is_some();
        if had_session && let Err(e) = self.authenticator.sign_out().await {
            tracing::debug!(error = %e, "Server logout failed, clearing locally");
        }

        let mut inner = self.inner.write().await;
        self.authenticator.use_token(None).await;
        if let Err(e) = self.storage.clear().await {
            tracing::warn!(error = %e, "Failed to remove stored session");
        }
        inner.session = None;
        inner.restored = true;
    }

    /// Load a persisted session from a previous run
    ///
    /// Corrupt or expired data is discarded; never fails.
    pub async fn restore_session(&self) -> Option<Identity> {
        let restored = match self.storage.load().await {
            Ok(Some(session)) if !session.is_expired(now_secs()) => Some(session),
            Ok(Some(_)) => {
                tracing::info!("Stored session expired, discarding");
                self.discard().await;
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Stored session unreadable, discarding");
                self.discard().await;
                None
            }
        };

        self.authenticator
            .use_token(restored.as_ref().map(|s| s.token.clone()))
            .await;

        let identity = restored.as_ref().map(|s| s.user.clone());
        let mut inner = self.inner.write().await;
        inner.session = restored;
        inner.restored = true;
        identity
    }

    async fn discard(&self) {
        if let Err(e) = self.storage.clear().await {
            tracing::warn!(error = %e, "Failed to remove stored session");
        }
    }

    pub async fn state(&self) -> SessionState {
        let inner = self.inner.read().await;
        let user = inner.session.as_ref().map(|s| s.user.clone());
        SessionState {
            is_authenticated: user.is_some(),
            user,
            is_loading: !inner.restored,
        }
    }

    pub async fn current_user(&self) -> Option<Identity> {
        self.inner.read().await.session.as_ref().map(|s| s.user.clone())
    }

    /// Bearer token of the current session
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.session.as_ref().map(|s| s.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use async_trait::async_trait;
    use shared::client::LoginResponse;
    use shared::error::AuthError;
    use shared::models::Role;
    use std::sync::Mutex;

    /// Fixed account table in place of a server
    #[derive(Default)]
    struct FakeAuth {
        token: Mutex<Option<String>>,
        sign_outs: Mutex<u32>,
    }

    #[async_trait]
    impl Authenticator for FakeAuth {
        async fn authenticate(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
            tokio::task::yield_now().await;
            let (id, username, role) = match email {
                "admin@staffeasy.test" => (1, "Ada", Role::Admin),
                "erin@staffeasy.test" => (2, "Erin", Role::Employee),
                _ => return Err(AuthError::NotFound.into()),
            };
            if password != "secret123" {
                return Err(AuthError::InvalidCredentials.into());
            }
            let token = format!("token-{id}");
            *self.token.lock().unwrap() = Some(token.clone());
            Ok(LoginResponse {
                token,
                user: Identity {
                    id,
                    email: email.into(),
                    username: username.into(),
                    role,
                },
                expires_at: now_secs() + 3600,
            })
        }

        async fn sign_out(&self) -> ClientResult<()> {
            *self.sign_outs.lock().unwrap() += 1;
            Ok(())
        }

        async fn use_token(&self, token: Option<String>) {
            *self.token.lock().unwrap() = token;
        }
    }

    fn manager(dir: &std::path::Path) -> SessionManager<FakeAuth> {
        SessionManager::new(FakeAuth::default(), SessionStorage::new(dir))
    }

    #[tokio::test]
    async fn starts_loading_and_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        let state = m.state().await;
        assert!(state.is_loading);
        assert!(!state.is_authenticated);

        assert!(m.restore_session().await.is_none());
        assert!(!m.state().await.is_loading);
    }

    #[tokio::test]
    async fn login_sets_and_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());

        let identity = m.login("admin@staffeasy.test", "secret123").await.unwrap();
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.username, "Ada");

        let state = m.state().await;
        assert!(state.is_authenticated);
        assert_eq!(state.user, Some(identity.clone()));
        assert_eq!(m.token().await.as_deref(), Some("token-1"));
        assert_eq!(m.authenticator().token.lock().unwrap().as_deref(), Some("token-1"));

        let stored = m.storage.load().await.unwrap().unwrap();
        assert_eq!(stored.user, identity);
    }

    #[tokio::test]
    async fn failed_login_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());

        let err = m.login("admin@staffeasy.test", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::InvalidCredentials)));
        let err = m.login("ghost@staffeasy.test", "secret123").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::NotFound)));
        assert!(!m.state().await.is_authenticated);

        m.login("erin@staffeasy.test", "secret123").await.unwrap();
        m.login("admin@staffeasy.test", "wrong").await.unwrap_err();
        assert_eq!(m.current_user().await.unwrap().email, "erin@staffeasy.test");
        assert_eq!(m.authenticator().token.lock().unwrap().as_deref(), Some("token-2"));
    }

    #[tokio::test]
    async fn relogin_replaces_identity() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        m.login("erin@staffeasy.test", "secret123").await.unwrap();
        m.login("admin@staffeasy.test", "secret123").await.unwrap();
        assert_eq!(m.current_user().await.unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn racing_login_and_logout_keep_storage_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        m.login("erin@staffeasy.test", "secret123").await.unwrap();

        for _ in 0..20 {
            let _ = tokio::join!(m.login("admin@staffeasy.test", "secret123"), m.logout());

            let stored = m.storage.load().await.unwrap().map(|s| s.user);
            let current = m.current_user().await;
            assert_eq!(stored, current);

            let session_token = m.token().await;
            let transport_token = m.authenticator().token.lock().unwrap().clone();
            assert_eq!(session_token, transport_token);
        }
    }

    #[tokio::test]
    async fn restore_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let first = manager(dir.path());
        let identity = first.login("erin@staffeasy.test", "secret123").await.unwrap();

        let second = manager(dir.path());
        assert_eq!(second.restore_session().await, Some(identity));
        assert!(second.state().await.is_authenticated);
        assert_eq!(
            second.authenticator().token.lock().unwrap().as_deref(),
            Some("token-2")
        );
    }

    #[tokio::test]
    async fn logout_then_restore_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        m.login("erin@staffeasy.test", "secret123").await.unwrap();
        m.logout().await;

        assert!(!m.state().await.is_authenticated);
        assert_eq!(*m.authenticator().sign_outs.lock().unwrap(), 1);
        assert!(m.authenticator().token.lock().unwrap().is_none());

        let fresh = manager(dir.path());
        assert!(fresh.restore_session().await.is_none());
        assert!(!fresh.state().await.is_authenticated);
    }

    #[tokio::test]
    async fn logout_without_session_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        m.logout().await;
        assert_eq!(*m.authenticator().sign_outs.lock().unwrap(), 0);
        assert!(!m.state().await.is_authenticated);
    }

    #[tokio::test]
    async fn corrupt_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        tokio::fs::write(m.storage.path(), b"garbage").await.unwrap();

        assert!(m.restore_session().await.is_none());
        assert!(!m.state().await.is_authenticated);
        assert!(!m.storage.path().exists());
    }

    #[tokio::test]
    async fn expired_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        let identity = Identity {
            id: 2,
            email: "erin@staffeasy.test".into(),
            username: "Erin".into(),
            role: Role::Employee,
        };
        m.storage
            .save(&StoredSession {
                user: identity,
                token: "old".into(),
                expires_at: now_secs() - 10,
                logged_in_at: 0,
            })
            .await
            .unwrap();

        assert!(m.restore_session().await.is_none());
        assert!(!m.storage.path().exists());
    }
}
