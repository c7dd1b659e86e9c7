use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, OnceCell};

use super::auth_client::AuthClient;
use super::refresh::RefreshCoordinator;
use super::token_store::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Loading,
    Authed,
    Guest,
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AuthStatus::Loading => "loading",
            AuthStatus::Authed => "authed",
            AuthStatus::Guest => "guest",
        };
        f.write_str(label)
    }
}

/// UI-facing authentication state.
///
/// Starts in `loading`; [`AuthSession::boot`] resolves it to `authed` or
/// `guest`. Afterwards it only moves through [`AuthSession::set_authed`],
/// [`AuthSession::logout_local`] and [`AuthSession::logout`]. Cloning shares
/// the same session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    tokens: TokenStore,
    auth: AuthClient,
    refresher: RefreshCoordinator,
    status: watch::Sender<AuthStatus>,
    booted: OnceCell<()>,
}

impl AuthSession {
    pub fn new(tokens: TokenStore, auth: AuthClient, refresher: RefreshCoordinator) -> Self {
        let (status, _) = watch::channel(AuthStatus::Loading);
        AuthSession {
            inner: Arc::new(SessionInner {
                tokens,
                auth,
                refresher,
                status,
                booted: OnceCell::new(),
            }),
        }
    }

    pub fn status(&self) -> AuthStatus {
        *self.inner.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.inner.status.subscribe()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Attempts a silent refresh from the session cookie. Runs at most once
    /// per session no matter how often it is called; concurrent callers wait
    /// for the same attempt. Returns the status afterwards.
    pub async fn boot(&self) -> AuthStatus {
        self.inner
            .booted
            .get_or_init(|| async {
                info!("Booting admin session");
                match self.inner.refresher.fresh_access_token().await {
                    Some(token) => self.set_authed(token),
                    None => {
                        // A login that landed while boot was in flight wins.
                        if self.status() == AuthStatus::Loading {
                            self.logout_local();
                        }
                    }
                }
            })
            .await;
        self.status()
    }

    pub fn has_booted(&self) -> bool {
        self.inner.booted.initialized()
    }

    /// Waits until the status has left `loading`.
    pub async fn resolved(&self) -> AuthStatus {
        let mut rx = self.subscribe();
        let resolved = rx
            .wait_for(|status| *status != AuthStatus::Loading)
            .await
            .map(|status| *status);
        resolved.unwrap_or_else(|_| self.status())
    }

    pub fn set_authed(&self, token: impl Into<String>) {
        let token = token.into();
        if token.trim().is_empty() {
            warn!("Ignoring blank access token, session stays {}", self.status());
            return;
        }
        self.inner.tokens.set(Some(token));
        self.transition(AuthStatus::Authed);
    }

    pub fn logout_local(&self) {
        self.inner.tokens.clear();
        self.transition(AuthStatus::Guest);
    }

    /// Closes the server session, then drops to `guest`. A failing logout
    /// call is logged and otherwise ignored.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.auth.logout().await {
            warn!("Logout request failed: {e}");
        }
        self.logout_local();
    }

    fn transition(&self, next: AuthStatus) {
        let previous = self.inner.status.send_replace(next);
        if previous != next {
            info!("Auth status {previous} -> {next}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::utils::http_utils::{build_http_client, build_retry_client};

    fn offline_session() -> AuthSession {
        let jar = Arc::new(reqwest::cookie::Jar::default());
        let client = build_http_client(jar).expect("client");
        let client = Arc::new(build_retry_client(client, 0).build());
        let auth = AuthClient::new(client, Config::with_api_base("http://127.0.0.1:9"));
        let refresher = RefreshCoordinator::new(auth.clone());
        AuthSession::new(TokenStore::new(), auth, refresher)
    }

    #[test]
    fn starts_loading() {
        let session = offline_session();
        assert_eq!(session.status(), AuthStatus::Loading);
        assert!(!session.has_booted());
    }

    #[test]
    fn set_authed_and_logout_local_flip_status_and_token() {
        let session = offline_session();

        session.set_authed("abc");
        assert_eq!(session.status(), AuthStatus::Authed);
        assert_eq!(session.tokens().get().as_deref(), Some("abc"));

        session.logout_local();
        assert_eq!(session.status(), AuthStatus::Guest);
        assert_eq!(session.tokens().get(), None);
    }

    #[test]
    fn blank_token_does_not_authenticate() {
        let session = offline_session();
        session.set_authed("  ");
        assert_eq!(session.status(), AuthStatus::Loading);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let session = offline_session();
        let mut rx = session.subscribe();

        session.set_authed("abc");
        rx.changed().await.expect("changed");
        assert_eq!(*rx.borrow_and_update(), AuthStatus::Authed);
    }

    #[tokio::test]
    async fn resolved_waits_for_first_decision() {
        let session = offline_session();
        let waiter = session.clone();

        let (status, ()) = tokio::join!(waiter.resolved(), async {
            tokio::task::yield_now().await;
            session.logout_local();
        });
        assert_eq!(status, AuthStatus::Guest);
        assert_eq!(session.resolved().await, AuthStatus::Guest);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AuthStatus::Guest).unwrap(), "\"guest\"");
        assert_eq!(AuthStatus::Loading.to_string(), "loading");
    }
}
