use std::sync::Arc;

use log::info;
use reqwest::cookie::Jar;

use crate::api::{AdminApi, ApiClient, BearerAuthMiddleware};
use crate::auth::{AuthClient, AuthSession, AuthStatus, LoginFlow, RefreshCoordinator, TokenStore};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::routes::{ProtectedRoute, ReturnTo};
use crate::utils::http_utils::{build_http_client, build_retry_client};

/// Everything the admin area needs, constructed once and handed out
/// explicitly.
///
/// Both HTTP clients share one cookie jar; the token store is shared by the
/// session, the bearer middleware and the interceptor.
#[derive(Debug, Clone)]
pub struct AdminApp {
    config: Config,
    tokens: TokenStore,
    auth: AuthClient,
    refresher: RefreshCoordinator,
    session: AuthSession,
    api: ApiClient,
    return_to: ReturnTo,
    login: LoginFlow,
}

impl AdminApp {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_tokens(config, TokenStore::new())
    }

    /// Builds the app around an existing token store, e.g. one a test wants
    /// to inspect or pre-seed.
    pub fn with_tokens(config: Config, tokens: TokenStore) -> Result<Self> {
        url::Url::parse(&config.api_base)?;
        let jar = Arc::new(Jar::default());
        let http = build_http_client(Arc::clone(&jar))?;

        let auth_client = Arc::new(build_retry_client(http.clone(), config.max_retries).build());
        let api_client = Arc::new(
            build_retry_client(http, config.max_retries)
                .with(BearerAuthMiddleware::new(tokens.clone()))
                .build(),
        );

        let auth = AuthClient::new(auth_client, config.clone());
        let refresher = RefreshCoordinator::new(auth.clone());
        let session = AuthSession::new(tokens.clone(), auth.clone(), refresher.clone());
        let api = ApiClient::new(api_client, config.clone(), tokens.clone(), refresher.clone())
            .with_session(session.clone());

        let return_to = ReturnTo::new();
        let login = LoginFlow::new(auth.clone(), session.clone(), return_to.clone());

        info!("Admin client configured for {}", config.api_base);
        Ok(AdminApp {
            config,
            tokens,
            auth,
            refresher,
            session,
            api,
            return_to,
            login,
        })
    }

    /// Resolves the session from the session cookie. Safe to call repeatedly.
    pub async fn start(&self) -> AuthStatus {
        self.session.boot().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresher
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Every handle shares one busy flag, so only one submission is in
    /// flight per app.
    pub fn login_flow(&self) -> LoginFlow {
        self.login.clone()
    }

    pub fn protected_route(&self) -> ProtectedRoute {
        ProtectedRoute::new(self.session.clone(), self.return_to.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        let api: Arc<dyn AdminApi> = Arc::new(self.api.clone());
        Dashboard::new(api)
    }
}
