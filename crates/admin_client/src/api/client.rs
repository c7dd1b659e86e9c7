use std::sync::Arc;

use log::{info, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::bearer::bearer_header;
use super::interceptor::{intercept, Interception, RetryState};
use crate::auth::{AuthSession, RefreshCoordinator, TokenStore};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::utils::http_utils::{error_for_status, execute, json_or_error};

/// A request the authenticated client can replay verbatim after a refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    bearer: Option<String>,
    state: RetryState,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            state: RetryState::Normal,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn retry_state(&self) -> RetryState {
        self.state
    }

    fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Client for every non-auth endpoint.
///
/// The middleware stack attaches the current bearer token. A 401 answer
/// goes through one coordinated refresh and one resend; a failed refresh
/// drops the session to guest and hands the original 401 to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Arc<ClientWithMiddleware>,
    config: Config,
    tokens: TokenStore,
    refresher: RefreshCoordinator,
    session: Option<AuthSession>,
}

impl ApiClient {
    pub fn new(
        client: Arc<ClientWithMiddleware>,
        config: Config,
        tokens: TokenStore,
        refresher: RefreshCoordinator,
    ) -> Self {
        ApiClient {
            client,
            config,
            tokens,
            refresher,
            session: None,
        }
    }

    /// Routes irrecoverable refresh failures through the session so its
    /// status follows the cleared token.
    pub fn with_session(mut self, session: AuthSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Sends `request`, returning the 2xx response or an [`ApiError`].
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response> {
        loop {
            let response = self.dispatch(&request).await?;
            let status = response.status();

            match intercept(status, &request.path, request.state) {
                Interception::PassThrough => return error_for_status(response).await,
                Interception::RefreshAndRetry => {
                    request.state = RetryState::Retrying;
                    info!("{} got {status}, refreshing access token", request.label());

                    match self.refresher.fresh_access_token().await {
                        Some(token) => {
                            self.tokens.set(Some(token.clone()));
                            request.bearer = Some(token);
                        }
                        None => {
                            warn!("Refresh failed, giving up on {}", request.label());
                            self.drop_credentials();
                            return error_for_status(response).await;
                        }
                    }
                }
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.send(request).await?;
        json_or_error(response).await
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response> {
        let url = self.config.url(&request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            let value = bearer_header(token)
                .map_err(|e| ApiError::Config(format!("Invalid access token: {e}")))?;
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        execute(builder, &request.label()).await
    }

    fn drop_credentials(&self) {
        match &self.session {
            Some(session) => session.logout_local(),
            None => self.tokens.clear(),
        }
    }
}
