use std::sync::Arc;

use log::info;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

use super::endpoints::{LOGIN_PATH, LOGOUT_PATH, REFRESH_PATH};
use crate::config::Config;
use crate::error::Result;
use crate::utils::http_utils::{error_for_status, execute, json_or_error};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl TokenResponse {
    /// The token, or `None` when missing or blank.
    pub fn into_token(self) -> Option<String> {
        self.access_token.filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the token-issuing endpoints (login, refresh, logout).
///
/// Carries the session cookie on every call and never touches the token
/// store: callers decide what to do with the tokens it returns.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Arc<ClientWithMiddleware>,
    config: Config,
}

impl AuthClient {
    pub fn new(client: Arc<ClientWithMiddleware>, config: Config) -> Self {
        AuthClient { client, config }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let url = self.config.url(LOGIN_PATH);
        let builder = self.client.post(&url).json(&Credentials { email, password });
        let response = execute(builder, &format!("POST {LOGIN_PATH}")).await?;
        json_or_error(response).await
    }

    /// Exchanges the session cookie for a fresh access token. `Ok(None)` when
    /// the server answers 2xx without a usable token.
    pub async fn refresh(&self) -> Result<Option<String>> {
        let url = self.config.url(REFRESH_PATH);
        let response = execute(self.client.post(&url), &format!("POST {REFRESH_PATH}")).await?;
        let body: TokenResponse = json_or_error(response).await?;
        Ok(body.into_token())
    }

    pub async fn logout(&self) -> Result<()> {
        let url = self.config.url(LOGOUT_PATH);
        let response = execute(self.client.post(&url), &format!("POST {LOGOUT_PATH}")).await?;
        error_for_status(response).await?;
        info!("Server session closed");
        Ok(())
    }
}
