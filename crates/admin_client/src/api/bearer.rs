use async_trait::async_trait;
use http::Extensions;
use log::warn;
use reqwest::header::{HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

use crate::auth::TokenStore;

pub fn bearer_header(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Request-phase step of the authenticated client: reads the token store on
/// every request and attaches `Authorization: Bearer <token>` when a token is
/// held. Requests that already carry an Authorization header are left alone.
#[derive(Debug, Clone)]
pub struct BearerAuthMiddleware {
    tokens: TokenStore,
}

impl BearerAuthMiddleware {
    pub fn new(tokens: TokenStore) -> Self {
        BearerAuthMiddleware { tokens }
    }
}

#[async_trait]
impl Middleware for BearerAuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if !req.headers().contains_key(AUTHORIZATION) {
            if let Some(token) = self.tokens.get() {
                match bearer_header(&token) {
                    Ok(value) => {
                        req.headers_mut().insert(AUTHORIZATION, value);
                    }
                    Err(e) => warn!("Access token is not a valid header value: {e}"),
                }
            }
        }
        next.run(req, extensions).await
    }
}
