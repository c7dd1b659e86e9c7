use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use reqwest::cookie::Jar;
use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Builds the plain HTTP client. Every client built from the same jar sends
/// the same session cookie, so cookies set by login reach refresh/logout.
pub fn build_http_client(jar: Arc<Jar>) -> Result<Client> {
    Client::builder()
        .cookie_provider(jar)
        .default_headers(default_headers())
        .build()
        .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))
}

/// Wraps `client` with transient-failure retries. 4xx responses are never
/// retried here, the 401 path belongs to the interceptor.
pub fn build_retry_client(client: Client, max_retries: u32) -> ClientBuilder {
    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(100), Duration::from_secs(5))
        .build_with_max_retries(max_retries);

    ClientBuilder::new(client).with(RetryTransientMiddleware::new_with_policy(retry_policy))
}

fn default_headers() -> reqwest::header::HeaderMap {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Sends a request and logs its outcome. Transport failures become
/// [`ApiError::Http`]; the status code is left for the caller to inspect.
pub async fn execute(builder: RequestBuilder, label: &str) -> Result<Response> {
    info!("Sending {label}");
    let start_time = Instant::now();

    match builder.send().await {
        Ok(response) => {
            info!(
                "{label} -> {} after {:?}",
                response.status(),
                start_time.elapsed()
            );
            Ok(response)
        }
        Err(e) => {
            error!("Failed HTTP request {label}: {e}");
            if let reqwest_middleware::Error::Reqwest(inner) = &e {
                if inner.is_timeout() {
                    error!("Request timed out");
                }
                if inner.is_connect() {
                    error!("Connection error");
                }
            }
            Err(ApiError::Http(e))
        }
    }
}

/// Passes 2xx responses through and turns anything else into
/// [`ApiError::Status`], keeping the server's `error` text when present.
pub async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body);
    warn!(
        "Request failed with status {status}: {}",
        message.as_deref().unwrap_or("<no message>")
    );
    Err(ApiError::Status { status, message })
}

pub async fn json_or_error<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = error_for_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}
