//! Response-phase decision for the authenticated client.
//!
//! ```text
//! NORMAL --401, not an auth endpoint--> RETRYING --refresh ok--> resend once
//!                                               --refresh failed--> original error
//! RETRYING --any response--> final outcome
//! ```

use reqwest::StatusCode;

use crate::auth::endpoints::is_auth_endpoint;

/// Per-request flag: has this request already been resent after a refresh?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryState {
    #[default]
    Normal,
    Retrying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Hand the response (or its error) to the caller as is.
    PassThrough,
    /// Refresh the access token once, then resend the request.
    RefreshAndRetry,
}

pub fn intercept(status: StatusCode, path: &str, state: RetryState) -> Interception {
    if status != StatusCode::UNAUTHORIZED {
        return Interception::PassThrough;
    }
    if is_auth_endpoint(path) {
        return Interception::PassThrough;
    }
    match state {
        RetryState::Normal => Interception::RefreshAndRetry,
        RetryState::Retrying => Interception::PassThrough,
    }
}
