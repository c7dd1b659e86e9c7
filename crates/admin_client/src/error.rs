use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest_middleware::Error),

    #[error(
        "Request failed with status {status}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Status {
        status: StatusCode,
        /// The server's `error` text (or plain-text body), when it sent one.
        message: Option<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(reqwest_middleware::Error::Reqwest(err))
    }
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(reqwest_middleware::Error::Reqwest(err)) => err.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Server-provided message for status errors.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures surfaced to the login form. None of them change the session status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The server rejected the credentials; carries its `error` text verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("No access token received from server")]
    MissingToken,

    #[error("Login already in progress")]
    Busy,

    #[error("Login failed")]
    Failed,
}
