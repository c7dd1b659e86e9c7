use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the admin REST API, without a trailing slash.
    pub api_base: String,
    /// Transient-failure retries applied by the retry middleware. 0 disables them.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn normalize_api_base(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_retries_env(value: &str) -> u32 {
    value.trim().parse().unwrap_or(DEFAULT_MAX_RETRIES)
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config {
            api_base: DEFAULT_API_BASE.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        };

        if let Ok(api_base) = std::env::var("API_URL") {
            config.api_base = normalize_api_base(&api_base);
        }
        if let Ok(retries) = std::env::var("API_MAX_RETRIES") {
            config.max_retries = parse_retries_env(&retries);
        }
        config
    }

    pub fn with_api_base(api_base: impl AsRef<str>) -> Self {
        Config {
            api_base: normalize_api_base(api_base.as_ref()),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Joins an absolute API path (`/admin/...`) onto the configured base.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
