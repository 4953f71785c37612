use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BANNER_MS: u64 = 2500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got \"{value}\"")]
    InvalidNumber { var: &'static str, value: String },
}

/// Dashboard configuration loaded from environment variables.
///
/// | Env Var                          | Default                     |
/// |----------------------------------|-----------------------------|
/// | `DASHBOARD_API_URL`              | `http://localhost:8080/api` |
/// | `DASHBOARD_ORGANIZER_ID`         | unset                       |
/// | `DASHBOARD_API_TOKEN`            | unset                       |
/// | `DASHBOARD_REQUEST_TIMEOUT_SECS` | `30`                        |
/// | `DASHBOARD_BANNER_MS`            | `2500`                      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub organizer_id: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub banner_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let number = |key: &'static str, default: u64| match non_empty(key) {
            None => Ok(default),
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { var: key, value }),
        };

        let api_url = non_empty("DASHBOARD_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_url,
            organizer_id: non_empty("DASHBOARD_ORGANIZER_ID"),
            api_token: non_empty("DASHBOARD_API_TOKEN"),
            request_timeout: Duration::from_secs(number(
                "DASHBOARD_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            banner_ttl: Duration::from_millis(number("DASHBOARD_BANNER_MS", DEFAULT_BANNER_MS)?),
        })
    }
}
