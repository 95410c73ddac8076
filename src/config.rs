use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8500;

/// Location of the user service and how long a single request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: None,
        }
    }
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Reads `MANAGER_API_HOST`, `MANAGER_API_PORT` and `MANAGER_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("MANAGER_API_HOST").unwrap_or(DEFAULT_HOST.to_string());
        let port = match get("MANAGER_API_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| ConfigError::Invalid("MANAGER_API_PORT", port))?,
            None => DEFAULT_PORT,
        };
        let request_timeout = match get("MANAGER_API_TIMEOUT_MS") {
            Some(ms) => Some(Duration::from_millis(
                ms.parse()
                    .map_err(|_| ConfigError::Invalid("MANAGER_API_TIMEOUT_MS", ms))?,
            )),
            None => None,
        };

        Ok(Self {
            host,
            port,
            request_timeout,
        })
    }

    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.authority())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(key, value) => write!(f, "Invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}
