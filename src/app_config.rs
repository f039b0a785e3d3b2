// Centralized configuration management for the Link Checker
// Load ALL env vars ONCE at startup, then pass the config through AppState

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

pub const DEFAULT_URLSCAN_API_URL: &str = "https://urlscan.io/api/v1";
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_DELAY_MS: u64 = 2000;
pub const DEFAULT_LOG_FILTER: &str = "link_checker=debug,tower_http=info";
const MAX_POLL_ATTEMPTS: u32 = 50;

/// Complete application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub scanner: ScannerConfig,
    pub allow_list: AllowListConfig,
    pub cors_allowed_origins: Vec<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub environment: Environment,
    pub rust_log: String,
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// urlscan.io provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub referer: String,
    pub poll_attempts: u32,
    pub poll_delay_ms: u64,
    pub http_timeout_secs: u64,
}

impl ScannerConfig {
    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_URLSCAN_API_URL.to_string(),
            referer: "https://localhost".to_string(),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_delay_ms: DEFAULT_POLL_DELAY_MS,
            http_timeout_secs: 10,
        }
    }
}

// Never print the API key
impl std::fmt::Debug for ScannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScannerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("referer", &self.referer)
            .field("poll_attempts", &self.poll_attempts)
            .field("poll_delay_ms", &self.poll_delay_ms)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

/// Allow-list settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowListConfig {
    pub enabled: bool,
    pub extra_hosts: Vec<String>,
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_hosts: Vec::new(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("scanner", &self.scanner)
            .field("allow_list", &self.allow_list)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Helper function to get optional env var with default
        let get_or_default = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // Helper function to get optional, non-empty env var
        let get_optional = |key: &str| -> Option<String> {
            env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_bool_or_default = |key: &str, default: &str| -> bool {
            get_or_default(key, default).to_lowercase() == "true"
        };

        let split_list = |raw: String| -> Vec<String> {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let environment = Environment::from(get_or_default("ENVIRONMENT", "development"));

        // PORT is the listening port; BIND_ADDRESS wins when both are set
        let port: u16 = get_or_default("PORT", "3000").parse().map_err(|_| {
            ConfigError::InvalidValue("PORT".to_string(), "not a valid port".to_string())
        })?;
        let bind_address = get_or_default("BIND_ADDRESS", &format!("0.0.0.0:{}", port));
        let port = bind_address
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(port);

        let api_key = get_optional("URLSCAN_API_KEY");
        if api_key.is_none() && environment == Environment::Production {
            return Err(ConfigError::MissingVar("URLSCAN_API_KEY".to_string()));
        }

        let api_url = get_or_default("URLSCAN_API_URL", DEFAULT_URLSCAN_API_URL)
            .trim_end_matches('/')
            .to_string();
        if url::Url::parse(&api_url).is_err() {
            return Err(ConfigError::InvalidValue(
                "URLSCAN_API_URL".to_string(),
                "not a valid URL".to_string(),
            ));
        }

        let poll_attempts =
            parse_or_default("SCAN_POLL_ATTEMPTS", &DEFAULT_POLL_ATTEMPTS.to_string())?;
        if poll_attempts == 0 || poll_attempts > MAX_POLL_ATTEMPTS {
            return Err(ConfigError::InvalidValue(
                "SCAN_POLL_ATTEMPTS".to_string(),
                format!("must be between 1 and {}", MAX_POLL_ATTEMPTS),
            ));
        }

        let scanner = ScannerConfig {
            api_key,
            api_url,
            referer: get_or_default("SCAN_REFERER", "https://localhost"),
            poll_attempts,
            poll_delay_ms: parse_u64_or_default(
                "SCAN_POLL_DELAY_MS",
                &DEFAULT_POLL_DELAY_MS.to_string(),
            )?,
            http_timeout_secs: parse_u64_or_default("SCAN_HTTP_TIMEOUT_SECS", "10")?,
        };

        let allow_list = AllowListConfig {
            enabled: parse_bool_or_default("ALLOW_LIST_ENABLED", "true"),
            extra_hosts: split_list(get_or_default("ALLOW_LIST_EXTRA", "")),
        };

        Ok(AppConfig {
            server: ServerConfig {
                bind_address,
                port,
                environment,
                rust_log: get_or_default("RUST_LOG", DEFAULT_LOG_FILTER),
            },
            scanner,
            allow_list,
            cors_allowed_origins: split_list(get_or_default("CORS_ALLOWED_ORIGINS", "*")),
        })
    }

    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0:3000".to_string(),
                port: 3000,
                environment: Environment::Development,
                rust_log: DEFAULT_LOG_FILTER.to_string(),
            },
            scanner: ScannerConfig::default(),
            allow_list: AllowListConfig::default(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}
