//! Gateway configuration with validation.
//!
//! Built once at process start and handed to the service by value. Nothing
//! in here changes after startup.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the application's hex-encoded Ed25519 key.
pub const PUBLIC_KEY_ENV: &str = "DISCORD_PUBLIC_KEY";

/// Default route Discord is pointed at.
pub const DEFAULT_ROUTE: &str = "/discord-bot";

/// Default chat-completions endpoint.
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISCORD_PUBLIC_KEY is not set")]
    MissingPublicKey,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Main gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// Request limits
    pub limits: LimitsConfig,
    /// Discord application settings
    pub discord: DiscordConfig,
    /// Completion service (None = echo the query back)
    pub completion: Option<CompletionConfig>,
}

impl GatewayConfig {
    /// Configuration with defaults everywhere except the public key.
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            http: HttpConfig::default(),
            limits: LimitsConfig::default(),
            discord: DiscordConfig {
                public_key: public_key.into(),
            },
            completion: None,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DISCORD_PUBLIC_KEY` (required)
    /// - `GATEWAY_HOST` (default: 0.0.0.0), `PORT` (default: 8000)
    /// - `GATEWAY_ROUTE` (default: /discord-bot)
    /// - `GATEWAY_MAX_BODY_BYTES` (default: 65536)
    /// - `COMPLETION_API_KEY` enables the completion service, tuned by
    ///   `COMPLETION_ENDPOINT`, `COMPLETION_MODEL`, `COMPLETION_SYSTEM_PROMPT`
    ///   and `COMPLETION_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_key = lookup(PUBLIC_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingPublicKey)?;

        let mut config = Self::new(public_key);

        if let Some(host) = parse_var(&lookup, "GATEWAY_HOST")? {
            config.http.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.http.port = port;
        }
        if let Some(route) = lookup("GATEWAY_ROUTE") {
            config.http.route = route;
        }
        if let Some(max) = parse_var(&lookup, "GATEWAY_MAX_BODY_BYTES")? {
            config.limits.max_body_bytes = max;
        }

        if let Some(api_key) = lookup("COMPLETION_API_KEY").filter(|k| !k.trim().is_empty()) {
            let mut completion = CompletionConfig::new(api_key);
            if let Some(endpoint) = lookup("COMPLETION_ENDPOINT") {
                completion.endpoint = endpoint;
            }
            if let Some(model) = lookup("COMPLETION_MODEL") {
                completion.model = model;
            }
            if let Some(prompt) = lookup("COMPLETION_SYSTEM_PROMPT") {
                completion.system_prompt = prompt;
            }
            if let Some(ms) = parse_var::<u64, _>(&lookup, "COMPLETION_TIMEOUT_MS")? {
                completion.timeout = Duration::from_millis(ms);
            }
            config.completion = Some(completion);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord.public_key.trim().is_empty() {
            return Err(ConfigError::MissingPublicKey);
        }

        if !self.http.route.starts_with('/') {
            return Err(ConfigError::InvalidRoute(format!(
                "{:?} must start with '/'",
                self.http.route
            )));
        }
        if matches!(self.http.route.as_str(), "/health" | "/metrics") {
            return Err(ConfigError::InvalidRoute(format!(
                "{} is reserved",
                self.http.route
            )));
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        if let Some(completion) = &self.completion {
            if completion.timeout.is_zero() {
                return Err(ConfigError::InvalidTimeout(
                    "completion timeout cannot be 0".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
    /// Path Discord posts interactions to
    pub route: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            route: DEFAULT_ROUTE.to_string(),
        }
    }
}

/// Request limits
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum accepted body size in bytes
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Discord application settings
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Hex-encoded Ed25519 verifying key from the developer portal
    pub public_key: String,
}

/// Chat-completion service settings
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer token
    pub api_key: String,
    /// Full URL of the chat-completions endpoint
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// System message sent ahead of the user's query
    pub system_prompt: String,
    /// Upper bound for one completion round trip
    pub timeout: Duration,
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            model: "gpt-4".to_string(),
            system_prompt: "You are a helpful chatbot.".to_string(),
            // Discord drops the interaction if we take longer than 3s
            timeout: Duration::from_millis(2500),
        }
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("timeout", &self.timeout)
            .finish()
    }
}
