use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::adapter::ToolName;
use crate::environment;

pub const DEFAULT_BASE_URL: &str = "https://amd1.mooo.com/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bearer token not configured (set BEARER_TOKEN or [api] bearer_token)")]
    MissingToken,

    #[error("invalid base_url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid {name} endpoint '{path}': {source}")]
    InvalidEndpoint {
        name: &'static str,
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Upstream credential. Never printed, not even through `Debug`.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub news: String,
    pub render: String,
    pub search: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            news: "duck/news".to_string(),
            render: "w3m".to_string(),
            search: "duck/search".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// A blank value is a placeholder and counts as unset.
    #[serde(deserialize_with = "blank_token_as_none")]
    pub bearer_token: Option<BearerToken>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
    pub endpoints: EndpointPaths,
}

fn blank_token_as_none<'de, D>(deserializer: D) -> Result<Option<BearerToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| BearerToken::new(v).ok()))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            endpoints: EndpointPaths::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub features: HashMap<String, bool>,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Config>(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(path) {
            Ok(cfg) => cfg,
            Err(err @ ConfigError::Parse { .. }) => {
                warn!(error = %err, "Using default configuration");
                Self::default()
            }
            Err(_) => Self::default(),
        }
    }

    pub fn load_default() -> Self {
        let exe_dir = std::env::current_exe().ok().and_then(|mut exe_path| {
            exe_path.pop().then_some(exe_path)
        });
        Self::load_from_sources(environment::config_path(), exe_dir.as_deref())
    }

    /// Lookup order: explicit path, then `config.toml` in `exe_dir`, then
    /// built-in defaults.
    pub fn load_from_sources(explicit: Option<PathBuf>, exe_dir: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            info!(path = %path.display(), "Using config from {}", environment::CONFIG_PATH_VAR);
            return Self::load_from_path(path);
        }

        if let Some(dir) = exe_dir {
            let exe_cfg = dir.join("config.toml");
            if exe_cfg.exists() {
                info!(path = %exe_cfg.display(), "Using config next to executable");
                return Self::load_from_path(exe_cfg);
            }
        }

        info!("No config.toml found. Using defaults (all tools enabled).");
        Self::default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(true)
    }

    /// Resolve everything the adapter needs. The token is passed in so the
    /// caller decides where it comes from.
    pub fn adapter_config(&self, token: Option<BearerToken>) -> Result<AdapterConfig, ConfigError> {
        let token = token.ok_or(ConfigError::MissingToken)?;
        let api = &self.api;
        Ok(AdapterConfig {
            endpoints: Endpoints::resolve(&api.base_url, &api.endpoints)?,
            token,
            timeout: Duration::from_secs(api.timeout_secs),
            retry: RetryPolicy {
                max_retries: api.max_retries,
                base_delay: Duration::from_millis(api.retry_backoff_ms),
            },
            user_agent: api.user_agent.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub news: Url,
    pub render: Url,
    pub search: Url,
}

impl Endpoints {
    pub fn resolve(base_url: &str, paths: &EndpointPaths) -> Result<Self, ConfigError> {
        // `Url::join` drops the last path segment unless the base ends in '/'.
        let mut base_str = base_url.trim().to_string();
        if !base_str.ends_with('/') {
            base_str.push('/');
        }
        let base = Url::parse(&base_str).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let join = |name: &'static str, path: &str| {
            base.join(path.trim_start_matches('/'))
                .map_err(|source| ConfigError::InvalidEndpoint { name, path: path.to_string(), source })
        };

        Ok(Self {
            news: join("news", &paths.news)?,
            render: join("render", &paths.render)?,
            search: join("search", &paths.search)?,
        })
    }

    pub fn for_tool(&self, tool: ToolName) -> &Url {
        match tool {
            ToolName::FetchNews => &self.news,
            ToolName::FetchUrl => &self.render,
            ToolName::FetchSearch => &self.search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self { max_retries: 0, base_delay: Duration::ZERO }
    }

    /// Exponential backoff: `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Immutable settings handed to [`crate::RemoteFetchClient::new`].
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub endpoints: Endpoints,
    pub token: BearerToken,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl AdapterConfig {
    /// Defaults for everything except the base URL and credential.
    pub fn new(base_url: &str, token: BearerToken) -> Result<Self, ConfigError> {
        let api = ApiConfig { base_url: base_url.to_string(), ..ApiConfig::default() };
        Config { api, ..Config::default() }.adapter_config(Some(token))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
