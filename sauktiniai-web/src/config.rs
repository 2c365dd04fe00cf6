//! Startup configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::api::{DEFAULT_BASE_URL, RegistryConfig};
use crate::web::SessionConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("BIND_ADDR is not a socket address: {value:?}")]
    InvalidAddr { value: String },
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Data API client settings (`REGISTRY_API_URL`, `REGISTRY_TIMEOUT_SECS`)
    pub registry: RegistryConfig,

    /// Serve mock data from this directory instead (`REGISTRY_MOCK_DIR`)
    pub mock_dir: Option<PathBuf>,

    /// Listen address (`BIND_ADDR`)
    pub bind_addr: SocketAddr,

    /// Session store settings (`SESSION_TTL_SECS`)
    pub sessions: SessionConfig,

    /// Static assets directory (`STATIC_DIR`)
    pub static_dir: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut registry = RegistryConfig::new();
        match get("REGISTRY_API_URL") {
            Some(url) => registry = registry.with_base_url(url.trim()),
            None => warn!("REGISTRY_API_URL not set, using {DEFAULT_BASE_URL}"),
        }
        if let Some(secs) = positive(&get, "REGISTRY_TIMEOUT_SECS")? {
            registry = registry.with_timeout(secs);
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr { value: bind_addr })?;

        let mut sessions = SessionConfig::default();
        if let Some(secs) = positive(&get, "SESSION_TTL_SECS")? {
            sessions.ttl = Duration::from_secs(secs);
        }

        Ok(Self {
            registry,
            mock_dir: get("REGISTRY_MOCK_DIR").map(PathBuf::from),
            bind_addr,
            sessions,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        })
    }
}

fn positive(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = get(var) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}
