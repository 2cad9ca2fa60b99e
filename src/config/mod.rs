//! YAML configuration file.
//!
//! The file is optional: when it is missing we log a warning and run with
//! defaults (which means `DEMO_KEY` against the public NeoWs endpoint).
//! A file that exists but does not parse is fatal.

use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{trace, warn};

use crate::error::ConfigError;

/// Default config filename, relative to the working directory.
pub const CONFIG: &str = "conf.yaml";
/// Public NeoWs REST base.
pub const DEFAULT_API_URL: &str = "https://api.nasa.gov/neo/rest/v1";
/// NASA's shared, heavily rate-limited key.
pub const DEMO_KEY: &str = "DEMO_KEY";
/// Environment variable overriding `apikey`.
pub const API_KEY_ENV: &str = "NEO_API_KEY";

const DEFAULT_PORT: &str = ":10443";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// NeoWs API key. Empty means `DEMO_KEY`.
    pub apikey: String,
    /// Listen address, either `:port` or `host:port`.
    pub port: String,
    /// Upstream REST base, without the trailing `/feed`.
    pub api_url: String,
    /// Upstream request timeout, in seconds.
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            apikey: String::new(),
            port: DEFAULT_PORT.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load `fname`, falling back to defaults when the file does not exist.
    #[tracing::instrument]
    pub fn load(fname: &Path) -> Result<Config, ConfigError> {
        trace!("loading config");
        let path = fname.display().to_string();

        let data = match fs::read_to_string(fname) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("no configuration file at {path}, using defaults");
                return Ok(Config::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        // An empty document is valid YAML but deserializes to unit, not a map.
        if data.trim().is_empty() {
            warn!("configuration file {path} is empty, using defaults");
            return Ok(Config::default());
        }

        serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply `NEO_API_KEY` (from the environment or a `.env` file) on top of the file.
    pub fn with_env_overrides(mut self) -> Self {
        dotenvy::dotenv().ok();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.apikey = key;
            }
        }
        self
    }

    /// The key actually sent upstream.
    pub fn api_key(&self) -> &str {
        let key = self.apikey.trim();
        if key.is_empty() { DEMO_KEY } else { key }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }

    /// Resolve `port` into a bindable address.
    ///
    /// `:10443` binds every interface, like Go's `net/http` does.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.port.trim();
        let candidate = if let Some(port) = raw.strip_prefix(':') {
            format!("0.0.0.0:{port}")
        } else if raw.parse::<u16>().is_ok() {
            format!("0.0.0.0:{raw}")
        } else {
            raw.to_string()
        };
        candidate
            .parse()
            .map_err(|_| ConfigError::Address(self.port.clone()))
    }
}
