//! Error types.
//!
//! Two layers:
//!
//! - typed, recoverable errors per component (`ConfigError`, `FetchError`,
//!   `RenderError`) built with `thiserror`
//! - `AppError`, the fatal process-level error that carries an exit code

use reqwest::StatusCode;
use thiserror::Error;

/// Exit code for configuration problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for a failed startup fetch.
pub const EXIT_STARTUP_FETCH: u8 = 3;
/// Exit code for server/bind failures.
pub const EXIT_SERVER: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(EXIT_CONFIG, format!("Configuration error: {err}"))
    }
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed YAML in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid listen address '{0}'")]
    Address(String),
}

/// Upstream feed failures.
///
/// Messages never include the request URL since it carries the API key.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot build HTTP client: {0}")]
    Client(String),
    #[error("feed request failed: {0}")]
    Network(String),
    #[error("feed request failed with status {status}")]
    Http { status: StatusCode },
    #[error("cannot decode feed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Upstream HTTP status, when the failure carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Chart rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_maps_to_config_exit_code() {
        let err: AppError = ConfigError::Address("nope".to_string()).into();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn http_error_exposes_status() {
        let err = FetchError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.to_string(), "feed request failed with status 500 Internal Server Error");
        assert_eq!(FetchError::Decode("x".into()).status(), None);
    }
}
