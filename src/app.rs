//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initialises logging and loads the config
//! - performs the startup fetch (fatal on failure)
//! - serves until shutdown

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use crate::config::Config;
use crate::data::{FeedSource, NeoWsClient};
use crate::error::{AppError, EXIT_CONFIG, EXIT_STARTUP_FETCH};
use crate::server::{self, AppState};
use crate::store::{DatasetStore, LoadSummary};

/// Entry point for the `neo` binary.
pub async fn run() -> Result<(), AppError> {
    crate::logging::init_logging();

    let cli = crate::cli::Cli::parse();
    let config = Config::load(&cli.config)?.with_env_overrides();
    let addr = config.listen_addr()?;

    let client = NeoWsClient::new(&config)
        .map_err(|e| AppError::new(EXIT_CONFIG, e.to_string()))?;
    let state = Arc::new(AppState::new(DatasetStore::new(client), config.timeout()));

    // The server never starts on an empty dataset.
    initial_load(&state.store, (state.today)()).await?;

    server::serve(addr, state).await
}

/// First load before serving. Any failure is fatal.
pub async fn initial_load<S: FeedSource>(
    store: &DatasetStore<S>,
    date: NaiveDate,
) -> Result<LoadSummary, AppError> {
    let summary = store.load(date).await.map_err(|e| {
        AppError::new(EXIT_STARTUP_FETCH, format!("Initial fetch failed for {date}: {e}"))
    })?;
    info!(
        as_of = %summary.as_of,
        hazardous = summary.hazardous,
        "initial dataset loaded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use reqwest::StatusCode;

    use crate::domain::{FeedResponse, NearEarthObject};
    use crate::error::FetchError;

    /// Hands out a single prepared result.
    struct Once(Mutex<Option<Result<FeedResponse, FetchError>>>);

    impl Once {
        fn new(result: Result<FeedResponse, FetchError>) -> Self {
            Self(Mutex::new(Some(result)))
        }
    }

    impl FeedSource for Once {
        async fn fetch_feed(&self, _start_date: NaiveDate) -> Result<FeedResponse, FetchError> {
            self.0
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(FetchError::Network("exhausted".into())))
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[tokio::test]
    async fn startup_upstream_error_is_fatal() {
        let store = DatasetStore::new(Once::new(Err(FetchError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
        })));

        let err = initial_load(&store, day()).await.unwrap_err();
        assert_eq!(err.exit_code(), EXIT_STARTUP_FETCH);
        assert!(err.to_string().contains("2024-07-01"));
        assert!(!store.is_populated());
    }

    #[tokio::test]
    async fn startup_network_error_is_fatal() {
        let store = DatasetStore::new(Once::new(Err(FetchError::Network("refused".into()))));

        let err = initial_load(&store, day()).await.unwrap_err();
        assert_eq!(err.exit_code(), EXIT_STARTUP_FETCH);
        assert!(!store.is_populated());
    }

    #[tokio::test]
    async fn startup_success_populates_store() {
        let mut feed = FeedResponse::default();
        feed.near_earth_objects.insert(
            day(),
            vec![NearEarthObject {
                name: "(2024 AB)".into(),
                is_potentially_hazardous_asteroid: true,
                ..NearEarthObject::default()
            }],
        );
        let store = DatasetStore::new(Once::new(Ok(feed)));

        let summary = initial_load(&store, day()).await.unwrap();
        assert_eq!(summary.hazardous, 1);
        assert!(store.is_populated());
        assert_eq!(store.snapshot().as_of, Some(day()));
    }
}
