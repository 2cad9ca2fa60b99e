//! The web surface: routes, shared state and the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use chrono::{Local, NaiveDate};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::data::FeedSource;
use crate::error::{AppError, EXIT_SERVER};
use crate::report::PageTemplate;
use crate::store::DatasetStore;

pub mod handlers;

/// Floor for the per-request deadline, matching the original read/write timeouts.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Slack between the upstream timeout and the request deadline, so a timed-out
/// refresh still reaches the handler's error path.
pub const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Everything the handlers share.
pub struct AppState<S> {
    pub store: DatasetStore<S>,
    pub page: PageTemplate,
    /// Reference date for `/refresh`.
    pub today: fn() -> NaiveDate,
    /// Deadline applied to every request. Always longer than the upstream timeout.
    pub request_timeout: Duration,
}

impl<S: FeedSource> AppState<S> {
    pub fn new(store: DatasetStore<S>, upstream_timeout: Duration) -> Self {
        Self {
            store,
            page: PageTemplate::new(),
            today: local_today,
            request_timeout: request_timeout_for(upstream_timeout),
        }
    }
}

/// Request deadline for a given upstream timeout.
pub fn request_timeout_for(upstream_timeout: Duration) -> Duration {
    (upstream_timeout + REQUEST_TIMEOUT_MARGIN).max(REQUEST_TIMEOUT)
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn router<S: FeedSource + 'static>(state: Arc<AppState<S>>) -> Router {
    let timeout = state.request_timeout;
    Router::new()
        .route("/", get(handlers::index::<S>))
        .route(
            "/refresh",
            get(handlers::refresh::<S>).post(handlers::refresh::<S>),
        )
        .route("/image", get(handlers::image::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<S: FeedSource + 'static>(
    addr: SocketAddr,
    state: Arc<AppState<S>>,
) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::new(EXIT_SERVER, format!("Cannot listen on {addr}: {e}")))?;
    info!("Listening on {addr}...");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::new(EXIT_SERVER, format!("Fatal server error: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
