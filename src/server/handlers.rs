//! HTTP request handlers for the index page, refresh trigger and chart.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::data::FeedSource;
use crate::plot;
use crate::server::AppState;

/// `GET /`: the current snapshot as HTML. Never fails.
pub async fn index<S: FeedSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Html<String> {
    let dataset = state.store.snapshot();
    Html(state.page.render(&dataset))
}

/// `GET|POST /refresh`: reload for today. `204` on success, `502` otherwise.
#[instrument(skip(state))]
pub async fn refresh<S: FeedSource + 'static>(State(state): State<Arc<AppState<S>>>) -> StatusCode {
    let date = (state.today)();
    match state.store.load(date).await {
        Ok(summary) => {
            info!(hazardous = summary.hazardous, "refresh complete");
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            match e.status() {
                Some(status) => error!(operation = "refresh", %date, upstream_status = %status, "{e}"),
                None => error!(operation = "refresh", %date, "{e}"),
            }
            StatusCode::BAD_GATEWAY
        }
    }
}

/// `GET /image`: the hazard scatter as PNG.
#[instrument(skip(state))]
pub async fn image<S: FeedSource + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    let dataset = state.store.snapshot();
    let rendered = tokio::task::spawn_blocking(move || plot::render_png(&dataset)).await;

    match rendered {
        Ok(Ok(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(Err(e)) => {
            error!(operation = "image", "{e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!(operation = "image", "render task failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
