//! Axum router wiring.
//!
//! Exposes a single GET route (the configured metrics path) that renders
//! the store's current state in Prometheus text exposition format.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};

use prometheus::{Encoder, TextEncoder};

use crate::app_state::AppState;

pub fn build_router(state: AppState) -> Router {
    let path = state.cfg().exporter.metrics_path.clone();
    Router::new().route(&path, get(serve_metrics)).with_state(state)
}

async fn serve_metrics(State(app): State<AppState>) -> Response {
    let families = app.store().gather();
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(err) = encoder.encode(&families, &mut buf) {
        tracing::error!(error = %err, "metrics encode failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "encode failed").into_response();
    }
    ([(header::CONTENT_TYPE, encoder.format_type().to_string())], buf).into_response()
}
