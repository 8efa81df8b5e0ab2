//! HTTP transport: info + schedule endpoints over the extraction pipeline.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use crate::models::{ApiInfo, ErrorBody, ScheduleResponse};
use crate::pipeline::Pipeline;
use crate::utils::unix_now;

// --- App State ---

pub struct AppState {
    pub pipeline: Pipeline,
}

// --- Router ---

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/api", get(api_info))
        .route("/api/schedule", get(api_schedule).options(preflight))
        .with_state(state)
        // Any origin may read the schedule
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        // Every request re-extracts; nothing downstream should cache either
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Schedule API listening on {addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

// --- Handlers ---

async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: "Anime Schedule API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Weekly anime airing schedule extracted from MyAnimeList".to_string(),
        endpoints: vec!["GET /api".to_string(), "GET /api/schedule".to_string()],
        timestamp: unix_now(),
    })
}

async fn api_schedule(State(state): State<Arc<AppState>>) -> Response {
    match state.pipeline.run().await {
        Ok(schedule) => Json(ScheduleResponse::new(schedule, unix_now())).into_response(),
        Err(e) => {
            warn!(error = %e, "Schedule request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to fetch schedule".to_string(),
                    details: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}
