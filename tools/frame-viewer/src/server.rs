// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! HTTP surface for the viewer.
//!
//! - `GET /` renders the artifact as an HTML page.
//! - `GET /api/page` returns the same page as JSON blocks.
//! - `GET /api/health` is a liveness check.
//!
//! Every page request runs its own load and render pass; nothing is cached
//! between requests, so edits to the artifact show up on the next reload.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{error, info};

use crate::config::ViewerConfig;
use crate::error::LoadError;
use crate::html::to_html;
use crate::loader::load;
use crate::render::{Page, render_outcome};

pub struct AppState {
    pub config: ViewerConfig,
}

pub fn router(config: ViewerConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(index_handler))
        .route("/api/page", get(page_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
}

/// Bind the configured address and serve until shutdown.
pub async fn run_server(config: ViewerConfig) -> anyhow::Result<()> {
    let addr = config.listen_addr;
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "viewer listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("viewer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

/// One independent load and render pass.
async fn render_page(state: &AppState) -> (StatusCode, Page) {
    let path = state.config.artifact_path.clone();
    let title = state.config.page_title.clone();

    let result = tokio::task::spawn_blocking(move || {
        let outcome = load(&path);
        let status = status_for(&outcome);
        (status, render_outcome(&outcome, &title))
    })
    .await;

    match result {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("render task failed: {e}");
            let page = Page::halted(&state.config.page_title, "internal error while rendering");
            (StatusCode::INTERNAL_SERVER_ERROR, page)
        }
    }
}

fn status_for<T>(outcome: &Result<T, LoadError>) -> StatusCode {
    match outcome {
        Ok(_) => StatusCode::OK,
        Err(LoadError::MissingArtifact { .. }) => StatusCode::NOT_FOUND,
        Err(LoadError::Deserialization { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let (status, page) = render_page(&state).await;
    (status, Html(to_html(&page))).into_response()
}

async fn page_handler(State(state): State<Arc<AppState>>) -> Response {
    let (status, page) = render_page(&state).await;
    (status, Json(page)).into_response()
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}
