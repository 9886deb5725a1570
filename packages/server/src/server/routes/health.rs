use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// "configured" or "placeholder"
    web_search: &'static str,
}

#[derive(Serialize)]
pub struct RootResponse {
    detail: &'static str,
}

/// Health check endpoint
///
/// Always healthy once the process is serving; reports whether grounding
/// uses live web search or placeholder text.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        web_search: if state.search_configured {
            "configured"
        } else {
            "placeholder"
        },
    })
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        detail: "Hello from the collaborative writing API",
    })
}
