use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub views: ViewCounts,
}

#[derive(Serialize)]
pub struct ViewCounts {
    pub tender: usize,
    pub credit: usize,
}

/// Health check endpoint - public
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        views: ViewCounts {
            tender: state.views.tender.len(),
            credit: state.views.credit.len(),
        },
    })
}

pub async fn ping() -> &'static str {
    "pong"
}
