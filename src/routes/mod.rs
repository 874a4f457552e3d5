pub mod credit;
pub mod health;
pub mod pages;
pub mod tender;

use axum::{
    response::Redirect,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::domain::Page;

/// `?view=` query carried by every demo page request.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct ViewQuery {
    pub view: Option<Uuid>,
}

impl ViewQuery {
    /// The requested view id, or a fresh one.
    pub fn id_or_new(&self) -> Uuid {
        self.view.unwrap_or_else(Uuid::new_v4)
    }
}

/// Body returned when a JSON analyze request is accepted.
#[derive(Debug, Serialize)]
pub struct StartedResponse {
    pub view_id: Uuid,
    pub run: u64,
    pub delay_ms: u64,
}

/// Post/redirect/get target for a demo view.
pub fn view_redirect(page: Page, view_id: Uuid) -> Redirect {
    Redirect::to(&format!("{}?view={view_id}", page.path()))
}

/// Build the site router with all routes
pub fn site_router() -> Router<Arc<AppState>> {
    Router::new()
        // Liveness
        .route("/health", get(health::health_check))
        .route("/ping", get(health::ping))
        // Static pages
        .route("/", get(pages::home))
        .route("/equipo", get(pages::team))
        // Tender demo
        .route("/reto1", get(tender::show))
        .route("/reto1/upload", post(tender::upload))
        .route("/reto1/analyze", post(tender::analyze))
        // Credit demo
        .route("/reto2", get(credit::show))
        .route("/reto2/form", post(credit::update_form))
        .route("/reto2/analyze", post(credit::analyze))
        // JSON views
        .route("/api/reto1/:view_id", get(tender::snapshot))
        .route("/api/reto1/:view_id/analyze", post(tender::start_json))
        .route("/api/reto2/:view_id", get(credit::snapshot))
        .route("/api/reto2/:view_id/fields/:field", put(credit::set_field))
        .route("/api/reto2/:view_id/analyze", post(credit::start_json))
}
