use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::domain::RandomSource;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{SimulatedEngine, ViewStore};

/// Shared application state
pub struct AppState {
    pub settings: Settings,
    pub views: ViewStore,
    pub engine: SimulatedEngine,
}

impl AppState {
    pub fn new(settings: Settings, rng: Arc<dyn RandomSource>) -> Arc<Self> {
        let engine = SimulatedEngine::new(settings.analysis_delay(), rng);
        let views = ViewStore::new(settings.max_views_per_flow);
        Arc::new(Self {
            settings,
            views,
            engine,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    // Request ID layers
    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::site_router())
        .nest_service("/static", ServeDir::new(&state.settings.assets_dir))
        // Upload size is enforced by the tower-http limit instead of axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.settings.max_upload_bytes))
        // Middleware stack (applied bottom-up)
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Longer preflight cache in development
    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}
