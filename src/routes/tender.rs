//! Tender demo endpoints (`/reto1`).

use axum::{
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{view_redirect, StartedResponse, ViewQuery};
use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{Page, SelectedFile};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::render;
use crate::services::ViewSnapshot;

/// Render the tender page. Without a `view` a fresh one is issued.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Response> {
    let Some(view_id) = query.view else {
        return Ok(view_redirect(Page::Reto1, Uuid::new_v4()).into_response());
    };

    let view = state.views.tender.get_or_create(view_id)?;
    let html = render::tender::page(&view.lock());
    Ok(Html(html).into_response())
}

/// Replace the selected file. Only the name and byte count are kept.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let view_id = query.id_or_new();
    let mut selected = None;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();

        let mut size_bytes = 0u64;
        while let Some(chunk) = field.chunk().await? {
            size_bytes += chunk.len() as u64;
        }

        // browsers send an empty filename when nothing was picked
        if !name.is_empty() {
            selected = Some(SelectedFile::new(name, size_bytes));
        }
    }

    match selected {
        Some(file) => {
            tracing::info!(
                request_id = %headers.request_id(),
                view_id = %view_id,
                file_name = %file.name,
                size_bytes = file.size_bytes,
                "Tender document selected"
            );
            state
                .views
                .tender
                .get_or_create(view_id)?
                .lock()
                .edit_input(|input| input.set_file(file));
        }
        None => tracing::debug!(view_id = %view_id, "Upload without a file"),
    }

    Ok(view_redirect(Page::Reto1, view_id))
}

/// Start the analysis from the page. An unmet guard just re-renders.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
    headers: HeaderMap,
) -> ApiResult<Redirect> {
    let view_id = query.id_or_new();
    let view = state.views.tender.get_or_create(view_id)?;

    if let Err(e) = state.engine.start_tender(&view) {
        tracing::debug!(
            request_id = %headers.request_id(),
            view_id = %view_id,
            error = %e,
            "Tender analysis not started"
        );
    }

    Ok(view_redirect(Page::Reto1, view_id))
}

/// JSON snapshot of a tender view.
pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .views
        .tender
        .get(view_id)
        .ok_or_else(|| ApiError::NotFound(format!("tender view {view_id} not found")))?;

    let snapshot = ViewSnapshot::from(&*view.lock());
    Ok(DataResponse::ok(snapshot))
}

/// Start the analysis through the JSON API.
pub async fn start_json(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .views
        .tender
        .get(view_id)
        .ok_or_else(|| ApiError::NotFound(format!("tender view {view_id} not found")))?;

    let ticket = state.engine.start_tender(&view)?;
    Ok(DataResponse::accepted(StartedResponse {
        view_id,
        run: ticket.run,
        delay_ms: state.engine.delay().as_millis() as u64,
    }))
}
