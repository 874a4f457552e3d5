//! Credit demo endpoints (`/reto2`).

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{view_redirect, StartedResponse, ViewQuery};
use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{CreditField, CreditForm, CreditResult, Page};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::render;
use crate::services::{SharedView, ViewSnapshot};

#[derive(Debug, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

/// Render the credit page. Without a `view` a fresh one is issued.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Response> {
    let Some(view_id) = query.view else {
        return Ok(view_redirect(Page::Reto2, Uuid::new_v4()).into_response());
    };

    let view = state.views.credit.get_or_create(view_id)?;
    let html = render::credit::page(&view.lock());
    Ok(Html(html).into_response())
}

/// Apply posted form fields. Unknown keys are ignored; the view only counts
/// as edited when a value actually changed.
fn apply_fields(view: &SharedView<CreditForm, CreditResult>, fields: &HashMap<String, String>) {
    let mut guard = view.lock();

    let mut updated = guard.input.clone();
    for (key, value) in fields {
        if let Ok(field) = key.parse::<CreditField>() {
            updated.set(field, value.as_str());
        }
    }

    if updated != guard.input {
        guard.edit_input(|form| *form = updated);
    } else {
        guard.touch();
    }
}

pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
    Form(fields): Form<HashMap<String, String>>,
) -> ApiResult<Redirect> {
    let view_id = query.id_or_new();
    let view = state.views.credit.get_or_create(view_id)?;
    apply_fields(&view, &fields);

    tracing::debug!(view_id = %view_id, fields = fields.len(), "Credit form updated");
    Ok(view_redirect(Page::Reto2, view_id))
}

/// Save the posted fields, then start the analysis if the guard allows it.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> ApiResult<Redirect> {
    let view_id = query.id_or_new();
    let view = state.views.credit.get_or_create(view_id)?;
    apply_fields(&view, &fields);

    if let Err(e) = state.engine.start_credit(&view) {
        tracing::debug!(
            request_id = %headers.request_id(),
            view_id = %view_id,
            error = %e,
            "Credit analysis not started"
        );
    }

    Ok(view_redirect(Page::Reto2, view_id))
}

/// JSON snapshot of a credit view.
pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .views
        .credit
        .get(view_id)
        .ok_or_else(|| ApiError::NotFound(format!("credit view {view_id} not found")))?;

    let snapshot = ViewSnapshot::from(&*view.lock());
    Ok(DataResponse::ok(snapshot))
}

/// Set a single form field. Creates the view on first use.
pub async fn set_field(
    State(state): State<Arc<AppState>>,
    Path((view_id, field)): Path<(Uuid, String)>,
    Json(body): Json<FieldValue>,
) -> ApiResult<impl IntoResponse> {
    let field: CreditField = field.parse().map_err(ApiError::BadRequest)?;

    let view = state.views.credit.get_or_create(view_id)?;
    let snapshot = {
        let mut guard = view.lock();
        if guard.input.get(field) != body.value {
            guard.edit_input(|form| form.set(field, body.value));
        }
        ViewSnapshot::from(&*guard)
    };

    Ok(DataResponse::ok(snapshot))
}

/// Start the analysis through the JSON API.
pub async fn start_json(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .views
        .credit
        .get(view_id)
        .ok_or_else(|| ApiError::NotFound(format!("credit view {view_id} not found")))?;

    let ticket = state.engine.start_credit(&view)?;
    Ok(DataResponse::accepted(StartedResponse {
        view_id,
        run: ticket.run,
        delay_ms: state.engine.delay().as_millis() as u64,
    }))
}
