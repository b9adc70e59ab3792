//! Lead intake handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::i18n::Lang;
use crate::leads::{self, LeadPayload, LeadResponse, SubmitOutcome};

#[derive(Debug, Default, Deserialize)]
pub(super) struct LangQuery {
    pub lang: Option<Lang>,
}

/// `POST /api/lead-email`
pub(super) async fn lead_email(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadPayload>,
) -> (StatusCode, Json<LeadResponse>) {
    let (status, body) = leads::forward_email(&payload, state.email.as_deref()).await;
    (status, Json(body))
}

/// `POST /api/lead` and the legacy `/api/lead.js`
pub(super) async fn lead_chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadPayload>,
) -> (StatusCode, Json<LeadResponse>) {
    let (status, body) = leads::forward_chat(&payload, state.chat.as_deref()).await;
    (status, Json(body))
}

/// `POST /api/leads`: store locally, then notify by email
pub(super) async fn submit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
    Json(payload): Json<LeadPayload>,
) -> (StatusCode, Json<SubmitOutcome>) {
    let lang = query.lang.unwrap_or(state.language);
    let outcome = leads::submit_lead(
        &state.store,
        state.email.as_deref(),
        &state.catalog,
        lang,
        &payload,
        state.lead_timeout,
    )
    .await;

    let status = match (&outcome.lead_id, outcome.ok) {
        (_, true) => StatusCode::OK,
        (None, false) => StatusCode::BAD_REQUEST,
        (Some(_), false) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(outcome))
}
