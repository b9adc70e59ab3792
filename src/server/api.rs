//! JSON content API over the store

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

use super::auth::{MaybeAdmin, RequireAdmin};
use super::AppState;
use crate::content::{
    AboutContent, AppDatabase, ContactInfo, Lead, LeadStatus, Media, Page, ProcessStep, Project,
    Review, ReviewStatus, Service, Settings,
};
use crate::store::StoreError;

/// Error returned by content API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

impl ApiError {
    fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind,
            id: id.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } | ApiError::Store(StoreError::NotFound { .. }) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Store(StoreError::ConsentRequired(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::Serialization(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Content API error: {}", self);
        }
        (status, Json(json!({ "ok": false, "error": self.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn removed(removed: bool, kind: &'static str, id: String) -> ApiResult<Value> {
    if removed {
        Ok(Json(json!({ "ok": true })))
    } else {
        Err(ApiError::not_found(kind, id))
    }
}

/// `?public=true` restricts a listing to what visitors may see
#[derive(Debug, Default, Deserialize)]
pub(super) struct VisibilityQuery {
    #[serde(default)]
    public: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MediaQuery {
    project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusUpdate<S> {
    status: S,
}

// Whole document

pub(super) async fn export_db(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let json = state.store.lock().await.export_db()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

pub(super) async fn import_db(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<Value> {
    state.store.lock().await.import_db(&body)?;
    Ok(Json(json!({ "ok": true })))
}

pub(super) async fn reset_db(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Json<AppDatabase> {
    let mut store = state.store.lock().await;
    Json(store.reset_to_seed().clone())
}

// Singletons

/// Anonymous callers get the settings without the admin password
pub(super) async fn get_settings(
    MaybeAdmin(admin): MaybeAdmin,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Value> {
    let settings = state.store.lock().await.get_settings().clone();
    let mut value = serde_json::to_value(settings).map_err(StoreError::from)?;
    if !admin {
        if let Some(fields) = value.as_object_mut() {
            fields.remove("adminPassword");
        }
    }
    Ok(Json(value))
}

pub(super) async fn update_settings(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(mut settings): Json<Settings>,
) -> Json<Settings> {
    let mut store = state.store.lock().await;
    // An empty password keeps the current one
    if settings.admin_password.is_empty() {
        settings.admin_password = store.get_settings().admin_password.clone();
    }
    store.update_settings(settings.clone());
    Json(settings)
}

pub(super) async fn get_about(State(state): State<Arc<AppState>>) -> Json<AboutContent> {
    Json(state.store.lock().await.get_about().clone())
}

pub(super) async fn update_about(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(about): Json<AboutContent>,
) -> Json<AboutContent> {
    state.store.lock().await.update_about(about.clone());
    Json(about)
}

pub(super) async fn get_contact(State(state): State<Arc<AppState>>) -> Json<ContactInfo> {
    Json(state.store.lock().await.get_contact().clone())
}

pub(super) async fn update_contact(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(contact): Json<ContactInfo>,
) -> Json<ContactInfo> {
    state.store.lock().await.update_contact(contact.clone());
    Json(contact)
}

// Projects

pub(super) async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VisibilityQuery>,
) -> Json<Vec<Project>> {
    let mut store = state.store.lock().await;
    let projects: Vec<Project> = if query.public {
        store.get_published_projects().into_iter().cloned().collect()
    } else {
        store.get_projects().to_vec()
    };
    Json(projects)
}

pub(super) async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    let mut store = state.store.lock().await;
    store
        .get_project_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("project", id))
}

pub(super) async fn upsert_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(project): Json<Project>,
) -> Json<Project> {
    Json(state.store.lock().await.upsert_project(project))
}

pub(super) async fn delete_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let deleted = state.store.lock().await.delete_project(&id);
    removed(deleted, "project", id)
}

// Media

pub(super) async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MediaQuery>,
) -> Json<Vec<Media>> {
    let mut store = state.store.lock().await;
    let media: Vec<Media> = store
        .get_media(query.project_id.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Json(media)
}

pub(super) async fn upsert_media(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(media): Json<Media>,
) -> Json<Media> {
    Json(state.store.lock().await.upsert_media(media))
}

pub(super) async fn delete_media(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let deleted = state.store.lock().await.delete_media(&id);
    removed(deleted, "media", id)
}

// Pages

pub(super) async fn list_pages(State(state): State<Arc<AppState>>) -> Json<Vec<Page>> {
    Json(state.store.lock().await.get_pages().to_vec())
}

pub(super) async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Page> {
    let mut store = state.store.lock().await;
    store
        .get_page_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("page", slug))
}

pub(super) async fn upsert_page(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(page): Json<Page>,
) -> Json<Page> {
    Json(state.store.lock().await.upsert_page(page))
}

pub(super) async fn delete_page(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let deleted = state.store.lock().await.delete_page(&id);
    removed(deleted, "page", id)
}

// Leads

pub(super) async fn list_leads(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Lead>> {
    Json(state.store.lock().await.get_leads().to_vec())
}

pub(super) async fn update_lead_status(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate<LeadStatus>>,
) -> ApiResult<Lead> {
    let lead = state
        .store
        .lock()
        .await
        .update_lead_status(&id, update.status)?;
    Ok(Json(lead))
}

// Reviews

pub(super) async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VisibilityQuery>,
) -> Json<Vec<Review>> {
    let mut store = state.store.lock().await;
    let reviews: Vec<Review> = if query.public {
        store.get_approved_reviews().into_iter().cloned().collect()
    } else {
        store.get_reviews().to_vec()
    };
    Json(reviews)
}

pub(super) async fn upsert_review(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(review): Json<Review>,
) -> Json<Review> {
    Json(state.store.lock().await.upsert_review(review))
}

pub(super) async fn moderate_review(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate<ReviewStatus>>,
) -> ApiResult<Review> {
    let review = state
        .store
        .lock()
        .await
        .moderate_review(&id, update.status)?;
    Ok(Json(review))
}

// Services and process steps

pub(super) async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.store.lock().await.get_services().to_vec())
}

pub(super) async fn upsert_service(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(service): Json<Service>,
) -> Json<Service> {
    Json(state.store.lock().await.upsert_service(service))
}

pub(super) async fn list_process_steps(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ProcessStep>> {
    Json(state.store.lock().await.get_process_steps().to_vec())
}

pub(super) async fn upsert_process_step(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(step): Json<ProcessStep>,
) -> Json<ProcessStep> {
    Json(state.store.lock().await.upsert_process_step(step))
}
