//! HTTP tests for the lead endpoints and the content API.
//!
//! Requests go straight to the axum router through `tower::ServiceExt::oneshot`,
//! no listener is started. Every test builds its own state over an in-memory
//! store, so tests are independent of each other and of the filesystem.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use atelier_cms::i18n::Catalog;
use atelier_cms::leads::{LeadNotifier, LeadPayload, NotifyError};
use atelier_cms::server::{router, AppState};
use atelier_cms::store::ContentStore;

/// Notifier that only counts how often it was called
#[derive(Default)]
struct CountingNotifier {
    calls: AtomicUsize,
}

impl CountingNotifier {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadNotifier for CountingNotifier {
    async fn notify(&self, _lead: &LeadPayload) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn state() -> AppState {
    AppState::new(ContentStore::in_memory(), Catalog::new())
}

fn app(state: &Arc<AppState>) -> Router {
    router(state.clone())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

const ADMIN_PASSWORD: &str = "admin";

fn request(method: &str, uri: &str, body: Option<Value>, admin: bool) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(method);
    if admin {
        builder = builder.header("authorization", format!("Bearer {}", ADMIN_PASSWORD));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, false)).await
}

async fn admin_get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, true)).await
}

async fn admin_delete(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("DELETE", uri, None, true)).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, request("POST", uri, Some(body), false)).await
}

async fn admin_post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, request("POST", uri, Some(body), true)).await
}

async fn put_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, request("PUT", uri, Some(body), false)).await
}

async fn admin_put_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, request("PUT", uri, Some(body), true)).await
}

fn lead() -> Value {
    json!({
        "name": "Andrei Popescu",
        "email": "andrei@example.com",
        "phone": "",
        "city": "Iași",
        "message": "Aș dori o ofertă pentru un dressing.",
        "company": "",
        "createdAt": "2024-06-01T09:00:00Z"
    })
}

// == Lead endpoints ============================================================

#[tokio::test]
async fn test_lead_email_honeypot_returns_ok_without_sending() {
    let notifier = Arc::new(CountingNotifier::default());
    let state = Arc::new(state().with_email(notifier.clone()));

    let mut body = lead();
    body["company"] = json!("Acme SRL");
    let (status, json) = post_json(app(&state), "/api/lead-email", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true }));
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn test_lead_email_missing_contact_is_rejected() {
    let notifier = Arc::new(CountingNotifier::default());
    let state = Arc::new(state().with_email(notifier.clone()));

    let mut body = lead();
    body["email"] = json!("");
    body["phone"] = json!("");
    let (status, json) = post_json(app(&state), "/api/lead-email", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "ok": false, "error": "Missing required fields" })
    );
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn test_lead_email_without_service_is_server_error() {
    let state = Arc::new(state());
    let (status, json) = post_json(app(&state), "/api/lead-email", lead()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Email service not configured");
}

#[tokio::test]
async fn test_lead_email_sends_once() {
    let notifier = Arc::new(CountingNotifier::default());
    let state = Arc::new(state().with_email(notifier.clone()));

    let (status, json) = post_json(app(&state), "/api/lead-email", lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert_eq!(notifier.calls(), 1);
}

#[tokio::test]
async fn test_lead_chat_without_credentials_succeeds() {
    let state = Arc::new(state());

    for uri in ["/api/lead", "/api/lead.js"] {
        let (status, json) = post_json(app(&state), uri, lead()).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(json, json!({ "ok": true }));
    }
}

#[tokio::test]
async fn test_submitted_lead_is_stored_even_without_notifier() {
    let state = Arc::new(state());

    let (status, json) = post_json(app(&state), "/api/leads?lang=en", lead()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["ok"], false);
    assert!(json["message"].as_str().unwrap().contains("saved"));

    let (status, leads) = admin_get(app(&state), "/api/leads").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["status"], "new");
    assert_eq!(leads[0]["createdAt"], "2024-06-01T09:00:00Z");
}

#[tokio::test]
async fn test_submitted_lead_status_can_be_updated() {
    let notifier = Arc::new(CountingNotifier::default());
    let state = Arc::new(state().with_email(notifier.clone()));

    let (status, json) = post_json(app(&state), "/api/leads", lead()).await;
    assert_eq!(status, StatusCode::OK);
    let id = json["leadId"].as_str().unwrap().to_string();

    let uri = format!("/api/leads/{}/status", id);
    let (status, json) = admin_put_json(app(&state), &uri, json!({ "status": "contacted" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "contacted");

    let (status, _) = admin_put_json(
        app(&state),
        "/api/leads/missing/status",
        json!({ "status": "won" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Content API ===============================================================

#[tokio::test]
async fn test_fresh_store_serves_seed() {
    let state = Arc::new(state());

    let (status, projects) = get(app(&state), "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(projects.as_array().unwrap().len(), 3);

    let (_, settings) = get(app(&state), "/api/settings").await;
    assert_eq!(settings["activeTheme"], "obsidian");
    assert_eq!(settings["hero"]["mode"], "slider");
    assert_eq!(settings["hero"]["slides"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_project_crud_cascades_media() {
    let state = Arc::new(state());

    let (status, project) = admin_put_json(
        app(&state),
        "/api/projects",
        json!({
            "title": { "ro": "Bibliotecă", "en": "Bookcase" },
            "type": "living",
            "published": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = project["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, _) = admin_put_json(
        app(&state),
        "/api/media",
        json!({ "projectId": id, "url": "data:image/png;base64,AAAA", "order": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, media) = get(app(&state), &format!("/api/media?projectId={}", id)).await;
    assert_eq!(media.as_array().unwrap().len(), 1);

    let (status, fetched) = get(app(&state), &format!("/api/projects/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"]["en"], "Bookcase");

    let (status, _) = admin_delete(app(&state), &format!("/api/projects/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, media) = get(app(&state), &format!("/api/media?projectId={}", id)).await;
    assert!(media.as_array().unwrap().is_empty());

    let (status, json) = get(app(&state), &format!("/api/projects/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["ok"], false);
}

#[tokio::test]
async fn test_review_approval_requires_consent() {
    let state = Arc::new(state());

    let (status, review) = admin_put_json(
        app(&state),
        "/api/reviews",
        json!({
            "name": "Elena",
            "text": { "ro": "Foarte mulțumită", "en": "" },
            "rating": 9,
            "consentPublic": false,
            "createdAt": "2024-02-02T12:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["rating"], 5);
    let uri = format!("/api/reviews/{}/status", review["id"].as_str().unwrap());

    let (status, json) = admin_put_json(app(&state), &uri, json!({ "status": "approved" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["ok"], false);

    let (status, json) = admin_put_json(app(&state), &uri, json!({ "status": "hidden" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "hidden");

    let (_, public) = get(app(&state), "/api/reviews?public=true").await;
    assert!(public
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["consentPublic"] == true && r["status"] == "approved"));
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let state = Arc::new(state());

    let (_, mut db) = admin_get(app(&state), "/api/db").await;
    db["settings"]["brandName"] = json!("Atelier Nou");

    let (status, json) = admin_post_json(app(&state), "/api/db/import", db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);

    let (_, settings) = get(app(&state), "/api/settings").await;
    assert_eq!(settings["brandName"], "Atelier Nou");

    let mut broken = request("POST", "/api/db/import", None, true);
    *broken.body_mut() = Body::from("{ broken");
    let (status, _) = send(app(&state), broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, settings) = get(app(&state), "/api/settings").await;
    assert_eq!(settings["brandName"], "Atelier Nou");

    let (status, db) = admin_post_json(app(&state), "/api/db/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(db["settings"]["brandName"], "Atelier Nou");
}

#[tokio::test]
async fn test_page_is_saved_with_normalized_slug_and_previewed() {
    let state = Arc::new(state());

    let (status, page) = admin_put_json(
        app(&state),
        "/api/pages",
        json!({
            "slug": "Despre Noi",
            "title": { "ro": "Despre noi", "en": "About us" },
            "published": true,
            "sections": [
                { "type": "text", "id": "s1", "body": { "ro": "**Din 2009**", "en": "" } }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["slug"], "despre-noi");

    let (status, fetched) = get(app(&state), "/api/pages/despre-noi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["sections"][0]["type"], "text");

    let response = app(&state)
        .oneshot(
            Request::builder()
                .uri("/p/despre-noi?lang=en")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<h1>About us</h1>"));
    assert!(html.contains("<strong>Din 2009</strong>"));

    let response = app(&state)
        .oneshot(Request::builder().uri("/p/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Admin authentication ======================================================

#[tokio::test]
async fn test_admin_routes_require_password() {
    let state = Arc::new(state());

    let (status, json) = post_json(app(&state), "/api/db/reset", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["ok"], false);

    let (status, _) = get(app(&state), "/api/db").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(app(&state), "/api/leads").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = put_json(app(&state), "/api/projects", json!({ "type": "living" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, projects) = get(app(&state), "/api/projects").await;
    let id = projects[0]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/projects/{}", id);
    let (status, _) = send(app(&state), request("DELETE", &uri, None, false)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut wrong = request("DELETE", &uri, None, false);
    wrong
        .headers_mut()
        .insert("authorization", "Bearer guess".parse().unwrap());
    let (status, json) = send(app(&state), wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid admin password");

    let (status, _) = get(app(&state), &uri).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_routes_accept_password() {
    let state = Arc::new(state());

    let (status, leads) = admin_get(app(&state), "/api/leads").await;
    assert_eq!(status, StatusCode::OK);
    assert!(leads.is_array());

    let (status, db) = admin_post_json(app(&state), "/api/db/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(db["projects"].as_array().unwrap().len(), 3);

    let mut header_auth = request("GET", "/api/db", None, false);
    header_auth
        .headers_mut()
        .insert("x-admin-password", ADMIN_PASSWORD.parse().unwrap());
    let (status, _) = send(app(&state), header_auth).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_settings_hide_admin_password_from_visitors() {
    let state = Arc::new(state());

    let (status, settings) = get(app(&state), "/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(settings.get("adminPassword").is_none());
    assert_eq!(settings["activeTheme"], "obsidian");

    let (_, settings) = admin_get(app(&state), "/api/settings").await;
    assert_eq!(settings["adminPassword"], ADMIN_PASSWORD);

    // Saving without a password keeps the current one
    let mut update = settings.clone();
    update["adminPassword"] = json!("");
    update["brandName"] = json!("Atelier Nou");
    let (status, _) = admin_put_json(app(&state), "/api/settings", update).await;
    assert_eq!(status, StatusCode::OK);

    let (status, settings) = admin_get(app(&state), "/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["brandName"], "Atelier Nou");
    assert_eq!(settings["adminPassword"], ADMIN_PASSWORD);
}

#[tokio::test]
async fn test_lead_intake_and_preview_stay_public() {
    let notifier = Arc::new(CountingNotifier::default());
    let state = Arc::new(state().with_email(notifier.clone()));

    let (status, _) = post_json(app(&state), "/api/leads", lead()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post_json(app(&state), "/api/lead-email", lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifier.calls(), 2);

    let (_, pages) = get(app(&state), "/api/pages").await;
    let slug = pages[0]["slug"].as_str().unwrap().to_string();
    let response = app(&state)
        .oneshot(request("GET", &format!("/p/{}", slug), None, false))
        .await
        .unwrap();
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}
