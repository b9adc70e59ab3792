//! HTTP server: lead endpoints, content API and page preview

mod api;
mod auth;
mod leads;
mod preview;

pub use api::ApiError;
pub use preview::render_page;

use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::i18n::{Catalog, Lang};
use crate::leads::{ChatNotifier, EmailNotifier, LeadNotifier};
use crate::store::ContentStore;

/// Shared state of every handler
///
/// Handlers hold the store lock only for synchronous store work and release
/// it before awaiting any network call.
pub struct AppState {
    pub store: Mutex<ContentStore>,
    pub email: Option<Arc<dyn LeadNotifier>>,
    pub chat: Option<Arc<dyn LeadNotifier>>,
    pub catalog: Catalog,
    pub language: Lang,
    pub lead_timeout: Duration,
}

impl AppState {
    /// State without notifiers, default language and a 10 second lead timeout
    pub fn new(store: ContentStore, catalog: Catalog) -> Self {
        Self {
            store: Mutex::new(store),
            email: None,
            chat: None,
            catalog,
            language: Lang::default(),
            lead_timeout: Duration::from_secs(10),
        }
    }

    /// State wired from the site configuration
    pub fn from_config(config: &SiteConfig, store: ContentStore, catalog: Catalog) -> Self {
        let email = EmailNotifier::from_config(&config.email)
            .map(|n| Arc::new(n) as Arc<dyn LeadNotifier>);
        let chat =
            ChatNotifier::from_config(&config.chat).map(|n| Arc::new(n) as Arc<dyn LeadNotifier>);

        if email.is_none() {
            tracing::warn!("Email notifications disabled: RESEND_API_KEY, LEAD_EMAIL_FROM or LEAD_EMAIL_TO missing");
        }
        if chat.is_none() {
            tracing::info!("Chat notifications disabled");
        }

        Self {
            store: Mutex::new(store),
            email,
            chat,
            catalog,
            language: config.language,
            lead_timeout: Duration::from_secs(config.lead.timeout_secs),
        }
    }

    pub fn with_email(mut self, notifier: Arc<dyn LeadNotifier>) -> Self {
        self.email = Some(notifier);
        self
    }

    pub fn with_chat(mut self, notifier: Arc<dyn LeadNotifier>) -> Self {
        self.chat = Some(notifier);
        self
    }

    pub fn with_lead_timeout(mut self, timeout: Duration) -> Self {
        self.lead_timeout = timeout;
        self
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Lead intake
        .route("/api/lead-email", post(leads::lead_email))
        .route("/api/lead", post(leads::lead_chat))
        .route("/api/lead.js", post(leads::lead_chat))
        .route("/api/leads", post(leads::submit).get(api::list_leads))
        .route("/api/leads/:id/status", put(api::update_lead_status))
        // Whole document
        .route("/api/db", get(api::export_db))
        .route("/api/db/import", post(api::import_db))
        .route("/api/db/reset", post(api::reset_db))
        // Collections
        .route(
            "/api/settings",
            get(api::get_settings).put(api::update_settings),
        )
        .route(
            "/api/projects",
            get(api::list_projects).put(api::upsert_project),
        )
        .route(
            "/api/projects/:id",
            get(api::get_project).delete(api::delete_project),
        )
        .route("/api/media", get(api::list_media).put(api::upsert_media))
        .route("/api/media/:id", delete(api::delete_media))
        .route("/api/pages", get(api::list_pages).put(api::upsert_page))
        .route("/api/pages/:slug", get(api::get_page))
        .route("/api/pages/id/:id", delete(api::delete_page))
        .route(
            "/api/reviews",
            get(api::list_reviews).put(api::upsert_review),
        )
        .route("/api/reviews/:id/status", put(api::moderate_review))
        .route(
            "/api/services",
            get(api::list_services).put(api::upsert_service),
        )
        .route(
            "/api/process-steps",
            get(api::list_process_steps).put(api::upsert_process_step),
        )
        .route("/api/about", get(api::get_about).put(api::update_about))
        .route(
            "/api/contact",
            get(api::get_contact).put(api::update_contact),
        )
        // Rendered pages
        .route("/p/:slug", get(preview::page_preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start(state: Arc<AppState>, ip: &str, port: u16) -> Result<()> {
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
