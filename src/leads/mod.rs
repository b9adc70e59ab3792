//! Lead intake
//!
//! Contact-form submissions arrive as a [`LeadPayload`]. Two forwarding
//! handlers ([`forward_email`] and [`forward_chat`]) notify the workshop
//! without touching the content store; [`submit_lead`] is the site-side flow
//! that records the lead locally before attempting a notification.

mod notify;
mod submit;

pub use notify::{
    chat_text, email_html, email_subject, ChatNotifier, EmailNotifier, LeadNotifier, NotifyError,
};
pub use submit::{submit_lead, SubmitOutcome};

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{Lead, LeadStatus};

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const EMAIL_NOT_CONFIGURED: &str = "Email service not configured";
pub const EMAIL_FAILED: &str = "Failed to send email";

/// Contact form body as posted by the site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub message: String,
    /// Hidden honeypot field, only bots fill it in
    pub company: String,
    pub created_at: Option<String>,
}

impl LeadPayload {
    pub fn is_spam(&self) -> bool {
        !self.company.trim().is_empty()
    }

    /// Name, message, and at least one of email or phone
    pub fn has_required_fields(&self) -> bool {
        let present = |s: &str| !s.trim().is_empty();
        present(&self.name)
            && present(&self.message)
            && (present(&self.email) || present(&self.phone))
    }

    /// Labelled non-empty contact fields, in display order
    pub fn contact_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Nume", self.name.trim()),
            ("Email", self.email.trim()),
            ("Telefon", self.phone.trim()),
            ("Oraș", self.city.trim()),
            ("Trimis la", self.created_at.as_deref().unwrap_or("").trim()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// A new store record for this submission
    pub fn to_lead(&self) -> Lead {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        Lead {
            id: String::new(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            city: self.city.trim().to_string(),
            message: self.message.trim().to_string(),
            status: LeadStatus::New,
            created_at,
        }
    }
}

/// JSON body returned by the forwarding handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeadResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// Forward a lead by email
///
/// Honeypot hits succeed silently without sending anything.
pub async fn forward_email(
    payload: &LeadPayload,
    notifier: Option<&dyn LeadNotifier>,
) -> (StatusCode, LeadResponse) {
    if payload.is_spam() {
        tracing::info!("Honeypot filled, dropping lead");
        return (StatusCode::OK, LeadResponse::ok());
    }

    if !payload.has_required_fields() {
        return (StatusCode::BAD_REQUEST, LeadResponse::error(MISSING_FIELDS));
    }

    let Some(notifier) = notifier else {
        tracing::error!("Lead email requested but the email service is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            LeadResponse::error(EMAIL_NOT_CONFIGURED),
        );
    };

    match notifier.notify(payload).await {
        Ok(()) => (StatusCode::OK, LeadResponse::ok()),
        Err(e) => {
            tracing::warn!("Lead email failed: {}", e);
            (StatusCode::BAD_GATEWAY, LeadResponse::error(EMAIL_FAILED))
        }
    }
}

/// Forward a lead as a chat message
///
/// Missing chat credentials are not an error: the lead counts as saved
/// locally and the call succeeds without sending.
pub async fn forward_chat(
    payload: &LeadPayload,
    notifier: Option<&dyn LeadNotifier>,
) -> (StatusCode, LeadResponse) {
    if payload.is_spam() {
        tracing::info!("Honeypot filled, dropping lead");
        return (StatusCode::OK, LeadResponse::ok());
    }

    if !payload.has_required_fields() {
        return (StatusCode::BAD_REQUEST, LeadResponse::error(MISSING_FIELDS));
    }

    let Some(notifier) = notifier else {
        tracing::info!("Chat notifications not configured, lead kept locally only");
        return (StatusCode::OK, LeadResponse::ok());
    };

    match notifier.notify(payload).await {
        Ok(()) => (StatusCode::OK, LeadResponse::ok()),
        Err(e) => {
            tracing::warn!("Lead chat message failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                LeadResponse::error(e.to_string()),
            )
        }
    }
}
