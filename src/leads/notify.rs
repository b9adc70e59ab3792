//! Outbound lead notifications

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use super::LeadPayload;
use crate::config::{ChatConfig, EmailConfig};
use crate::helpers::{html_escape, nl2br};

/// Notification errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream rejected the notification ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Something that tells the workshop about a new lead
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify(&self, lead: &LeadPayload) -> Result<(), NotifyError>;
}

/// Sends an HTML email through a Resend-compatible API
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
    to: String,
}

impl EmailNotifier {
    /// `None` unless API key, sender and recipient are all configured
    pub fn from_config(config: &EmailConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone()?,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }
}

#[async_trait]
impl LeadNotifier for EmailNotifier {
    async fn notify(&self, lead: &LeadPayload) -> Result<(), NotifyError> {
        let mut body = json!({
            "from": self.from,
            "to": [self.to],
            "subject": email_subject(lead),
            "html": email_html(lead),
        });
        if !lead.email.trim().is_empty() {
            body["reply_to"] = json!(lead.email.trim());
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Lead email sent for {}", lead.name.trim());
        Ok(())
    }
}

/// Posts a text message through a Telegram-compatible bot API
#[derive(Debug, Clone)]
pub struct ChatNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl ChatNotifier {
    /// `None` unless both the bot token and the chat id are configured
    pub fn from_config(config: &ChatConfig) -> Option<Self> {
        let token = config.bot_token.as_deref()?;
        let chat_id = config.chat_id.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_url.trim_end_matches('/'),
                token
            ),
            chat_id,
        })
    }
}

#[async_trait]
impl LeadNotifier for ChatNotifier {
    async fn notify(&self, lead: &LeadPayload) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": chat_text(lead),
                "disable_web_page_preview": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Lead chat message sent for {}", lead.name.trim());
        Ok(())
    }
}

pub fn email_subject(lead: &LeadPayload) -> String {
    format!("Cerere nouă de la {}", lead.name.trim())
}

/// HTML body of the notification email; every field is escaped
pub fn email_html(lead: &LeadPayload) -> String {
    let mut rows = String::new();
    for (label, value) in lead.contact_fields() {
        rows.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            label,
            html_escape(value)
        ));
    }

    format!(
        "<h2>Cerere nouă de pe site</h2><table>{}</table><h3>Mesaj</h3><p>{}</p>",
        rows,
        nl2br(lead.message.trim())
    )
}

/// Plain-text body of the chat message
pub fn chat_text(lead: &LeadPayload) -> String {
    let mut text = String::from("Cerere nouă de pe site\n\n");
    for (label, value) in lead.contact_fields() {
        text.push_str(&format!("{}: {}\n", label, value));
    }
    text.push_str(&format!("\n{}", lead.message.trim()));
    text
}
