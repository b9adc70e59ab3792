//! Site configuration (atelier.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::i18n::Lang;
use crate::store::DEFAULT_STORAGE_KEY;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: Lang,

    // Storage
    pub storage_dir: String,
    pub storage_key: String,
    pub i18n_dir: String,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub lead: LeadConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Atelier Mobila".to_string(),
            language: Lang::Ro,

            storage_dir: ".atelier".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            i18n_dir: "languages".to_string(),

            server: ServerConfig::default(),
            lead: LeadConfig::default(),
            email: EmailConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override secrets and addresses from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Override from an arbitrary variable lookup; empty values are ignored
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("RESEND_API_KEY") {
            self.email.api_key = Some(key);
        }
        if let Some(from) = get("LEAD_EMAIL_FROM") {
            self.email.from = from;
        }
        if let Some(to) = get("LEAD_EMAIL_TO") {
            self.email.to = to;
        }
        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.chat.bot_token = Some(token);
        }
        if let Some(chat_id) = get("TELEGRAM_CHAT_ID") {
            self.chat.chat_id = Some(chat_id);
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

/// Lead submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadConfig {
    /// Seconds to wait for the notification before giving up
    pub timeout_secs: u64,
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Transactional email API used for lead notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub from: String,
    pub to: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_string(),
            api_key: None,
            from: String::new(),
            to: String::new(),
        }
    }
}

impl EmailConfig {
    /// API key, sender and recipient are all present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && !self.from.trim().is_empty() && !self.to.trim().is_empty()
    }
}

/// Chat bot API used by the legacy lead handler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            bot_token: None,
            chat_id: None,
        }
    }
}

impl ChatConfig {
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.storage_key, "atelier_db");
        assert_eq!(config.lead.timeout_secs, 10);
        assert_eq!(config.server.port, 4000);
        assert!(!config.email.is_configured());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Mobila Test
language: en
storage_dir: data
server:
  port: 8080
email:
  from: site@example.com
  to: office@example.com
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Mobila Test");
        assert_eq!(config.language, Lang::En);
        assert_eq!(config.storage_dir, "data");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.email.api_url, "https://api.resend.com/emails");
        assert!(!config.email.is_configured());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("RESEND_API_KEY", "re_123"),
            ("LEAD_EMAIL_FROM", "site@example.com"),
            ("LEAD_EMAIL_TO", "office@example.com"),
            ("TELEGRAM_BOT_TOKEN", ""),
        ]
        .into_iter()
        .collect();

        let mut config = SiteConfig::default();
        config.apply_env_with(|name| vars.get(name).map(|v| v.to_string()));

        assert!(config.email.is_configured());
        assert_eq!(config.email.api_key.as_deref(), Some("re_123"));
        // Empty values do not count
        assert!(config.chat.bot_token.is_none());
    }

    #[test]
    fn test_secrets_not_serialized() {
        let mut config = SiteConfig::default();
        config.email.api_key = Some("secret".to_string());
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("secret"));
    }
}
