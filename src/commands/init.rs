//! Initialize a new site directory

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::{Atelier, CONFIG_FILE};

const DEFAULT_CONFIG: &str = r#"# Atelier CMS configuration

# Site
title: Atelier Mobila
language: ro

# Storage
storage_dir: .atelier
storage_key: atelier_db
i18n_dir: languages

# Server
server:
  ip: localhost
  port: 4000

# Lead submission
lead:
  timeout_secs: 10

# Notifications
# Secrets come from the environment (or a .env file):
#   RESEND_API_KEY, LEAD_EMAIL_FROM, LEAD_EMAIL_TO,
#   TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID
email:
  api_url: https://api.resend.com/emails
  from: ''
  to: ''
chat:
  api_url: https://api.telegram.org
"#;

const ENV_EXAMPLE: &str = "RESEND_API_KEY=\nLEAD_EMAIL_FROM=\nLEAD_EMAIL_TO=\nTELEGRAM_BOT_TOKEN=\nTELEGRAM_CHAT_ID=\n";

/// Write the default configuration files into `target_dir`
///
/// Existing files are left alone.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let env_path = target_dir.join(".env.example");
    if !env_path.exists() {
        fs::write(&env_path, ENV_EXAMPLE)?;
    }

    fs::create_dir_all(target_dir.join("languages"))?;

    Ok(())
}

/// Run the init command with an existing instance: write files, then seed
pub fn run(atelier: &Atelier) -> Result<()> {
    init_site(&atelier.base_dir)?;

    let mut store = atelier.open_store();
    let projects = store.load().projects.len();
    store.save()?;
    tracing::info!(
        "Content store ready at {:?} ({} projects)",
        atelier.storage_dir,
        projects
    );

    Ok(())
}
