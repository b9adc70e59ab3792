//! atelier-cms: content store and lead handling for a furniture workshop site
//!
//! All site content lives in one versioned JSON document owned by a
//! [`store::ContentStore`]. Around it the crate provides the lead
//! notification handlers, a JSON content API with a small page preview, and a
//! CLI to initialise, serve, export, import and reset the store.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod i18n;
pub mod leads;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "atelier.yml";

/// The main application
#[derive(Debug, Clone)]
pub struct Atelier {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the persisted content document
    pub storage_dir: PathBuf,
    /// Directory with message catalog overrides
    pub i18n_dir: PathBuf,
}

impl Atelier {
    /// Create an instance from a directory
    ///
    /// `atelier.yml` is optional; secrets are always taken from the
    /// environment when present.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        let storage_dir = base_dir.join(&config.storage_dir);
        let i18n_dir = base_dir.join(&config.i18n_dir);

        Ok(Self {
            config,
            base_dir,
            storage_dir,
            i18n_dir,
        })
    }

    /// File-backed content store for this site
    pub fn open_store(&self) -> store::ContentStore {
        store::ContentStore::open(&self.storage_dir, self.config.storage_key.clone())
    }

    /// Message catalog with this site's overrides applied
    pub fn catalog(&self) -> i18n::Catalog {
        let mut catalog = i18n::Catalog::new();
        if let Err(e) = catalog.load_overrides(&self.i18n_dir) {
            tracing::warn!("Failed to load language files from {:?}: {}", self.i18n_dir, e);
        }
        catalog
    }

    /// Initialize the site directory and seed the store
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Start the HTTP server
    pub async fn serve(&self, ip: &str, port: u16, ephemeral: bool) -> Result<()> {
        commands::serve::run(self, ip, port, ephemeral).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config_file() {
        let dir = TempDir::new().unwrap();
        let atelier = Atelier::new(dir.path()).unwrap();
        assert_eq!(atelier.storage_dir, dir.path().join(".atelier"));
        assert_eq!(atelier.config.storage_key, store::DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_new_reads_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "storage_dir: data\nstorage_key: site\n",
        )
        .unwrap();

        let atelier = Atelier::new(dir.path()).unwrap();
        let mut store = atelier.open_store();
        store.load();
        assert!(dir.path().join("data/site.json").exists());
    }
}
