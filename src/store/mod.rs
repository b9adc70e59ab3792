//! Content store
//!
//! The [`ContentStore`] owns the single [`AppDatabase`] document holding all
//! site content. The document is hydrated lazily from a [`StorageBackend`] on
//! first access and kept in memory afterwards; every mutation rewrites the
//! whole document to storage.
//!
//! Loading never fails: a missing, unparsable or outdated document is replaced
//! by the seed document, which is persisted straight away. Losing a corrupt
//! local copy is preferred over refusing to serve the site.

mod migration;
mod storage;

pub use migration::{reconcile_with_seed, MigrationPolicy, ReseedOlder};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};

use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

use crate::content::{
    new_id, seed::seed_database, AboutContent, AppDatabase, ContactInfo, Lead, LeadStatus, Media,
    Page, ProcessStep, Project, Record, Review, ReviewStatus, Service, Settings, CURRENT_VERSION,
};

/// Default storage key of the site document
pub const DEFAULT_STORAGE_KEY: &str = "atelier_db";

/// Content store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Review {0} cannot be approved without public consent")]
    ConsentRequired(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Only the version marker, read before committing to a full parse
#[derive(Deserialize)]
struct StoredVersion {
    #[serde(default)]
    version: Option<u32>,
}

/// Owner of the site document
pub struct ContentStore {
    backend: Box<dyn StorageBackend>,
    key: String,
    policy: Box<dyn MigrationPolicy>,
    doc: Option<AppDatabase>,
}

impl ContentStore {
    /// Create a store over `backend`; nothing is read until first access
    pub fn new(backend: impl StorageBackend + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
            policy: Box::new(ReseedOlder::default()),
            doc: None,
        }
    }

    /// File-backed store keeping `<dir>/<key>.json`
    pub fn open<P: AsRef<Path>>(dir: P, key: impl Into<String>) -> Self {
        Self::new(FileStorage::new(dir), key)
    }

    /// Store backed by process memory
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
    }

    /// Replace the schema upgrade policy
    pub fn with_policy(mut self, policy: impl MigrationPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    /// Whether the document has been hydrated into memory
    pub fn is_loaded(&self) -> bool {
        self.doc.is_some()
    }

    /// The in-memory document, hydrating it on first call
    pub fn load(&mut self) -> &AppDatabase {
        self.ensure_loaded()
    }

    /// Serialize the whole document and overwrite the persisted copy
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&*self.ensure_loaded())?;
        self.backend.write(&self.key, &json)
    }

    /// Pretty-printed JSON of the whole document
    pub fn export_db(&mut self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.ensure_loaded())?)
    }

    /// Replace the whole document with the parsed `text` and persist it
    ///
    /// Text that does not parse as a document leaves the current one untouched.
    pub fn import_db(&mut self, text: &str) -> Result<()> {
        let doc: AppDatabase = serde_json::from_str(text)?;
        if doc.version < CURRENT_VERSION {
            tracing::warn!(
                "Imported document has version {} (current {}), it will be reseeded on next start",
                doc.version,
                CURRENT_VERSION
            );
        }
        self.doc = Some(doc);
        self.save()?;
        tracing::info!("Imported content document");
        Ok(())
    }

    /// Drop the persisted document and start over from the seed
    pub fn reset_to_seed(&mut self) -> &AppDatabase {
        if let Err(e) = self.backend.remove(&self.key) {
            tracing::warn!("Failed to remove stored content: {}", e);
        }
        tracing::info!("Resetting content to seed");
        // Overwrites the old entry even when removal failed
        let seed = self.reseed();
        self.doc = Some(seed);
        self.ensure_loaded()
    }

    fn ensure_loaded(&mut self) -> &mut AppDatabase {
        if self.doc.is_none() {
            let doc = self.hydrate();
            self.doc = Some(doc);
        }
        self.doc.get_or_insert_with(seed_database)
    }

    fn hydrate(&mut self) -> AppDatabase {
        let raw = match self.backend.read(&self.key) {
            Ok(raw) => raw,
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!("Stored content is unreadable ({}), reseeding", e);
                return self.reseed();
            }
            Err(e) => {
                // Leave the stored copy untouched
                tracing::warn!("Failed to read stored content ({}), serving seed", e);
                return seed_database();
            }
        };

        let Some(raw) = raw else {
            tracing::info!("No stored content under '{}', seeding", self.key);
            return self.reseed();
        };

        let stored_version = match serde_json::from_str::<StoredVersion>(&raw) {
            Ok(stored) => stored.version,
            Err(e) => {
                tracing::warn!("Stored content is not a JSON document ({}), reseeding", e);
                return self.reseed();
            }
        };

        if self.policy.should_reseed(stored_version) {
            tracing::info!(
                "Stored content version {:?} is outdated (current {}), reseeding",
                stored_version,
                CURRENT_VERSION
            );
            return self.reseed();
        }

        let mut doc: AppDatabase = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Stored content does not match the schema ({}), reseeding", e);
                return self.reseed();
            }
        };

        let injected = reconcile_with_seed(&mut doc);
        if !injected.is_empty() {
            tracing::info!("Restored seed content for: {}", injected.join(", "));
            self.persist(&doc);
        }

        doc
    }

    fn reseed(&mut self) -> AppDatabase {
        let seed = seed_database();
        self.persist(&seed);
        seed
    }

    fn persist(&mut self, doc: &AppDatabase) {
        let written = serde_json::to_string(doc)
            .map_err(StoreError::from)
            .and_then(|json| self.backend.write(&self.key, &json));
        if let Err(e) = written {
            tracing::warn!("Failed to persist content: {}", e);
        }
    }

    /// Persist after a mutation; failures are logged, never returned
    fn commit(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to persist content: {}", e);
        }
    }

    // Settings and singleton blocks

    pub fn get_settings(&mut self) -> &Settings {
        &self.ensure_loaded().settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.ensure_loaded().settings = settings;
        self.commit();
    }

    pub fn get_about(&mut self) -> &AboutContent {
        &self.ensure_loaded().about
    }

    pub fn update_about(&mut self, about: AboutContent) {
        self.ensure_loaded().about = about;
        self.commit();
    }

    pub fn get_contact(&mut self) -> &ContactInfo {
        &self.ensure_loaded().contact
    }

    pub fn update_contact(&mut self, contact: ContactInfo) {
        self.ensure_loaded().contact = contact;
        self.commit();
    }

    // Projects

    pub fn get_projects(&mut self) -> &[Project] {
        &self.ensure_loaded().projects
    }

    pub fn get_published_projects(&mut self) -> Vec<&Project> {
        self.ensure_loaded()
            .projects
            .iter()
            .filter(|p| p.published)
            .collect()
    }

    pub fn get_project_by_id(&mut self, id: &str) -> Option<&Project> {
        self.ensure_loaded().projects.iter().find(|p| p.id == id)
    }

    pub fn upsert_project(&mut self, mut project: Project) -> Project {
        ensure_id(&mut project.id);
        upsert_record(&mut self.ensure_loaded().projects, project.clone());
        self.commit();
        project
    }

    /// Delete a project together with all of its media
    pub fn delete_project(&mut self, id: &str) -> bool {
        let doc = self.ensure_loaded();
        let removed = remove_record(&mut doc.projects, id);
        let media_before = doc.media.len();
        doc.media.retain(|m| m.project_id != id);
        let media_removed = media_before - doc.media.len();
        tracing::debug!("Deleted project {} and {} media", id, media_removed);
        self.commit();
        removed
    }

    // Media

    /// All media, or the media of one project ordered by position
    pub fn get_media(&mut self, project_id: Option<&str>) -> Vec<&Media> {
        let media = &self.ensure_loaded().media;
        match project_id {
            Some(project_id) => {
                let mut selected: Vec<&Media> =
                    media.iter().filter(|m| m.project_id == project_id).collect();
                selected.sort_by_key(|m| m.order);
                selected
            }
            None => media.iter().collect(),
        }
    }

    pub fn get_media_by_id(&mut self, id: &str) -> Option<&Media> {
        self.ensure_loaded().media.iter().find(|m| m.id == id)
    }

    pub fn upsert_media(&mut self, mut media: Media) -> Media {
        ensure_id(&mut media.id);
        media.rating = media.rating.min(5);
        upsert_record(&mut self.ensure_loaded().media, media.clone());
        self.commit();
        media
    }

    pub fn delete_media(&mut self, id: &str) -> bool {
        let removed = remove_record(&mut self.ensure_loaded().media, id);
        self.commit();
        removed
    }

    // Pages

    pub fn get_pages(&mut self) -> &[Page] {
        &self.ensure_loaded().pages
    }

    pub fn get_page_by_id(&mut self, id: &str) -> Option<&Page> {
        self.ensure_loaded().pages.iter().find(|p| p.id == id)
    }

    pub fn get_page_by_slug(&mut self, slug: &str) -> Option<&Page> {
        self.ensure_loaded().pages.iter().find(|p| p.slug == slug)
    }

    /// Insert or replace a page; the slug is normalized, derived from the title when empty
    pub fn upsert_page(&mut self, mut page: Page) -> Page {
        ensure_id(&mut page.id);
        let source = if page.slug.trim().is_empty() {
            page.title.ro.clone()
        } else {
            page.slug.clone()
        };
        page.slug = slug::slugify(source);
        upsert_record(&mut self.ensure_loaded().pages, page.clone());
        self.commit();
        page
    }

    pub fn delete_page(&mut self, id: &str) -> bool {
        let removed = remove_record(&mut self.ensure_loaded().pages, id);
        self.commit();
        removed
    }

    // Leads

    pub fn get_leads(&mut self) -> &[Lead] {
        &self.ensure_loaded().leads
    }

    pub fn get_lead_by_id(&mut self, id: &str) -> Option<&Lead> {
        self.ensure_loaded().leads.iter().find(|l| l.id == id)
    }

    pub fn upsert_lead(&mut self, mut lead: Lead) -> Lead {
        ensure_id(&mut lead.id);
        upsert_record(&mut self.ensure_loaded().leads, lead.clone());
        self.commit();
        lead
    }

    pub fn update_lead_status(&mut self, id: &str, status: LeadStatus) -> Result<Lead> {
        let lead = self
            .ensure_loaded()
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "lead",
                id: id.to_string(),
            })?;
        lead.status = status;
        let updated = lead.clone();
        self.commit();
        Ok(updated)
    }

    pub fn delete_lead(&mut self, id: &str) -> bool {
        let removed = remove_record(&mut self.ensure_loaded().leads, id);
        self.commit();
        removed
    }

    // Reviews

    pub fn get_reviews(&mut self) -> &[Review] {
        &self.ensure_loaded().reviews
    }

    /// Reviews that may be shown publicly: approved and consented
    pub fn get_approved_reviews(&mut self) -> Vec<&Review> {
        self.ensure_loaded()
            .reviews
            .iter()
            .filter(|r| r.is_public())
            .collect()
    }

    pub fn get_review_by_id(&mut self, id: &str) -> Option<&Review> {
        self.ensure_loaded().reviews.iter().find(|r| r.id == id)
    }

    /// Insert or replace a review as given, without checking the consent gate
    ///
    /// Moderation decisions go through [`ContentStore::moderate_review`].
    pub fn upsert_review(&mut self, mut review: Review) -> Review {
        ensure_id(&mut review.id);
        review.rating = review.rating.min(5);
        upsert_record(&mut self.ensure_loaded().reviews, review.clone());
        self.commit();
        review
    }

    /// Change a review's moderation status; approval requires public consent
    pub fn moderate_review(&mut self, id: &str, status: ReviewStatus) -> Result<Review> {
        let review = self
            .ensure_loaded()
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "review",
                id: id.to_string(),
            })?;

        if status == ReviewStatus::Approved && !review.consent_public {
            return Err(StoreError::ConsentRequired(id.to_string()));
        }

        review.status = status;
        let updated = review.clone();
        self.commit();
        Ok(updated)
    }

    pub fn delete_review(&mut self, id: &str) -> bool {
        let removed = remove_record(&mut self.ensure_loaded().reviews, id);
        self.commit();
        removed
    }

    // Services

    pub fn get_services(&mut self) -> &[Service] {
        &self.ensure_loaded().services
    }

    pub fn upsert_service(&mut self, mut service: Service) -> Service {
        ensure_id(&mut service.id);
        upsert_record(&mut self.ensure_loaded().services, service.clone());
        self.commit();
        service
    }

    pub fn delete_service(&mut self, id: &str) -> bool {
        let removed = remove_record(&mut self.ensure_loaded().services, id);
        self.commit();
        removed
    }

    // Process steps

    pub fn get_process_steps(&mut self) -> &[ProcessStep] {
        &self.ensure_loaded().process_steps
    }

    pub fn upsert_process_step(&mut self, mut step: ProcessStep) -> ProcessStep {
        ensure_id(&mut step.id);
        upsert_record(&mut self.ensure_loaded().process_steps, step.clone());
        self.commit();
        step
    }

    pub fn delete_process_step(&mut self, id: &str) -> bool {
        let removed = remove_record(&mut self.ensure_loaded().process_steps, id);
        self.commit();
        removed
    }
}

fn ensure_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = new_id();
    }
}

/// Replace the record with the same id, or append it
fn upsert_record<T: Record>(items: &mut Vec<T>, record: T) {
    match items.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => *slot = record,
        None => items.push(record),
    }
}

fn remove_record<T: Record>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|r| r.id() != id);
    items.len() != before
}
