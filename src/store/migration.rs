//! Schema upgrade policy and seed reconciliation

use crate::content::{seed, AppDatabase, CURRENT_VERSION};

/// Decides whether a stored document must be thrown away and replaced by the seed
pub trait MigrationPolicy: Send + Sync {
    fn should_reseed(&self, stored_version: Option<u32>) -> bool;
}

/// Reseed when the stored version is absent or older than `current`
#[derive(Debug, Clone, Copy)]
pub struct ReseedOlder {
    pub current: u32,
}

impl Default for ReseedOlder {
    fn default() -> Self {
        Self {
            current: CURRENT_VERSION,
        }
    }
}

impl MigrationPolicy for ReseedOlder {
    fn should_reseed(&self, stored_version: Option<u32>) -> bool {
        match stored_version {
            Some(version) => version < self.current,
            None => true,
        }
    }
}

impl<F> MigrationPolicy for F
where
    F: Fn(Option<u32>) -> bool + Send + Sync,
{
    fn should_reseed(&self, stored_version: Option<u32>) -> bool {
        self(stored_version)
    }
}

/// Refill seeded sections that are missing or empty
///
/// Returns the names of the sections that were injected; an empty result
/// means the document was left untouched.
pub fn reconcile_with_seed(doc: &mut AppDatabase) -> Vec<&'static str> {
    let mut injected = Vec::new();

    if doc.projects.is_empty() {
        doc.projects = seed::seed_projects();
        injected.push("projects");
    }
    if doc.services.is_empty() {
        doc.services = seed::seed_services();
        injected.push("services");
    }
    if doc.process_steps.is_empty() {
        doc.process_steps = seed::seed_process_steps();
        injected.push("processSteps");
    }
    if doc.media.is_empty() {
        doc.media = seed::seed_media();
        injected.push("media");
    }
    if doc.contact.is_blank() {
        doc.contact = seed::seed_contact();
        injected.push("contact");
    }
    if doc.reviews.is_empty() {
        doc.reviews = seed::seed_reviews();
        injected.push("reviews");
    }
    if doc.about.is_blank() {
        doc.about = seed::seed_about();
        injected.push("about");
    }

    injected
}
