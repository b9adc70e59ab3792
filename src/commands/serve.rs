//! Start the HTTP server

use anyhow::Result;
use std::sync::Arc;

use crate::server::{self, AppState};
use crate::store::ContentStore;
use crate::Atelier;

/// Serve the content API and lead endpoints
///
/// With `ephemeral` the store lives in memory and starts from the seed.
pub async fn run(atelier: &Atelier, ip: &str, port: u16, ephemeral: bool) -> Result<()> {
    let mut store = if ephemeral {
        tracing::info!("Using an in-memory content store");
        ContentStore::in_memory()
    } else {
        atelier.open_store()
    };
    // Hydrate up front so seeding is logged before the first request
    store.load();

    let state = AppState::from_config(&atelier.config, store, atelier.catalog());
    server::start(Arc::new(state), ip, port).await
}
