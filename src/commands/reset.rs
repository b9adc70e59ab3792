//! Reset the content document to the seed

use anyhow::Result;

use crate::Atelier;

pub fn run(atelier: &Atelier) -> Result<()> {
    let mut store = atelier.open_store();
    let version = store.reset_to_seed().version;
    tracing::info!("Content reset to seed (version {})", version);
    Ok(())
}
