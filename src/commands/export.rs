//! Export the content document

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Atelier;

/// Write the pretty-printed document to `output`, or stdout
pub fn run(atelier: &Atelier, output: Option<&Path>) -> Result<()> {
    let mut store = atelier.open_store();
    let json = store.export_db()?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            tracing::info!("Exported content to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
