//! Import a content document

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::Atelier;

/// Replace the stored document with the contents of `input`
pub fn run(atelier: &Atelier, input: &Path) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?;

    let mut store = atelier.open_store();
    store
        .import_db(&text)
        .with_context(|| format!("{:?} is not a valid content document", input))?;

    tracing::info!("Imported content from {:?}", input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::export;
    use tempfile::TempDir;

    #[test]
    fn test_import_exported_document() {
        let dir = TempDir::new().unwrap();
        let atelier = Atelier::new(dir.path()).unwrap();
        let backup = dir.path().join("backup.json");

        {
            let mut store = atelier.open_store();
            let settings = crate::content::Settings {
                brand_name: "Exported".to_string(),
                ..store.get_settings().clone()
            };
            store.update_settings(settings);
        }
        export::run(&atelier, Some(&backup)).unwrap();
        crate::commands::reset::run(&atelier).unwrap();

        run(&atelier, &backup).unwrap();

        let mut store = atelier.open_store();
        assert_eq!(store.get_settings().brand_name, "Exported");
    }

    #[test]
    fn test_import_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let atelier = Atelier::new(dir.path()).unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();

        assert!(run(&atelier, &bad).is_err());
    }
}
