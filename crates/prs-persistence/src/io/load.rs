//! Catalog loading operations.

use std::fs;
use std::path::Path;

use crate::convert;
use crate::error::{PersistenceError, Result};
use crate::types::{CatalogFile, RawDocument};

/// Load a catalog from a JSON document.
///
/// The parsed document is retained on the returned [`CatalogFile`] so that
/// everything outside the configuration section survives the next save
/// byte-for-byte (the material section is never rewritten by this tool).
pub fn load_catalog(path: &Path) -> Result<CatalogFile> {
    if !path.exists() {
        return Err(PersistenceError::FileMissing {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let document: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| PersistenceError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // Validate against the schema and build the object graph.
    let raw: RawDocument =
        serde_json::from_value(document.clone()).map_err(|e| PersistenceError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let catalog = convert::build_catalog(&raw, path)?;

    tracing::info!(
        "Loaded catalog from {} ({} materials, {} configurations)",
        path.display(),
        raw.materials.len(),
        raw.configurations.len()
    );

    Ok(CatalogFile {
        path: path.to_path_buf(),
        document,
        catalog,
    })
}

impl CatalogFile {
    /// Re-read the backing file, replacing the in-memory graph.
    ///
    /// This is the resynchronization point after an external collaborator
    /// has swapped the file underneath us; until it is called, file and
    /// memory are allowed to diverge. On error the current state is kept.
    pub fn reload(&mut self) -> Result<()> {
        *self = load_catalog(&self.path)?;
        tracing::info!("Reloaded catalog from {}", self.path.display());
        Ok(())
    }
}
