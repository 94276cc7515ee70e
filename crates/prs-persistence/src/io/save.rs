//! Catalog saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::convert;
use crate::error::{PersistenceError, Result};
use crate::types::CatalogFile;

/// Save a catalog back to its backing file.
///
/// Only the `configurations` section of the retained document is replaced;
/// the material section and any unknown top-level key are written back
/// exactly as loaded. Uses atomic write (temp file + rename) to prevent
/// data corruption on crash or power loss.
pub fn save_catalog(file: &mut CatalogFile) -> Result<()> {
    let records = convert::configurations_to_raw(&file.catalog);
    let section =
        serde_json::to_value(&records).map_err(|e| PersistenceError::Serialization { source: e })?;

    let Some(root) = file.document.as_object_mut() else {
        return Err(PersistenceError::Malformed {
            path: file.path.clone(),
            reason: "document root is not an object".to_string(),
        });
    };
    root.insert("configurations".to_string(), section);

    let contents = serde_json::to_string_pretty(&file.document)
        .map_err(|e| PersistenceError::Serialization { source: e })?;
    write_atomic(&file.path, contents.as_bytes())?;

    tracing::info!(
        "Saved catalog to {} ({} configurations)",
        file.path.display(),
        records.len()
    );
    Ok(())
}

/// Write to a temp file next to the target, then rename over it.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
