//! Wire types for the catalog document.
//!
//! The on-disk catalog is a single JSON document with two top-level
//! sections: `materials` (an ordered array of material trees) and
//! `configurations` (an ordered array of configuration records). These types
//! mirror that schema exactly; conversion to and from the in-memory model
//! lives in `convert`.

use std::path::{Path, PathBuf};

use prs_model::Catalog;
use serde::{Deserialize, Serialize};

/// The parsed catalog document.
///
/// Required fields carry no serde defaults: a section or field the schema
/// demands that is missing from the file is a malformed catalog, not an
/// empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub materials: Vec<RawMaterialNode>,
    pub configurations: Vec<RawConfiguration>,
}

/// One node of a material tree.
///
/// Top-level nodes omit `pages`; nested nodes must carry it (checked during
/// conversion, since serde cannot express depth-dependent requirements).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMaterialNode {
    pub name: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<u32>>,
    pub children: Vec<RawMaterialNode>,
}

/// One configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfiguration {
    pub name: String,
    pub materials: Vec<RawReference>,
    pub configurations: Vec<RawReference>,
}

/// A named reference with its print amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReference {
    pub name: String,
    pub amount: u64,
}

/// A live catalog together with its backing file.
///
/// `document` retains the JSON exactly as loaded. Saving only replaces the
/// `configurations` section inside it, so the material section — and any
/// top-level key this tool does not know about — round-trips verbatim.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub(crate) path: PathBuf,
    pub(crate) document: serde_json::Value,
    /// The in-memory object graph. Mutate and query it directly.
    pub catalog: Catalog,
}

impl CatalogFile {
    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
