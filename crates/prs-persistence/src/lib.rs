//! Catalog file storage for Print Run Studio.
//!
//! This crate loads the shared catalog document into the in-memory model of
//! `prs-model` and writes mutated configuration state back out.
//!
//! # File Format
//!
//! The catalog is a single JSON document:
//!
//! ```text
//! {
//!   "materials":      [ <material tree>... ],   read-only pass-through
//!   "configurations": [ <configuration>... ]    rewritten on save
//! }
//! ```
//!
//! Material trees nest via `children`; nested nodes carry the `pages` they
//! cover. Configuration records reference materials and other configurations
//! by name with integer print amounts.
//!
//! Saving replaces only the `configurations` section inside the document as
//! it was loaded, so the material section — which this tool never edits —
//! round-trips byte-for-byte, as does anything else other tools may have
//! put in the file.
//!
//! # Example
//!
//! ```ignore
//! use prs_persistence::{load_catalog, save_catalog};
//!
//! let mut file = load_catalog(Path::new("data.json"))?;
//! file.catalog.add_configuration("Workshop")?;
//! file.catalog.add_material("Workshop", "Handout", 20)?;
//! save_catalog(&mut file)?;
//! ```
//!
//! # Architecture
//!
//! - `types.rs` - wire records mirroring the JSON schema, plus [`CatalogFile`]
//! - `convert.rs` - two-phase graph build and serialization back to records
//! - `io/` - load/save/reload file operations
//! - `error.rs` - error types with user-friendly messages

mod convert;
mod error;
mod io;
mod types;

// Re-export main types
pub use convert::{build_catalog, configurations_to_raw};
pub use error::{PersistenceError, Result};
pub use io::{load_catalog, save_catalog};
pub use types::{CatalogFile, RawConfiguration, RawDocument, RawMaterialNode, RawReference};
