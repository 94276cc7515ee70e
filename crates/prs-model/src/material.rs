//! Printable material trees.
//!
//! A material is a printable document, possibly split into paginated
//! sub-documents. Each node exclusively owns its children, so the catalog's
//! material section forms a forest of trees rather than a shared graph.

use serde::Serialize;

/// A printable material node.
///
/// Top-level nodes group a source document; nested nodes additionally carry
/// the page numbers they cover within that document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    name: String,
    filename: String,
    pages: Option<Vec<u32>>,
    children: Vec<Material>,
}

impl Material {
    /// Create a top-level material (no page selection).
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            pages: None,
            children: Vec::new(),
        }
    }

    /// Create a nested material covering the given pages of its document.
    pub fn with_pages(
        name: impl Into<String>,
        filename: impl Into<String>,
        pages: Vec<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            pages: Some(pages),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Page numbers covered by this node, `None` for top-level nodes.
    pub fn pages(&self) -> Option<&[u32]> {
        self.pages.as_deref()
    }

    /// Child materials in their declared order.
    pub fn children(&self) -> &[Material] {
        &self.children
    }

    /// Depth-first, first-match lookup: this node first, then each child
    /// subtree in order. Names are expected to be unique; if they are not,
    /// the earlier node in traversal order shadows deeper matches.
    pub fn find(&self, name: &str) -> Option<&Material> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mutable variant of [`find`](Self::find), same traversal order.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Material> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// Append a child material, taking ownership of it.
    pub fn add_child(&mut self, child: Material) {
        self.children.push(child);
    }

    /// Detach the direct child with the given name and return it, children
    /// and all. Returns `None` if no direct child matches; removal never
    /// recurses into grandchildren.
    pub fn remove_child(&mut self, name: &str) -> Option<Material> {
        let index = self.children.iter().position(|child| child.name == name)?;
        Some(self.children.remove(index))
    }
}
