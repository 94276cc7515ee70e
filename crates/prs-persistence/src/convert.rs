//! Conversion between wire records and the in-memory model.
//!
//! Building the object graph is two-phase because configuration records may
//! reference each other irrespective of declaration order: phase 1 registers
//! every configuration and resolves its material references, phase 2 wires
//! the sub-configuration references. Only after phase 2 can the graph be
//! checked for cycles as a whole.

use std::path::Path;

use prs_model::{Catalog, Material};

use crate::error::{PersistenceError, Result};
use crate::types::{RawConfiguration, RawDocument, RawMaterialNode, RawReference};

/// Build the in-memory catalog from a parsed document. `path` is only used
/// for error reporting.
pub fn build_catalog(document: &RawDocument, path: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for node in &document.materials {
        catalog.add_material_tree(build_material_tree(node, path)?);
    }

    // Phase 1: register every configuration and resolve material references.
    for record in &document.configurations {
        catalog.add_configuration(record.name.as_str())?;
        for reference in &record.materials {
            catalog.add_material(&record.name, &reference.name, reference.amount)?;
        }
    }

    // Phase 2: wire sub-configuration references against the full registry.
    for record in &document.configurations {
        for reference in &record.configurations {
            catalog.add_sub_configuration(&record.name, &reference.name, reference.amount)?;
        }
    }

    catalog.verify_acyclic()?;
    Ok(catalog)
}

/// Build one material tree. The root node carries no page selection; every
/// nested node must.
fn build_material_tree(node: &RawMaterialNode, path: &Path) -> Result<Material> {
    let mut root = Material::new(&node.name, &node.filename);
    for child in &node.children {
        root.add_child(build_sub_material(child, path)?);
    }
    Ok(root)
}

fn build_sub_material(node: &RawMaterialNode, path: &Path) -> Result<Material> {
    let Some(pages) = node.pages.clone() else {
        return Err(PersistenceError::Malformed {
            path: path.to_path_buf(),
            reason: format!("nested material `{}` is missing `pages`", node.name),
        });
    };
    let mut material = Material::with_pages(&node.name, &node.filename, pages);
    for child in &node.children {
        material.add_child(build_sub_material(child, path)?);
    }
    Ok(material)
}

/// Serialize the configuration section back into wire records, in the
/// catalog's insertion order; each record lists its references in their own
/// insertion order.
pub fn configurations_to_raw(catalog: &Catalog) -> Vec<RawConfiguration> {
    catalog
        .configurations()
        .map(|config| RawConfiguration {
            name: config.name().to_string(),
            materials: config
                .materials()
                .map(|(name, amount)| RawReference {
                    name: name.to_string(),
                    amount,
                })
                .collect(),
            configurations: config
                .sub_configurations()
                .map(|(name, amount)| RawReference {
                    name: name.to_string(),
                    amount,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prs_model::ModelError;

    fn document(json: serde_json::Value) -> RawDocument {
        serde_json::from_value(json).expect("valid document fixture")
    }

    fn path() -> &'static Path {
        Path::new("catalog.json")
    }

    #[test]
    fn builds_forest_and_graph_in_declared_order() {
        let raw = document(serde_json::json!({
            "materials": [
                {"name": "Handbook", "filename": "handbook.pdf", "children": [
                    {"name": "Intro", "filename": "handbook.pdf", "pages": [1, 2], "children": []}
                ]},
                {"name": "Cover", "filename": "cover.pdf", "children": []}
            ],
            "configurations": [
                {"name": "Basic", "materials": [{"name": "Cover", "amount": 1}], "configurations": []},
                {"name": "Pro", "materials": [{"name": "Intro", "amount": 2}],
                 "configurations": [{"name": "Basic", "amount": 3}]}
            ]
        }));

        let catalog = build_catalog(&raw, path()).unwrap();
        assert_eq!(catalog.material_names(), ["Handbook", "Cover"]);
        assert_eq!(
            catalog.configuration_names(),
            ["Basic".to_string(), "Pro".to_string()]
        );
        assert_eq!(
            catalog
                .get_configuration("Pro")
                .unwrap()
                .sub_configuration_amount("Basic"),
            Some(3)
        );
    }

    #[test]
    fn forward_references_resolve_in_phase_two() {
        let raw = document(serde_json::json!({
            "materials": [],
            "configurations": [
                {"name": "Pro", "materials": [],
                 "configurations": [{"name": "Basic", "amount": 2}]},
                {"name": "Basic", "materials": [], "configurations": []}
            ]
        }));

        let catalog = build_catalog(&raw, path()).unwrap();
        assert_eq!(
            catalog
                .get_configuration("Pro")
                .unwrap()
                .sub_configuration_amount("Basic"),
            Some(2)
        );
    }

    #[test]
    fn unresolved_material_fails_the_build() {
        let raw = document(serde_json::json!({
            "materials": [],
            "configurations": [
                {"name": "Basic", "materials": [{"name": "Ghost", "amount": 1}], "configurations": []}
            ]
        }));

        let err = build_catalog(&raw, path()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Model(ModelError::UnresolvedMaterial {
                ref material,
                ref configuration,
            }) if material == "Ghost" && configuration == "Basic"
        ));
    }

    #[test]
    fn unresolved_configuration_fails_the_build() {
        let raw = document(serde_json::json!({
            "materials": [],
            "configurations": [
                {"name": "Basic", "materials": [],
                 "configurations": [{"name": "Ghost", "amount": 1}]}
            ]
        }));

        let err = build_catalog(&raw, path()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Model(ModelError::UnresolvedConfiguration { .. })
        ));
    }

    #[test]
    fn cyclic_records_fail_the_build() {
        let raw = document(serde_json::json!({
            "materials": [],
            "configurations": [
                {"name": "A", "materials": [], "configurations": [{"name": "B", "amount": 1}]},
                {"name": "B", "materials": [], "configurations": [{"name": "A", "amount": 1}]}
            ]
        }));

        let err = build_catalog(&raw, path()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Model(ModelError::CyclicConfiguration { .. })
        ));
    }

    #[test]
    fn duplicate_configuration_records_fail_the_build() {
        let raw = document(serde_json::json!({
            "materials": [],
            "configurations": [
                {"name": "Basic", "materials": [], "configurations": []},
                {"name": "Basic", "materials": [], "configurations": []}
            ]
        }));

        let err = build_catalog(&raw, path()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Model(ModelError::DuplicateName { .. })
        ));
    }

    #[test]
    fn nested_material_without_pages_is_malformed() {
        let raw = document(serde_json::json!({
            "materials": [
                {"name": "Handbook", "filename": "handbook.pdf", "children": [
                    {"name": "Intro", "filename": "handbook.pdf", "children": []}
                ]}
            ],
            "configurations": []
        }));

        let err = build_catalog(&raw, path()).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
    }

    #[test]
    fn raw_records_follow_reference_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.add_material_tree(Material::new("Zeta", "z.pdf"));
        catalog.add_material_tree(Material::new("Alpha", "a.pdf"));
        catalog.add_configuration("Course").unwrap();
        catalog.add_material("Course", "Zeta", 1).unwrap();
        catalog.add_material("Course", "Alpha", 2).unwrap();

        let raw = configurations_to_raw(&catalog);
        let names: Vec<&str> = raw[0].materials.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }
}
