//! The catalog root.
//!
//! A [`Catalog`] owns the material forest (with its top-level ordering) and
//! the configuration registry (with its insertion ordering) for one session.
//! Materials are owned exclusively by their parent trees; configurations
//! reference each other by name through the registry, which is what lets
//! several parents share one sub-configuration without shared ownership.
//!
//! All graph mutation goes through the catalog so that every change bumps
//! the mutation version; the aggregation cache compares itself against that
//! version and can therefore never serve stale results (see the `aggregate`
//! module).

use std::collections::BTreeMap;

use crate::aggregate::{self, EffectiveCache};
use crate::configuration::Configuration;
use crate::error::{ModelError, Result};
use crate::material::Material;

/// Root container for the material forest and the configuration graph.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) materials: Vec<Material>,
    pub(crate) configurations: BTreeMap<String, Configuration>,
    pub(crate) configuration_order: Vec<String>,
    /// Monotonic mutation counter; bumped on every graph mutation.
    pub(crate) version: u64,
    pub(crate) cache: EffectiveCache,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- material forest ----

    /// Append a top-level material tree.
    pub fn add_material_tree(&mut self, material: Material) {
        self.materials.push(material);
    }

    /// Top-level material trees in declared order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Top-level material names in declared order, for display.
    pub fn material_names(&self) -> Vec<&str> {
        self.materials.iter().map(Material::name).collect()
    }

    /// Depth-first, first-match lookup across all root trees in their
    /// declared order, then into each tree parent-then-children.
    pub fn find_material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find_map(|tree| tree.find(name))
    }

    /// Mutable variant of [`find_material`](Self::find_material), used to
    /// reach a parent node for `add_child` / `remove_child` edits.
    pub fn find_material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.iter_mut().find_map(|tree| tree.find_mut(name))
    }

    // ---- configuration registry ----

    /// Register a new, empty configuration under `name`.
    pub fn add_configuration(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.configurations.contains_key(&name) {
            return Err(ModelError::DuplicateName { name });
        }
        self.configuration_order.push(name.clone());
        self.configurations
            .insert(name.clone(), Configuration::new(name));
        Ok(())
    }

    /// Replace the configuration registered under `name` with `replacement`,
    /// keeping its slot in the insertion order. A no-op when `name` is not
    /// registered; callers wanting an existence guarantee check first.
    ///
    /// The registry key stays authoritative: the replacement is re-keyed to
    /// `name`, whatever it was constructed as. Renaming a configuration is
    /// a remove-and-add, since references held by other configurations go
    /// by name.
    pub fn update_configuration(&mut self, name: &str, mut replacement: Configuration) {
        if !self.configurations.contains_key(name) {
            return;
        }
        replacement.rename(name);
        self.configurations.insert(name.to_string(), replacement);
        self.touch();
    }

    /// Look up a configuration by name. Absence is a normal result.
    pub fn get_configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.get(name)
    }

    /// Registered configuration names in insertion order, for display.
    pub fn configuration_names(&self) -> &[String] {
        &self.configuration_order
    }

    /// Registered configurations in insertion order.
    pub fn configurations(&self) -> impl Iterator<Item = &Configuration> {
        self.configuration_order
            .iter()
            .filter_map(|name| self.configurations.get(name))
    }

    /// Unregister a configuration. References to it held by other
    /// configurations are stripped so the graph stays resolvable. Returns
    /// `false` if no such configuration was registered.
    pub fn remove_configuration(&mut self, name: &str) -> bool {
        if self.configurations.remove(name).is_none() {
            return false;
        }
        self.configuration_order.retain(|entry| entry != name);
        for config in self.configurations.values_mut() {
            config.remove_sub_configuration(name);
        }
        self.touch();
        true
    }

    // ---- reference mutation ----

    /// Add a material reference with the given print amount to a registered
    /// configuration. The material must exist in the material catalog.
    /// Re-adding an existing reference updates the amount in place.
    pub fn add_material(&mut self, config: &str, material: &str, amount: u64) -> Result<()> {
        if self.find_material(material).is_none() {
            return Err(ModelError::UnresolvedMaterial {
                material: material.to_string(),
                configuration: config.to_string(),
            });
        }
        let entry = self
            .configurations
            .get_mut(config)
            .ok_or_else(|| ModelError::UnknownConfiguration {
                name: config.to_string(),
            })?;
        entry.add_material(material, amount);
        self.touch();
        Ok(())
    }

    /// Set the print amount of an existing material reference. Returns
    /// `false` when the configuration is unknown or the material was never
    /// added to it.
    pub fn set_material_amount(&mut self, config: &str, material: &str, amount: u64) -> bool {
        let changed = self
            .configurations
            .get_mut(config)
            .is_some_and(|entry| entry.set_material_amount(material, amount));
        if changed {
            self.touch();
        }
        changed
    }

    /// Remove a material reference. Returns `false` when there was nothing
    /// to remove.
    pub fn remove_material(&mut self, config: &str, material: &str) -> bool {
        let removed = self
            .configurations
            .get_mut(config)
            .is_some_and(|entry| entry.remove_material(material));
        if removed {
            self.touch();
        }
        removed
    }

    /// Add a sub-configuration reference with the given multiplier. Both
    /// names must be registered, and the new edge must not close a cycle.
    pub fn add_sub_configuration(&mut self, config: &str, sub: &str, amount: u64) -> Result<()> {
        if !self.configurations.contains_key(config) {
            return Err(ModelError::UnknownConfiguration {
                name: config.to_string(),
            });
        }
        if !self.configurations.contains_key(sub) {
            return Err(ModelError::UnresolvedConfiguration {
                configuration: sub.to_string(),
                referenced_by: config.to_string(),
            });
        }
        // Refuse an edge config -> sub when config is already reachable
        // from sub; the path back plus the new edge is the cycle.
        if let Some(path) = aggregate::find_path(&self.configurations, sub, config) {
            let mut cycle = Vec::with_capacity(path.len() + 1);
            cycle.push(config.to_string());
            cycle.extend(path);
            return Err(ModelError::CyclicConfiguration { cycle });
        }
        if let Some(entry) = self.configurations.get_mut(config) {
            entry.add_sub_configuration(sub, amount);
        }
        self.touch();
        Ok(())
    }

    /// Set the multiplier of an existing sub-configuration reference.
    /// Returns `false` when the configuration is unknown or the reference
    /// was never added.
    pub fn set_sub_configuration_amount(&mut self, config: &str, sub: &str, amount: u64) -> bool {
        let changed = self
            .configurations
            .get_mut(config)
            .is_some_and(|entry| entry.set_sub_configuration_amount(sub, amount));
        if changed {
            self.touch();
        }
        changed
    }

    /// Remove a sub-configuration reference. Returns `false` when there was
    /// nothing to remove.
    pub fn remove_sub_configuration(&mut self, config: &str, sub: &str) -> bool {
        let removed = self
            .configurations
            .get_mut(config)
            .is_some_and(|entry| entry.remove_sub_configuration(sub));
        if removed {
            self.touch();
        }
        removed
    }

    /// Check the whole configuration graph for reference cycles.
    pub fn verify_acyclic(&self) -> Result<()> {
        match aggregate::find_cycle(&self.configurations) {
            Some(cycle) => Err(ModelError::CyclicConfiguration { cycle }),
            None => Ok(()),
        }
    }

    /// Bump the mutation version, lazily invalidating cached aggregation
    /// results for every configuration.
    fn touch(&mut self) {
        self.version += 1;
    }
}
