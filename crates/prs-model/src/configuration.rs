//! Named print configurations.
//!
//! A configuration bundles material references and references to other
//! configurations, each with an integer print amount. References are held by
//! name only; the catalog registry owns the actual entities. Each reference
//! kind keeps an insertion-ordered list next to its name→amount map, and the
//! two are always updated together.

use std::collections::BTreeMap;

/// A named, reusable bundle of material and sub-configuration references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    name: String,
    material_order: Vec<String>,
    material_amounts: BTreeMap<String, u64>,
    sub_config_order: Vec<String>,
    sub_config_amounts: BTreeMap<String, u64>,
}

impl Configuration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material_order: Vec::new(),
            material_amounts: BTreeMap::new(),
            sub_config_order: Vec::new(),
            sub_config_amounts: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Force the name to match the registry key this configuration is
    /// stored under.
    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Referenced material names in insertion order.
    pub fn material_names(&self) -> &[String] {
        &self.material_order
    }

    /// Print amount for a referenced material.
    pub fn material_amount(&self, material: &str) -> Option<u64> {
        self.material_amounts.get(material).copied()
    }

    /// Material name→amount map.
    pub fn material_amounts(&self) -> &BTreeMap<String, u64> {
        &self.material_amounts
    }

    /// `(material, amount)` pairs in insertion order.
    pub fn materials(&self) -> impl Iterator<Item = (&str, u64)> {
        self.material_order
            .iter()
            .map(|name| (name.as_str(), self.material_amounts[name]))
    }

    /// Referenced sub-configuration names in insertion order.
    pub fn sub_configuration_names(&self) -> &[String] {
        &self.sub_config_order
    }

    /// Print multiplier for a referenced sub-configuration.
    pub fn sub_configuration_amount(&self, sub: &str) -> Option<u64> {
        self.sub_config_amounts.get(sub).copied()
    }

    /// Sub-configuration name→multiplier map.
    pub fn sub_configuration_amounts(&self) -> &BTreeMap<String, u64> {
        &self.sub_config_amounts
    }

    /// `(sub-configuration, multiplier)` pairs in insertion order.
    pub fn sub_configurations(&self) -> impl Iterator<Item = (&str, u64)> {
        self.sub_config_order
            .iter()
            .map(|name| (name.as_str(), self.sub_config_amounts[name]))
    }

    /// Add a material reference. Re-adding an existing reference updates the
    /// amount in place instead of duplicating the list entry.
    pub fn add_material(&mut self, material: impl Into<String>, amount: u64) {
        let material = material.into();
        if !self.material_amounts.contains_key(&material) {
            self.material_order.push(material.clone());
        }
        self.material_amounts.insert(material, amount);
    }

    /// Set the print amount for an already-referenced material. Returns
    /// `false` if the material was never added.
    pub fn set_material_amount(&mut self, material: &str, amount: u64) -> bool {
        match self.material_amounts.get_mut(material) {
            Some(slot) => {
                *slot = amount;
                true
            }
            None => false,
        }
    }

    /// Remove a material reference. Returns `false` if it was absent.
    pub fn remove_material(&mut self, material: &str) -> bool {
        let Some(index) = self.material_order.iter().position(|name| name == material) else {
            return false;
        };
        self.material_order.remove(index);
        self.material_amounts.remove(material);
        true
    }

    /// Add a sub-configuration reference, same semantics as
    /// [`add_material`](Self::add_material).
    pub fn add_sub_configuration(&mut self, sub: impl Into<String>, amount: u64) {
        let sub = sub.into();
        if !self.sub_config_amounts.contains_key(&sub) {
            self.sub_config_order.push(sub.clone());
        }
        self.sub_config_amounts.insert(sub, amount);
    }

    /// Set the multiplier for an already-referenced sub-configuration.
    /// Returns `false` if the sub-configuration was never added.
    pub fn set_sub_configuration_amount(&mut self, sub: &str, amount: u64) -> bool {
        match self.sub_config_amounts.get_mut(sub) {
            Some(slot) => {
                *slot = amount;
                true
            }
            None => false,
        }
    }

    /// Remove a sub-configuration reference. Returns `false` if absent.
    pub fn remove_sub_configuration(&mut self, sub: &str) -> bool {
        let Some(index) = self.sub_config_order.iter().position(|name| name == sub) else {
            return false;
        };
        self.sub_config_order.remove(index);
        self.sub_config_amounts.remove(sub);
        true
    }
}
