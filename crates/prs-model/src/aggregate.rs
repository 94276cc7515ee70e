//! Effective-quantity aggregation.
//!
//! Printing a configuration once demands its own material amounts plus, for
//! every sub-configuration with multiplier `k`, `k` times that
//! sub-configuration's demand, recursively. Sub-configurations may be shared
//! by several parents (diamond shapes), so each configuration's base demand
//! is computed once and memoized independently of any caller-supplied run
//! count.
//!
//! The cache has two layers: a memoized base map, written only by the
//! aggregation itself and invalidated by the catalog's mutation version,
//! and external scaling, which allocates a fresh map. Scaling the cached
//! map in place would compound the multiplier across calls.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Catalog;
use crate::configuration::Configuration;
use crate::error::{ModelError, Result};

/// Material name → print quantity.
pub type PrintAmounts = BTreeMap<String, u64>;

/// Memoized base demand per configuration, stamped with the catalog
/// mutation version it was computed at. A stale stamp clears the whole
/// cache lazily on the next query.
#[derive(Debug, Clone, Default)]
pub(crate) struct EffectiveCache {
    version: u64,
    amounts: BTreeMap<String, PrintAmounts>,
}

impl Catalog {
    /// Total quantity of every material implied by printing `config` once,
    /// recursively aggregating sub-configurations. Memoized until the next
    /// graph mutation.
    pub fn base_print_amounts(&mut self, config: &str) -> Result<&PrintAmounts> {
        if self.cache.version != self.version {
            self.cache.amounts.clear();
            self.cache.version = self.version;
        }
        let mut visiting = Vec::new();
        compute(
            &self.configurations,
            &mut self.cache.amounts,
            &mut visiting,
            config,
        )?;
        match self.cache.amounts.get(config) {
            Some(amounts) => Ok(amounts),
            None => Err(ModelError::UnknownConfiguration {
                name: config.to_string(),
            }),
        }
    }

    /// Base demand of `config` scaled by an external run count. Returns a
    /// freshly allocated map; the cached base is left untouched, so repeated
    /// calls with different run counts are independent.
    pub fn effective_print_amounts(
        &mut self,
        config: &str,
        print_runs: u64,
    ) -> Result<PrintAmounts> {
        let base = self.base_print_amounts(config)?;
        Ok(base
            .iter()
            .map(|(material, amount)| (material.clone(), amount * print_runs))
            .collect())
    }
}

/// Fill `memo` with the base demand of `name` (and, transitively, of every
/// sub-configuration it reaches). `visiting` is the recursion stack; meeting
/// a name already on it means the graph has a cycle, which is reported
/// rather than recursed into. Build and mutation refuse cycles up front, so
/// this guard only fires on graphs assembled by replacement.
fn compute(
    configs: &BTreeMap<String, Configuration>,
    memo: &mut BTreeMap<String, PrintAmounts>,
    visiting: &mut Vec<String>,
    name: &str,
) -> Result<()> {
    if memo.contains_key(name) {
        return Ok(());
    }
    if let Some(pos) = visiting.iter().position(|entry| entry == name) {
        let mut cycle = visiting[pos..].to_vec();
        cycle.push(name.to_string());
        return Err(ModelError::CyclicConfiguration { cycle });
    }
    let Some(config) = configs.get(name) else {
        return Err(match visiting.last() {
            Some(parent) => ModelError::UnresolvedConfiguration {
                configuration: name.to_string(),
                referenced_by: parent.clone(),
            },
            None => ModelError::UnknownConfiguration {
                name: name.to_string(),
            },
        });
    };

    visiting.push(name.to_string());
    let mut totals = config.material_amounts().clone();
    for (sub, multiplier) in config.sub_configurations() {
        compute(configs, memo, visiting, sub)?;
        if let Some(child) = memo.get(sub) {
            for (material, quantity) in child {
                *totals.entry(material.clone()).or_insert(0) += multiplier * quantity;
            }
        }
    }
    visiting.pop();
    memo.insert(name.to_string(), totals);
    Ok(())
}

/// One path `from -> ... -> to` along sub-configuration edges, endpoints
/// included, or `None` if `to` is not reachable from `from`.
pub(crate) fn find_path(
    configs: &BTreeMap<String, Configuration>,
    from: &str,
    to: &str,
) -> Option<Vec<String>> {
    let mut visited = BTreeSet::new();
    path_search(configs, &mut visited, from, to)
}

fn path_search(
    configs: &BTreeMap<String, Configuration>,
    visited: &mut BTreeSet<String>,
    from: &str,
    to: &str,
) -> Option<Vec<String>> {
    if from == to {
        return Some(vec![from.to_string()]);
    }
    if !visited.insert(from.to_string()) {
        return None;
    }
    let config = configs.get(from)?;
    for (sub, _) in config.sub_configurations() {
        if let Some(mut path) = path_search(configs, visited, sub, to) {
            path.insert(0, from.to_string());
            return Some(path);
        }
    }
    None
}

/// One reference cycle in the graph (first node repeated at the end), or
/// `None` if the graph is acyclic. Dangling references are skipped; they are
/// a resolution problem, not a cycle.
pub(crate) fn find_cycle(configs: &BTreeMap<String, Configuration>) -> Option<Vec<String>> {
    let mut finished = BTreeSet::new();
    let mut visiting = Vec::new();
    for name in configs.keys() {
        if let Some(cycle) = cycle_search(configs, &mut finished, &mut visiting, name) {
            return Some(cycle);
        }
    }
    None
}

fn cycle_search(
    configs: &BTreeMap<String, Configuration>,
    finished: &mut BTreeSet<String>,
    visiting: &mut Vec<String>,
    name: &str,
) -> Option<Vec<String>> {
    if finished.contains(name) {
        return None;
    }
    if let Some(pos) = visiting.iter().position(|entry| entry == name) {
        let mut cycle = visiting[pos..].to_vec();
        cycle.push(name.to_string());
        return Some(cycle);
    }
    let config = configs.get(name)?;
    visiting.push(name.to_string());
    for (sub, _) in config.sub_configurations() {
        if let Some(cycle) = cycle_search(configs, finished, visiting, sub) {
            return Some(cycle);
        }
    }
    visiting.pop();
    finished.insert(name.to_string());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;

    /// Cover material plus `Basic` (Cover x1) and `Pro` (Cover x2 +
    /// 3 x Basic).
    fn basic_pro_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_material_tree(Material::new("Cover", "cover.pdf"));
        catalog.add_configuration("Basic").unwrap();
        catalog.add_configuration("Pro").unwrap();
        catalog.add_material("Basic", "Cover", 1).unwrap();
        catalog.add_material("Pro", "Cover", 2).unwrap();
        catalog.add_sub_configuration("Pro", "Basic", 3).unwrap();
        catalog
    }

    #[test]
    fn base_aggregates_nested_demand() {
        let mut catalog = basic_pro_catalog();
        let base = catalog.base_print_amounts("Pro").unwrap();
        assert_eq!(base.get("Cover"), Some(&5)); // 2 + 3 * 1
    }

    #[test]
    fn external_scaling_never_touches_the_base() {
        let mut catalog = basic_pro_catalog();
        let doubled = catalog.effective_print_amounts("Pro", 2).unwrap();
        assert_eq!(doubled.get("Cover"), Some(&10));
        let single = catalog.effective_print_amounts("Pro", 1).unwrap();
        assert_eq!(single.get("Cover"), Some(&5));
    }

    #[test]
    fn mutation_invalidates_ancestors() {
        let mut catalog = basic_pro_catalog();
        assert_eq!(catalog.base_print_amounts("Pro").unwrap().get("Cover"), Some(&5));

        // Mutating Basic must also invalidate Pro's cached result.
        assert!(catalog.set_material_amount("Basic", "Cover", 5));
        assert_eq!(
            catalog.base_print_amounts("Pro").unwrap().get("Cover"),
            Some(&17) // 2 + 3 * 5
        );
    }

    #[test]
    fn diamond_sharing_counts_both_paths() {
        let mut catalog = Catalog::new();
        catalog.add_material_tree(Material::new("Flyer", "flyer.pdf"));
        for name in ["Top", "Left", "Right", "Shared"] {
            catalog.add_configuration(name).unwrap();
        }
        catalog.add_material("Shared", "Flyer", 1).unwrap();
        catalog.add_sub_configuration("Left", "Shared", 2).unwrap();
        catalog.add_sub_configuration("Right", "Shared", 3).unwrap();
        catalog.add_sub_configuration("Top", "Left", 1).unwrap();
        catalog.add_sub_configuration("Top", "Right", 1).unwrap();

        let base = catalog.base_print_amounts("Top").unwrap();
        assert_eq!(base.get("Flyer"), Some(&5)); // 1*2 + 1*3
    }

    #[test]
    fn unknown_configuration_is_reported() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.base_print_amounts("Ghost").unwrap_err(),
            ModelError::UnknownConfiguration {
                name: "Ghost".to_string()
            }
        );
    }

    #[test]
    fn dangling_replacement_reference_is_reported() {
        let mut catalog = basic_pro_catalog();
        // A replacement can reference a name the registry no longer knows.
        let mut replacement = Configuration::new("Pro");
        replacement.add_sub_configuration("Ghost", 1);
        catalog.update_configuration("Pro", replacement);

        assert_eq!(
            catalog.base_print_amounts("Pro").unwrap_err(),
            ModelError::UnresolvedConfiguration {
                configuration: "Ghost".to_string(),
                referenced_by: "Pro".to_string(),
            }
        );
    }

    #[test]
    fn cycle_assembled_by_replacement_is_caught() {
        let mut catalog = Catalog::new();
        catalog.add_configuration("A").unwrap();
        catalog.add_configuration("B").unwrap();
        catalog.add_sub_configuration("A", "B", 1).unwrap();

        // add_sub_configuration would refuse B -> A; splice it in by
        // replacement to exercise the aggregation guard.
        let mut replacement = Configuration::new("B");
        replacement.add_sub_configuration("A", 1);
        catalog.update_configuration("B", replacement);

        assert!(catalog.verify_acyclic().is_err());
        assert!(matches!(
            catalog.base_print_amounts("A").unwrap_err(),
            ModelError::CyclicConfiguration { .. }
        ));
    }

    #[test]
    fn cache_survives_repeated_queries() {
        let mut catalog = basic_pro_catalog();
        let first = catalog.base_print_amounts("Pro").unwrap().clone();
        let second = catalog.base_print_amounts("Pro").unwrap().clone();
        assert_eq!(first, second);
    }
}
