//! In-memory catalog model for Print Run Studio.
//!
//! The catalog holds two kinds of entities: printable materials, owned
//! exclusively by their parents in a forest of trees, and named
//! configurations, which reference materials and other configurations by
//! name with integer print multipliers. The aggregation engine computes the
//! total material demand implied by printing a configuration, memoized and
//! invalidated through the catalog's mutation version.
//!
//! File I/O lives in `prs-persistence`; this crate is purely in-memory.

pub mod aggregate;
pub mod catalog;
pub mod configuration;
pub mod error;
pub mod material;

pub use aggregate::PrintAmounts;
pub use catalog::Catalog;
pub use configuration::Configuration;
pub use error::{ModelError, Result};
pub use material::Material;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_serializes_for_display() {
        let mut handout = Material::new("Handout", "handout.pdf");
        handout.add_child(Material::with_pages("Part 1", "handout.pdf", vec![1, 2]));

        let json = serde_json::to_value(&handout).expect("serialize material");
        assert_eq!(json["name"], "Handout");
        assert_eq!(json["children"][0]["pages"], serde_json::json!([1, 2]));
    }

    #[test]
    fn error_display_names_the_cycle() {
        let err = ModelError::CyclicConfiguration {
            cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "configuration cycle detected: A -> B -> A"
        );
    }
}
