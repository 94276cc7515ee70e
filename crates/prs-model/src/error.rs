use thiserror::Error;

/// Catalog model error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A configuration references a material that does not exist in the
    /// material catalog.
    #[error("configuration `{configuration}` references unknown material `{material}`")]
    UnresolvedMaterial {
        material: String,
        configuration: String,
    },

    /// A configuration references a configuration that does not exist in the
    /// registry.
    #[error("configuration `{referenced_by}` references unknown configuration `{configuration}`")]
    UnresolvedConfiguration {
        configuration: String,
        referenced_by: String,
    },

    /// A name-addressed operation targeted a configuration that is not
    /// registered. Lookups report absence as `None`; operations that cannot
    /// return a result without a target report it as this error.
    #[error("no configuration named `{name}`")]
    UnknownConfiguration { name: String },

    /// A configuration with this name is already registered.
    #[error("a configuration named `{name}` already exists")]
    DuplicateName { name: String },

    /// The configuration graph contains a reference cycle. The payload is
    /// one participating cycle, first node repeated at the end.
    #[error("configuration cycle detected: {}", .cycle.join(" -> "))]
    CyclicConfiguration { cycle: Vec<String> },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
