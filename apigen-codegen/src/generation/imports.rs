//! Import collection utilities.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Each module maps to the set of names it is imported under. An empty set
/// means the module is imported under its own package name.
///
/// # Example
///
/// ```
/// use apigen_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add_module("strconv");
/// imports.add_module("strconv");
/// imports.add_aliased("github.com/acme/cellar/gen", "app");
///
/// assert_eq!(imports.len(), 2);
/// assert!(imports.has_alias("github.com/acme/cellar/gen", "app"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> aliases (sorted for deterministic output)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a module under its own name.
    pub fn add_module(&mut self, module: &str) {
        self.imports.entry(module.to_string()).or_default();
    }

    /// Import a module under an alias.
    pub fn add_aliased(&mut self, module: &str, alias: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(alias.to_string());
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, aliases) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(aliases.iter().cloned());
        }
    }

    /// Check if a module is already imported.
    pub fn has_module(&self, module: &str) -> bool {
        self.imports.contains_key(module)
    }

    /// Check if a module is imported under the given alias.
    pub fn has_alias(&self, module: &str, alias: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|aliases| aliases.contains(alias))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
