//! Named taxonomies the host can switch between.

use std::collections::BTreeMap;
use std::rc::Rc;

use super::model::TaxonomyNode;

/// Registry of taxonomies keyed by a short name ("docker", "laravel", ...).
#[derive(Debug, Clone, Default)]
pub struct TaxonomyCatalog {
    entries: BTreeMap<String, Rc<TaxonomyNode>>,
}

impl TaxonomyCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a taxonomy under `key`.
    pub fn insert(&mut self, key: impl Into<String>, tree: TaxonomyNode) -> Option<Rc<TaxonomyNode>> {
        self.entries.insert(key.into(), Rc::new(tree))
    }

    /// The taxonomy registered under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Rc<TaxonomyNode>> {
        self.entries.get(key)
    }

    /// The taxonomy under `key`, or the "No Data" placeholder root.
    pub fn resolve(&self, key: &str) -> Rc<TaxonomyNode> {
        match self.entries.get(key) {
            Some(tree) => Rc::clone(tree),
            None => Rc::new(TaxonomyNode::placeholder()),
        }
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered taxonomies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
