//! The set of node ids whose children are currently shown.

use std::collections::BTreeSet;

use serde::Serialize;

/// Expansion state of one visualizer instance.
///
/// Ordered so that serialized snapshots are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpansionSet {
    ids: BTreeSet<String>,
}

impl ExpansionSet {
    /// Create an empty expansion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expansion set containing only the given root id.
    pub fn with_root(root_id: &str) -> Self {
        let mut set = Self::new();
        set.expand(root_id);
        set
    }

    /// Whether `id` is expanded.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Mark `id` as expanded. Returns true if it was not already.
    pub fn expand(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_owned())
    }

    /// Mark `id` as collapsed. Returns true if it was expanded.
    pub fn collapse(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Flip membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.collapse(id) {
            false
        } else {
            self.expand(id);
            true
        }
    }

    /// Reset to exactly `{root_id}`.
    pub fn reset(&mut self, root_id: &str) {
        self.ids.clear();
        self.expand(root_id);
    }

    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Expanded ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Whether every id in `self` is also in `other`.
    pub fn is_subset(&self, other: &ExpansionSet) -> bool {
        self.ids.is_subset(&other.ids)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
