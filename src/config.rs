//! Visualizer configuration.
//!
//! Every field has a default that reproduces the stock look of the
//! taxonomy viewer; JS callers may pass any subset of fields.

use serde::Deserialize;

use crate::interaction::InteractionConfig;
use crate::layout::TreeLayoutConfig;
use crate::viewport::ViewportConfig;

/// Configuration for one `TaxonomyVisualizer`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerConfig {
    /// Tree layout spacing and orientation.
    pub layout: TreeLayoutConfig,
    /// Zoom/fit limits and steps.
    pub viewport: ViewportConfig,
    /// Pointer feedback.
    pub interaction: InteractionConfig,
    /// Nodes shallower than this always show their children.
    pub always_show_depth: usize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            layout: TreeLayoutConfig::default(),
            viewport: ViewportConfig::default(),
            interaction: InteractionConfig::default(),
            always_show_depth: 1,
        }
    }
}
