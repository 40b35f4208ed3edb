//! Interaction state and its transitions.
//!
//! Every transition consumes the state and returns the next one. Nothing
//! here touches the layout: transitions receive the visible nodes they need
//! from the caller, and the caller decides when to lay out again.

use serde::{Deserialize, Serialize};

use std::rc::Rc;

use crate::layout::{NodeGlyph, VisibleNode};
use crate::tree::{ExpansionSet, TaxonomyIndex, TaxonomyNode, ids_with_children};
use crate::viewport::{Viewport, ViewportConfig};

/// Tunables for pointer feedback.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
    /// Screen offset of the tooltip from the pointer, on both axes.
    pub tooltip_offset: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            tooltip_offset: 12.0,
        }
    }
}

/// Where a background drag started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragOrigin {
    /// Pointer position at pointer-down.
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Translation at pointer-down.
    pub translate_x: f64,
    pub translate_y: f64,
}

/// Hover tooltip in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// All mutable UI state of one visualizer.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    expanded: ExpansionSet,
    viewport: Viewport,
    drag: Option<DragOrigin>,
    hovered: Option<String>,
    tooltip: Option<Tooltip>,
    selected: Option<VisibleNode>,
    fit_pending: bool,
    viewport_config: ViewportConfig,
    config: InteractionConfig,
}

impl InteractionState {
    /// Fresh state for a tree rooted at `root_id`: root expanded, identity
    /// viewport, fit pending.
    pub fn new(root_id: &str, viewport_config: ViewportConfig, config: InteractionConfig) -> Self {
        Self {
            expanded: ExpansionSet::with_root(root_id),
            viewport: Viewport::default(),
            drag: None,
            hovered: None,
            tooltip: None,
            selected: None,
            fit_pending: true,
            viewport_config,
            config,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn expanded(&self) -> &ExpansionSet {
        &self.expanded
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn drag(&self) -> Option<&DragOrigin> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn selected(&self) -> Option<&VisibleNode> {
        self.selected.as_ref()
    }

    /// Whether an automatic fit is still owed for the current tree.
    pub fn fit_pending(&self) -> bool {
        self.fit_pending
    }

    pub fn viewport_config(&self) -> &ViewportConfig {
        &self.viewport_config
    }

    // =========================================================================
    // Background pointer
    // =========================================================================

    /// Start a drag at the given screen point. Ignored while already dragging.
    pub fn pointer_down(mut self, x: f64, y: f64) -> Self {
        if self.drag.is_none() {
            self.drag = Some(DragOrigin {
                pointer_x: x,
                pointer_y: y,
                translate_x: self.viewport.translate_x,
                translate_y: self.viewport.translate_y,
            });
        }
        self
    }

    /// Move the pointer: the tooltip follows it, and a drag in progress pans.
    pub fn pointer_move(mut self, x: f64, y: f64) -> Self {
        self = self.track_tooltip(x, y);
        if let Some(origin) = self.drag {
            self.viewport.translate_x = origin.translate_x + (x - origin.pointer_x);
            self.viewport.translate_y = origin.translate_y + (y - origin.pointer_y);
        }
        self
    }

    /// End any drag.
    pub fn pointer_up(mut self) -> Self {
        self.drag = None;
        self
    }

    /// Pointer left the canvas; ends any drag.
    pub fn pointer_leave(self) -> Self {
        self.pointer_up()
    }

    /// Wheel notch: scrolling down zooms out, scrolling up zooms in.
    pub fn wheel(mut self, delta_y: f64) -> Self {
        let direction = if delta_y > 0.0 {
            -1.0
        } else if delta_y < 0.0 {
            1.0
        } else {
            return self;
        };
        self.viewport
            .zoom(direction * self.viewport_config.wheel_step, &self.viewport_config);
        self
    }

    // =========================================================================
    // Node pointer
    // =========================================================================

    /// Pointer entered a node: hover it and show its tooltip.
    pub fn node_enter(mut self, node: &VisibleNode, x: f64, y: f64) -> Self {
        let offset = self.config.tooltip_offset;
        self.hovered = Some(node.id.clone());
        self.tooltip = Some(Tooltip {
            x: x + offset,
            y: y + offset,
            text: node.data.tooltip_text(),
        });
        self
    }

    /// Pointer moved over a node.
    pub fn node_move(self, x: f64, y: f64) -> Self {
        self.track_tooltip(x, y)
    }

    /// Pointer left node `id`. A leave for a node that is no longer hovered
    /// keeps the current hover.
    pub fn node_leave(mut self, id: &str) -> Self {
        match self.hovered.as_deref() {
            Some(hovered) if hovered != id => {}
            _ => {
                self.hovered = None;
                self.tooltip = None;
            }
        }
        self
    }

    /// Select a node and toggle its expansion if it has children in the full tree.
    pub fn node_click(mut self, node: &VisibleNode) -> Self {
        if node.has_children {
            let now_expanded = self.expanded.toggle(&node.id);
            tracing::debug!(id = %node.id, expanded = now_expanded, "toggled node");
        }
        self.selected = Some(node.clone());
        self
    }

    fn track_tooltip(mut self, x: f64, y: f64) -> Self {
        let offset = self.config.tooltip_offset;
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.x = x + offset;
            tooltip.y = y + offset;
        }
        self
    }

    // =========================================================================
    // Toolbar
    // =========================================================================

    pub fn zoom_in(mut self) -> Self {
        self.viewport
            .zoom(self.viewport_config.zoom_step, &self.viewport_config);
        self
    }

    pub fn zoom_out(mut self) -> Self {
        self.viewport
            .zoom(-self.viewport_config.zoom_step, &self.viewport_config);
        self
    }

    /// Fit `nodes` into the viewport. Clears the pending fit only when the
    /// fit actually happened.
    pub fn fit(mut self, nodes: &[VisibleNode], width: f64, height: f64) -> Self {
        if self
            .viewport
            .fit_to_screen(nodes, width, height, &self.viewport_config)
        {
            self.fit_pending = false;
        }
        self
    }

    /// Expand every node of `tree` that has children.
    pub fn expand_all(mut self, tree: &TaxonomyNode) -> Self {
        self.expanded = ids_with_children(tree);
        tracing::debug!(expanded = self.expanded.len(), "expanded all");
        self
    }

    /// Collapse back to only the root.
    pub fn collapse_all(mut self, root_id: &str) -> Self {
        self.expanded.reset(root_id);
        self
    }

    /// Expand each of `ids`, leaving the rest of the set alone.
    pub fn reveal<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        for id in ids {
            self.expanded.expand(id);
        }
        self
    }

    // =========================================================================
    // Tree swap
    // =========================================================================

    /// The taxonomy was replaced by one rooted at `root_id`.
    pub fn tree_changed(mut self, root_id: &str) -> Self {
        self.expanded.reset(root_id);
        self.selected = None;
        self.hovered = None;
        self.tooltip = None;
        self.fit_pending = true;
        self
    }

    /// The taxonomy content was replaced under the same root.
    ///
    /// Hover and selection of nodes missing from `index` are dropped. A
    /// surviving selection is rebound to the new node; its layout position
    /// stays the one it was clicked at.
    pub fn content_changed(mut self, index: &TaxonomyIndex) -> Self {
        match self.hovered.as_deref().map(|id| index.get(id)) {
            Some(Some(node)) => {
                if let Some(tooltip) = self.tooltip.as_mut() {
                    tooltip.text = node.tooltip_text();
                }
            }
            Some(None) => {
                tracing::trace!("hovered node removed");
                self.hovered = None;
                self.tooltip = None;
            }
            None => {}
        }

        self.selected = self.selected.take().and_then(|mut selected| {
            let node = index.get(&selected.id)?;
            selected.name = node.name.clone();
            selected.description = node.description.clone();
            selected.depth = index.depth(&selected.id)?;
            selected.has_children = index.has_children(&selected.id);
            selected.expanded &= selected.has_children;
            selected.glyph = NodeGlyph::for_node(selected.has_children, selected.expanded);
            selected.data = Rc::clone(node);
            Some(selected)
        });
        self
    }
}

impl Default for InteractionState {
    /// Nothing expanded, identity viewport, default limits.
    fn default() -> Self {
        Self {
            expanded: ExpansionSet::new(),
            viewport: Viewport::default(),
            drag: None,
            hovered: None,
            tooltip: None,
            selected: None,
            fit_pending: true,
            viewport_config: ViewportConfig::default(),
            config: InteractionConfig::default(),
        }
    }
}
