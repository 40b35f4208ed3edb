//! TaxonomyVisualizer - the controller owning one visualizer's state.
//!
//! The visualizer holds the current taxonomy, its id index, the interaction
//! state and the viewport size. It memoizes the layout: pruning and layout
//! rerun only when the expansion set, the viewport height or the tree
//! change, never on pan or zoom. The spatial index used for hit testing is
//! rebuilt together with the layout.

use std::rc::Rc;

use crate::config::VisualizerConfig;
use crate::error::EngineError;
use crate::frame::{Frame, FrameLink, FrameNode, SelectionDetails};
use crate::interaction::{EventContext, InteractionEvent, InteractionState};
use crate::layout::{NODE_RADIUS, NodeShape, TreeLayout, VisibleNode, layout};
use crate::spatial::SpatialIndex;
use crate::tree::{ExpansionSet, TaxonomyCatalog, TaxonomyIndex, TaxonomyNode, prune};
use crate::viewport::Viewport;

/// Layout of one (expansion set, viewport height) pair.
#[derive(Debug)]
struct LayoutCache {
    expanded: ExpansionSet,
    height: f64,
    layout: TreeLayout,
    spatial: SpatialIndex,
}

impl LayoutCache {
    fn is_current(&self, expanded: &ExpansionSet, height: f64) -> bool {
        self.height == height && self.expanded == *expanded
    }
}

/// Controller for one taxonomy visualizer.
#[derive(Debug)]
pub struct TaxonomyVisualizer {
    config: VisualizerConfig,
    tree: Rc<TaxonomyNode>,
    index: TaxonomyIndex,
    state: InteractionState,
    width: f64,
    height: f64,
    cache: Option<LayoutCache>,
}

impl TaxonomyVisualizer {
    /// Create a visualizer for `tree`.
    ///
    /// Fails if the tree contains duplicate ids.
    pub fn new(
        tree: impl Into<Rc<TaxonomyNode>>,
        config: VisualizerConfig,
    ) -> Result<Self, EngineError> {
        let tree = tree.into();
        let index = TaxonomyIndex::build(&tree)?;
        let state = InteractionState::new(&tree.id, config.viewport, config.interaction);
        tracing::debug!(root = %tree.id, nodes = index.len(), "created visualizer");
        Ok(Self {
            config,
            tree,
            index,
            state,
            width: 0.0,
            height: 0.0,
            cache: None,
        })
    }

    /// Create a visualizer with the default configuration.
    pub fn with_defaults(tree: impl Into<Rc<TaxonomyNode>>) -> Result<Self, EngineError> {
        Self::new(tree, VisualizerConfig::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn tree(&self) -> &Rc<TaxonomyNode> {
        &self.tree
    }

    pub fn index(&self) -> &TaxonomyIndex {
        &self.index
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        self.state.viewport()
    }

    pub fn expanded(&self) -> &ExpansionSet {
        self.state.expanded()
    }

    /// Viewport size as `(width, height)`.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Install a taxonomy.
    ///
    /// Trees are identified by their root id. A tree with a new root id
    /// resets expansion, selection and hover and schedules a fit. A tree
    /// with the same root id replaces the content and drops hover or
    /// selection of nodes it no longer contains. Returns whether the
    /// state was reset. On error the current tree stays installed.
    pub fn set_tree(&mut self, tree: impl Into<Rc<TaxonomyNode>>) -> Result<bool, EngineError> {
        let tree = tree.into();
        if Rc::ptr_eq(&tree, &self.tree) {
            return Ok(false);
        }

        let index = TaxonomyIndex::build(&tree)?;
        let reset = tree.id != self.tree.id;
        let state = std::mem::take(&mut self.state);
        self.state = if reset {
            state.tree_changed(&tree.id)
        } else {
            state.content_changed(&index)
        };
        tracing::debug!(root = %tree.id, nodes = index.len(), reset, "installed taxonomy");

        self.tree = tree;
        self.index = index;
        self.cache = None;
        Ok(reset)
    }

    /// Install the taxonomy registered under `key`, or the "No Data"
    /// placeholder if there is none.
    pub fn select_taxonomy(
        &mut self,
        catalog: &TaxonomyCatalog,
        key: &str,
    ) -> Result<bool, EngineError> {
        if catalog.get(key).is_none() {
            tracing::debug!(key, "unknown taxonomy, showing placeholder");
        }
        self.set_tree(catalog.resolve(key))
    }

    /// Expand every ancestor of `id` so the node becomes visible.
    pub fn reveal(&mut self, id: &str) -> Result<(), EngineError> {
        let ancestors = self.index.ancestors(id)?;
        self.state = std::mem::take(&mut self.state).reveal(ancestors.iter().map(String::as_str));
        Ok(())
    }

    // =========================================================================
    // Viewport size and input
    // =========================================================================

    /// Update the viewport size in screen pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        if (width, height) != (self.width, self.height) {
            tracing::trace!(width, height, "resized");
            self.width = width;
            self.height = height;
        }
    }

    /// Feed one input event through the state machine.
    pub fn dispatch(&mut self, event: &InteractionEvent) -> Result<(), EngineError> {
        self.refresh()?;
        let nodes = self
            .cache
            .as_ref()
            .map_or(&[][..], |cache| cache.layout.nodes.as_slice());
        let context = EventContext {
            tree: &self.tree,
            nodes,
            width: self.width,
            height: self.height,
        };
        self.state = std::mem::take(&mut self.state).apply(event, &context);
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<(), EngineError> {
        self.dispatch(&InteractionEvent::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> Result<(), EngineError> {
        self.dispatch(&InteractionEvent::ZoomOut)
    }

    pub fn fit(&mut self) -> Result<(), EngineError> {
        self.dispatch(&InteractionEvent::Fit)
    }

    pub fn expand_all(&mut self) -> Result<(), EngineError> {
        self.dispatch(&InteractionEvent::ExpandAll)
    }

    pub fn collapse_all(&mut self) -> Result<(), EngineError> {
        self.dispatch(&InteractionEvent::CollapseAll)
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Current layout, recomputed if stale.
    pub fn layout(&mut self) -> Result<&TreeLayout, EngineError> {
        Ok(&self.refresh()?.layout)
    }

    /// Visible node whose bubble contains the screen point, if any.
    pub fn node_at(&mut self, screen_x: f64, screen_y: f64) -> Result<Option<&VisibleNode>, EngineError> {
        self.refresh()?;
        let (x, y) = self.state.viewport().to_world(screen_x, screen_y);
        let Some(cache) = self.cache.as_ref() else {
            return Ok(None);
        };
        Ok(cache
            .spatial
            .nearest_within(y, x, NODE_RADIUS)
            .map(|slot| &cache.layout.nodes[slot]))
    }

    /// Detail panel content for the current selection.
    pub fn selection_details(&self) -> Option<SelectionDetails> {
        self.state.selected().map(SelectionDetails::from_node)
    }

    /// Everything needed to draw the current frame.
    pub fn frame(&mut self) -> Result<Frame, EngineError> {
        self.refresh()?;
        let viewport = *self.state.viewport();
        let (nodes, links) = match self.cache.as_ref() {
            Some(cache) => (
                cache
                    .layout
                    .nodes
                    .iter()
                    .map(|node| FrameNode {
                        screen: viewport.to_screen(node.x, node.y),
                        shape: NodeShape::for_label(&node.name),
                        node: node.clone(),
                    })
                    .collect(),
                cache
                    .layout
                    .links
                    .iter()
                    .map(|link| FrameLink {
                        source: link.source.id.clone(),
                        target: link.target.id.clone(),
                        path: link.curve.svg_path(),
                    })
                    .collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        Ok(Frame {
            nodes,
            links,
            viewport,
            transform: viewport.svg_transform(),
            tooltip: self.state.tooltip().cloned(),
            hovered: self.state.hovered().map(str::to_owned),
            selection: self.selection_details(),
        })
    }

    /// Screen positions of visible nodes as `[x0, y0, x1, y1, ...]`.
    pub fn screen_positions(&mut self) -> Result<Vec<f64>, EngineError> {
        self.refresh()?;
        let viewport = *self.state.viewport();
        let nodes = self
            .cache
            .as_ref()
            .map_or(&[][..], |cache| cache.layout.nodes.as_slice());
        let mut positions = Vec::with_capacity(nodes.len() * 2);
        for node in nodes {
            let screen = viewport.to_screen(node.x, node.y);
            positions.push(screen.x);
            positions.push(screen.y);
        }
        Ok(positions)
    }

    /// Bring the cached layout up to date and run a pending automatic fit.
    fn refresh(&mut self) -> Result<&LayoutCache, EngineError> {
        let cache = match self.cache.take() {
            Some(cache) if cache.is_current(self.state.expanded(), self.height) => cache,
            _ => self.compute_layout()?,
        };

        if self.state.fit_pending() {
            let state = std::mem::take(&mut self.state);
            self.state = state.fit(&cache.layout.nodes, self.width, self.height);
        }

        Ok(self.cache.insert(cache))
    }

    fn compute_layout(&self) -> Result<LayoutCache, EngineError> {
        let expanded = self.state.expanded().clone();
        let pruned = prune(&self.tree, &expanded, 0, self.config.always_show_depth);
        let layout = layout(&pruned, self.height, &self.config.layout)?;
        let spatial = SpatialIndex::from_nodes(&layout.nodes);
        tracing::debug!(
            visible = layout.nodes.len(),
            expanded = expanded.len(),
            height = self.height,
            "recomputed layout"
        );
        Ok(LayoutCache {
            expanded,
            height: self.height,
            layout,
            spatial,
        })
    }
}
