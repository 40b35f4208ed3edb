//! Taxonomy Graph - WASM Module
//!
//! This crate is the engine behind an interactive taxonomy viewer: it takes
//! a labelled tree of concepts, shows the part of it the user has expanded,
//! lays that part out left to right, and tracks pan, zoom, hover and
//! selection. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the JS side only draws shapes and forwards events.
//!
//! # Architecture
//!
//! - `tree`: Taxonomy model, expansion set, visibility pruning, id index
//! - `layout`: Tidy tree layout, visible nodes, link curves, shape hints
//! - `viewport`: Scale/translate transform, zoom, pan and fit-to-screen
//! - `interaction`: Explicit interaction state and pure transitions
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `engine`: `TaxonomyVisualizer`, the controller tying it all together

use js_sys::Float64Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod interaction;
pub mod layout;
pub mod spatial;
pub mod tree;
pub mod viewport;

pub use config::VisualizerConfig;
pub use engine::TaxonomyVisualizer;
pub use error::{EngineError, LayoutError, TreeError};
pub use frame::{Frame, SelectionDetails};
pub use interaction::{InteractionEvent, InteractionState};
pub use layout::{LinkEdge, TreeLayout, VisibleNode};
pub use tree::{ExpansionSet, PrunedNode, TaxonomyCatalog, TaxonomyDetails, TaxonomyNode};
pub use viewport::Viewport;

/// Serializer producing plain JS objects (not `Map`s) for structs.
const JS_OUTPUT: serde_wasm_bindgen::Serializer = serde_wasm_bindgen::Serializer::json_compatible();

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the taxonomy viewer.
///
/// This struct wraps a `TaxonomyVisualizer` plus a catalog of named
/// taxonomies and provides the public API exposed to JavaScript.
#[wasm_bindgen]
pub struct TaxonomyGraphWasm {
    visualizer: TaxonomyVisualizer,
    catalog: TaxonomyCatalog,
}

#[wasm_bindgen]
impl TaxonomyGraphWasm {
    /// Create a viewer for a taxonomy object with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(tree: JsValue) -> Result<TaxonomyGraphWasm, JsError> {
        Self::with_config(tree, JsValue::UNDEFINED)
    }

    /// Create a viewer with a (possibly partial) configuration object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(tree: JsValue, config: JsValue) -> Result<TaxonomyGraphWasm, JsError> {
        let tree: TaxonomyNode = parse("taxonomy", tree)?;
        let config: VisualizerConfig = if config.is_undefined() || config.is_null() {
            VisualizerConfig::default()
        } else {
            parse("config", config)?
        };
        let visualizer = TaxonomyVisualizer::new(tree, config).map_err(rejected)?;
        Ok(Self {
            visualizer,
            catalog: TaxonomyCatalog::new(),
        })
    }

    // =========================================================================
    // Taxonomies
    // =========================================================================

    /// Replace the taxonomy. Returns true if the view was reset (new root id).
    #[wasm_bindgen(js_name = setTree)]
    pub fn set_tree(&mut self, tree: JsValue) -> Result<bool, JsError> {
        let tree: TaxonomyNode = parse("taxonomy", tree)?;
        self.visualizer.set_tree(tree).map_err(rejected)
    }

    /// Register a taxonomy under a key for `selectTaxonomy`.
    #[wasm_bindgen(js_name = registerTaxonomy)]
    pub fn register_taxonomy(&mut self, key: &str, tree: JsValue) -> Result<(), JsError> {
        let tree: TaxonomyNode = parse("taxonomy", tree)?;
        self.catalog.insert(key, tree);
        Ok(())
    }

    /// Show the taxonomy registered under `key` ("No Data" if unknown).
    #[wasm_bindgen(js_name = selectTaxonomy)]
    pub fn select_taxonomy(&mut self, key: &str) -> Result<bool, JsError> {
        self.visualizer
            .select_taxonomy(&self.catalog, key)
            .map_err(rejected)
    }

    /// Keys of registered taxonomies, sorted.
    #[wasm_bindgen(js_name = taxonomyKeys)]
    pub fn taxonomy_keys(&self) -> Vec<String> {
        self.catalog.keys().map(str::to_owned).collect()
    }

    // =========================================================================
    // Viewport Size
    // =========================================================================

    /// Set the viewport size in CSS pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.visualizer.resize(width, height);
    }

    // =========================================================================
    // Pointer Events
    // =========================================================================

    /// Forward an event object, e.g. `{ type: "wheel", deltaY: 120 }`.
    pub fn dispatch(&mut self, event: JsValue) -> Result<(), JsError> {
        let event: InteractionEvent = parse("event", event)?;
        Ok(self.visualizer.dispatch(&event)?)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::PointerDown { x, y })?)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::PointerMove { x, y })?)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::PointerUp)?)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::PointerLeave)?)
    }

    /// Wheel input. The caller is responsible for `preventDefault()`.
    pub fn wheel(&mut self, delta_y: f64) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::Wheel { delta_y })?)
    }

    #[wasm_bindgen(js_name = nodeEnter)]
    pub fn node_enter(&mut self, id: String, x: f64, y: f64) -> Result<(), JsError> {
        Ok(self
            .visualizer
            .dispatch(&InteractionEvent::NodeEnter { id, x, y })?)
    }

    #[wasm_bindgen(js_name = nodeMove)]
    pub fn node_move(&mut self, x: f64, y: f64) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::NodeMove { x, y })?)
    }

    #[wasm_bindgen(js_name = nodeLeave)]
    pub fn node_leave(&mut self, id: String) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::NodeLeave { id })?)
    }

    /// Click on a node: select it and toggle its expansion.
    #[wasm_bindgen(js_name = nodeClick)]
    pub fn node_click(&mut self, id: String) -> Result<(), JsError> {
        Ok(self.visualizer.dispatch(&InteractionEvent::NodeClick { id })?)
    }

    /// Id of the node under a screen point, for canvas renderers.
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&mut self, x: f64, y: f64) -> Result<Option<String>, JsError> {
        Ok(self
            .visualizer
            .node_at(x, y)?
            .map(|node| node.id.clone()))
    }

    // =========================================================================
    // Toolbar
    // =========================================================================

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.zoom_in()?)
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.zoom_out()?)
    }

    pub fn fit(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.fit()?)
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.expand_all()?)
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&mut self) -> Result<(), JsError> {
        Ok(self.visualizer.collapse_all()?)
    }

    /// Expand the ancestors of a node so it becomes visible.
    pub fn reveal(&mut self, id: &str) -> Result<(), JsError> {
        self.visualizer.reveal(id).map_err(rejected)
    }

    // =========================================================================
    // Frame Output
    // =========================================================================

    /// Everything needed to draw the current frame as a plain object:
    /// `{ nodes, links, viewport, transform, tooltip?, hovered?, selection? }`.
    pub fn frame(&mut self) -> Result<JsValue, JsError> {
        let frame = self.visualizer.frame()?;
        Ok(frame.serialize(&JS_OUTPUT)?)
    }

    /// Detail panel content for the selected node, or `undefined`.
    pub fn selection(&self) -> Result<JsValue, JsError> {
        match self.visualizer.selection_details() {
            Some(details) => Ok(details.serialize(&JS_OUTPUT)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Screen positions of visible nodes as a Float64Array `[x0, y0, x1, y1, ...]`,
    /// in the same order as `frame().nodes`.
    #[wasm_bindgen(js_name = screenPositions)]
    pub fn screen_positions(&mut self) -> Result<Float64Array, JsError> {
        let positions = self.visualizer.screen_positions()?;
        Ok(Float64Array::from(&positions[..]))
    }

    /// Whether a node's children are expanded.
    #[wasm_bindgen(js_name = isExpanded)]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.visualizer.expanded().contains(id)
    }

    /// Current zoom scale.
    pub fn scale(&self) -> f64 {
        self.visualizer.viewport().scale
    }
}

/// Deserialize a JS value, logging what was rejected.
fn parse<T: serde::de::DeserializeOwned>(what: &str, value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| {
        let message = format!("invalid {what}: {err}");
        web_sys::console::warn_1(&JsValue::from_str(&message));
        JsError::new(&message)
    })
}

/// Convert an engine error, logging it to the console.
fn rejected(err: EngineError) -> JsError {
    web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    JsError::from(err)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::layout::NodeGlyph;
    use crate::tree::{ids_with_children, prune};

    /// A taxonomy shaped like the ones the viewer ships with.
    fn docker_json() -> &'static str {
        r#"{
            "id": "docker",
            "name": "Docker",
            "description": "Build, ship and run containers",
            "children": [
                {
                    "id": "images",
                    "name": "Images",
                    "description": "Read-only templates",
                    "details": {
                        "commands": ["docker build -t app .", "docker image ls"],
                        "tips": ["Pin base image versions"]
                    },
                    "children": [
                        { "id": "layers", "name": "Layers", "children": [
                            { "id": "cache", "name": "Build cache" }
                        ]},
                        { "id": "tags", "name": "Tags", "children": [] }
                    ]
                },
                {
                    "id": "containers",
                    "name": "Containers",
                    "children": [
                        { "id": "lifecycle", "name": "Lifecycle" },
                        { "id": "exec", "name": "Exec" }
                    ]
                },
                { "id": "networks", "name": "Networks" }
            ]
        }"#
    }

    fn docker() -> TaxonomyNode {
        serde_json::from_str(docker_json()).unwrap()
    }

    /// Test the full pipeline: JSON → prune → layout → fit → events → frame
    #[test]
    fn test_json_to_frame_pipeline() {
        let mut visualizer = TaxonomyVisualizer::with_defaults(docker()).unwrap();
        visualizer.resize(1280.0, 860.0);

        let frame = visualizer.frame().unwrap();
        let ids: Vec<_> = frame.nodes.iter().map(|n| n.node.id.as_str()).collect();
        assert_eq!(ids, ["docker", "images", "containers", "networks"]);
        assert!(frame.viewport.scale >= 0.4 && frame.viewport.scale <= 1.2);

        // Every node lands inside the viewport after the automatic fit
        for node in &frame.nodes {
            assert!(node.screen.x > 0.0 && node.screen.x < 1280.0, "{} off screen", node.node.id);
            assert!(node.screen.y > 0.0 && node.screen.y < 860.0, "{} off screen", node.node.id);
        }

        visualizer
            .dispatch(&InteractionEvent::NodeClick { id: "images".into() })
            .unwrap();
        let frame = visualizer.frame().unwrap();
        assert_eq!(frame.nodes.len(), 6);
        assert_eq!(frame.links.len(), 5);
        let selection = frame.selection.unwrap();
        assert_eq!(selection.commands, ["docker build -t app .", "docker image ls"]);
    }

    /// Empty and absent children are the same thing everywhere.
    #[test]
    fn test_empty_children_are_leaves() {
        let mut visualizer = TaxonomyVisualizer::with_defaults(docker()).unwrap();
        visualizer.reveal("tags").unwrap();
        let layout = visualizer.layout().unwrap();
        let tags = layout.find("tags").unwrap();
        assert!(!tags.has_children);
        assert_eq!(tags.glyph, NodeGlyph::Leaf);
        assert!(!ids_with_children(&docker()).contains("tags"));
    }

    /// Pruning twice equals pruning once, and growing the expansion set
    /// never hides nodes.
    #[test]
    fn test_pruning_properties_on_real_tree() {
        let tree = std::rc::Rc::new(docker());
        let small: ExpansionSet = ["docker", "images"].into_iter().collect();
        let large: ExpansionSet = ["docker", "images", "layers", "containers"].into_iter().collect();

        let once = prune(&tree, &small, 0, 1);
        assert_eq!(once.prune(&small, 0, 1), once);

        let small_ids = once.ids();
        let large_pruned = prune(&tree, &large, 0, 1);
        let large_ids = large_pruned.ids();
        assert!(small_ids.iter().all(|id| large_ids.contains(id)));
    }

    /// Toolbar round trip: expand all, collapse all, zoom clamps.
    #[test]
    fn test_toolbar_round_trip() {
        let mut visualizer = TaxonomyVisualizer::with_defaults(docker()).unwrap();
        visualizer.resize(1280.0, 860.0);
        let collapsed = visualizer.layout().unwrap().len();

        visualizer.expand_all().unwrap();
        assert_eq!(visualizer.layout().unwrap().len(), 9);

        visualizer.collapse_all().unwrap();
        assert_eq!(visualizer.layout().unwrap().len(), collapsed);

        for _ in 0..30 {
            visualizer.zoom_in().unwrap();
        }
        assert_eq!(visualizer.viewport().scale, 2.2);
        for _ in 0..30 {
            visualizer.zoom_out().unwrap();
        }
        assert_eq!(visualizer.viewport().scale, 0.3);

        visualizer.fit().unwrap();
        assert!(visualizer.viewport().scale >= 0.4);
    }

    /// Drag, hover and hit testing agree on screen coordinates.
    #[test]
    fn test_pointer_pipeline() {
        let mut visualizer = TaxonomyVisualizer::with_defaults(docker()).unwrap();
        visualizer.resize(1280.0, 860.0);
        let before = visualizer.screen_positions().unwrap();

        for event in [
            InteractionEvent::PointerDown { x: 500.0, y: 500.0 },
            InteractionEvent::PointerMove { x: 530.0, y: 480.0 },
            InteractionEvent::PointerLeave,
            InteractionEvent::PointerMove { x: 900.0, y: 900.0 },
        ] {
            visualizer.dispatch(&event).unwrap();
        }

        let after = visualizer.screen_positions().unwrap();
        assert!((after[0] - before[0] - 30.0).abs() < 1e-9);
        assert!((after[1] - before[1] + 20.0).abs() < 1e-9);

        let hit = visualizer.node_at(after[2], after[3]).unwrap().cloned();
        let images = hit.unwrap();
        assert_eq!(images.id, "images");
        visualizer
            .dispatch(&InteractionEvent::NodeEnter {
                id: images.id.clone(),
                x: after[2],
                y: after[3],
            })
            .unwrap();
        let tooltip = visualizer.state().tooltip().cloned().unwrap();
        assert_eq!(tooltip.text, "Images: Read-only templates");
        assert_eq!(tooltip.x, after[2] + 12.0);
    }

    #[test]
    fn test_frame_serializes_to_json() {
        let mut visualizer = TaxonomyVisualizer::with_defaults(docker()).unwrap();
        visualizer.resize(1280.0, 860.0);
        let value = serde_json::to_value(visualizer.frame().unwrap()).unwrap();
        assert_eq!(value["nodes"][0]["id"], "docker");
        assert_eq!(value["nodes"][1]["glyph"], "expand");
        assert!(value["links"][0]["path"].as_str().unwrap().starts_with("M "));
        assert!(value["viewport"]["translateX"].is_number());
        assert!(value.get("selection").is_none());
    }
}
