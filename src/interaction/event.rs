//! Input events as data, for adapters that forward events in bulk or across
//! the wasm boundary.

use serde::Deserialize;

use super::state::InteractionState;
use crate::layout::VisibleNode;
use crate::tree::TaxonomyNode;

/// One input event from the presentation adapter.
///
/// Deserializes from `{ "type": "pointerDown", "x": 10, "y": 20 }` style
/// objects. Node events name their node by id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InteractionEvent {
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    PointerLeave,
    Wheel {
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    NodeEnter {
        id: String,
        x: f64,
        y: f64,
    },
    NodeMove {
        x: f64,
        y: f64,
    },
    NodeLeave {
        id: String,
    },
    NodeClick {
        id: String,
    },
    ZoomIn,
    ZoomOut,
    Fit,
    ExpandAll,
    CollapseAll,
}

/// What a transition may need to read besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    /// The full taxonomy.
    pub tree: &'a TaxonomyNode,
    /// Nodes of the current layout.
    pub nodes: &'a [VisibleNode],
    /// Viewport width in screen pixels.
    pub width: f64,
    /// Viewport height in screen pixels.
    pub height: f64,
}

impl EventContext<'_> {
    fn node(&self, id: &str) -> Option<&VisibleNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl InteractionState {
    /// Dispatch `event` to its transition.
    ///
    /// Node events naming an id that is not currently visible are ignored.
    pub fn apply(self, event: &InteractionEvent, context: &EventContext<'_>) -> Self {
        match event {
            InteractionEvent::PointerDown { x, y } => self.pointer_down(*x, *y),
            InteractionEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InteractionEvent::PointerUp => self.pointer_up(),
            InteractionEvent::PointerLeave => self.pointer_leave(),
            InteractionEvent::Wheel { delta_y } => self.wheel(*delta_y),
            InteractionEvent::NodeEnter { id, x, y } => match context.node(id) {
                Some(node) => self.node_enter(node, *x, *y),
                None => ignored(self, id),
            },
            InteractionEvent::NodeMove { x, y } => self.node_move(*x, *y),
            InteractionEvent::NodeLeave { id } => self.node_leave(id),
            InteractionEvent::NodeClick { id } => match context.node(id) {
                Some(node) => self.node_click(node),
                None => ignored(self, id),
            },
            InteractionEvent::ZoomIn => self.zoom_in(),
            InteractionEvent::ZoomOut => self.zoom_out(),
            InteractionEvent::Fit => self.fit(context.nodes, context.width, context.height),
            InteractionEvent::ExpandAll => self.expand_all(context.tree),
            InteractionEvent::CollapseAll => self.collapse_all(&context.tree.id),
        }
    }
}

fn ignored(state: InteractionState, id: &str) -> InteractionState {
    tracing::trace!(id, "event for node that is not visible");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionConfig;
    use crate::layout::{TreeLayoutConfig, layout};
    use crate::tree::prune;
    use crate::viewport::ViewportConfig;
    use std::rc::Rc;

    fn tree() -> Rc<TaxonomyNode> {
        Rc::new(TaxonomyNode::new("k8s", "Kubernetes").with_children([
            TaxonomyNode::new("pods", "Pods").with_children([TaxonomyNode::new("probes", "Probes")]),
            TaxonomyNode::new("services", "Services"),
        ]))
    }

    fn run(events: &[InteractionEvent]) -> InteractionState {
        let tree = tree();
        let mut state =
            InteractionState::new("k8s", ViewportConfig::default(), InteractionConfig::default());
        for event in events {
            let pruned = prune(&tree, state.expanded(), 0, 1);
            let current = layout(&pruned, 800.0, &TreeLayoutConfig::default()).unwrap();
            let context = EventContext {
                tree: &tree,
                nodes: &current.nodes,
                width: 1200.0,
                height: 800.0,
            };
            state = state.apply(event, &context);
        }
        state
    }

    #[test]
    fn test_deserialize_events() {
        let events: Vec<InteractionEvent> = serde_json::from_str(
            r#"[
                {"type": "pointerDown", "x": 1, "y": 2},
                {"type": "wheel", "deltaY": -100},
                {"type": "nodeClick", "id": "pods"},
                {"type": "collapseAll"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            [
                InteractionEvent::PointerDown { x: 1.0, y: 2.0 },
                InteractionEvent::Wheel { delta_y: -100.0 },
                InteractionEvent::NodeClick { id: "pods".into() },
                InteractionEvent::CollapseAll,
            ]
        );
    }

    #[test]
    fn test_apply_click_sequence() {
        let state = run(&[
            InteractionEvent::NodeClick { id: "pods".into() },
            InteractionEvent::NodeClick { id: "probes".into() },
        ]);
        assert!(state.expanded().contains("pods"));
        assert_eq!(state.selected().map(|n| n.id.as_str()), Some("probes"));
    }

    #[test]
    fn test_apply_ignores_hidden_nodes() {
        let state = run(&[InteractionEvent::NodeClick { id: "probes".into() }]);
        assert_eq!(state.selected(), None);
        assert!(!state.expanded().contains("probes"));
    }

    #[test]
    fn test_apply_toolbar() {
        let state = run(&[InteractionEvent::ExpandAll]);
        assert!(state.expanded().contains("pods"));
        let state = run(&[InteractionEvent::ExpandAll, InteractionEvent::CollapseAll]);
        assert_eq!(state.expanded().len(), 1);

        let state = run(&[InteractionEvent::Fit]);
        assert!(!state.fit_pending());
    }

    #[test]
    fn test_apply_drag() {
        let state = run(&[
            InteractionEvent::PointerDown { x: 0.0, y: 0.0 },
            InteractionEvent::PointerMove { x: 25.0, y: -5.0 },
            InteractionEvent::PointerUp,
        ]);
        assert_eq!(state.viewport().translate_x, 25.0);
        assert_eq!(state.viewport().translate_y, -5.0);
        assert!(!state.is_dragging());
    }
}
