//! The pan/zoom transform and its limits.
//!
//! The transform maps layout space to screen space with a uniform scale
//! followed by a translation. The depth axis is horizontal on screen:
//!
//! ```text
//! screen_x = translate_x + scale * node.y
//! screen_y = translate_y + scale * node.x
//! ```

use serde::{Deserialize, Serialize};

use super::bounds::LayoutBounds;
use crate::layout::{Point, VisibleNode};

/// Screen-space margins reserved around the fitted content.
///
/// Defaults leave room for a toolbar strip above and a detail panel below.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for FitMargins {
    fn default() -> Self {
        Self {
            left: 12.0,
            right: 12.0,
            top: 20.0,
            bottom: 100.0,
        }
    }
}

impl FitMargins {
    /// No margins: fit into the whole viewport.
    pub const fn none() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        }
    }
}

/// Limits and step sizes for viewport changes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Smallest scale reachable by zooming.
    pub min_zoom: f64,
    /// Largest scale reachable by zooming.
    pub max_zoom: f64,
    /// Smallest scale fit-to-screen will choose.
    pub min_fit_scale: f64,
    /// Largest scale fit-to-screen will choose.
    pub max_fit_scale: f64,
    /// Layout-space padding around the node bounding box when fitting.
    pub fit_padding: f64,
    /// Screen-space margins when fitting.
    pub fit_margins: FitMargins,
    /// Scale change of one toolbar zoom step.
    pub zoom_step: f64,
    /// Scale change of one wheel notch.
    pub wheel_step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 2.2,
            min_fit_scale: 0.4,
            max_fit_scale: 1.2,
            fit_padding: 48.0,
            fit_margins: FitMargins::default(),
            zoom_step: 0.15,
            wheel_step: 0.1,
        }
    }
}

/// Current scale and translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl Viewport {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the scale by `delta`, clamped to the zoom range.
    ///
    /// Zooming is uniform about the layout origin; translation is unchanged.
    pub fn zoom(&mut self, delta: f64, config: &ViewportConfig) {
        self.scale = clamp(self.scale + delta, config.min_zoom, config.max_zoom);
    }

    /// Shift the translation by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Fit all `nodes` into a `width` x `height` viewport.
    ///
    /// Returns false, leaving the transform untouched, when there is nothing
    /// to fit or the viewport has no area.
    pub fn fit_to_screen(
        &mut self,
        nodes: &[VisibleNode],
        width: f64,
        height: f64,
        config: &ViewportConfig,
    ) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        let Some(bounds) = LayoutBounds::enclosing(nodes) else {
            return false;
        };
        let bounds = bounds.padded(config.fit_padding);
        let margins = &config.fit_margins;

        let available_width = width - margins.left - margins.right;
        let available_height = height - margins.top - margins.bottom;
        let fitted = ratio(available_width, bounds.depth_extent())
            .min(ratio(available_height, bounds.spread_extent()));
        let scale = clamp(fitted, config.min_fit_scale, config.max_fit_scale);

        let (center_spread, center_depth) = bounds.center();
        self.scale = scale;
        self.translate_x = margins.left + available_width / 2.0 - center_depth * scale;
        self.translate_y = margins.top + available_height / 2.0 - center_spread * scale;

        tracing::debug!(
            scale,
            translate_x = self.translate_x,
            translate_y = self.translate_y,
            "fit to screen"
        );
        true
    }

    /// Screen position of a layout-space point (`x` spread, `y` depth).
    #[inline]
    pub fn to_screen(&self, x: f64, y: f64) -> Point {
        Point::new(
            self.translate_x + self.scale * y,
            self.translate_y + self.scale * x,
        )
    }

    /// Layout-space `(x, y)` of a screen position.
    #[inline]
    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_y - self.translate_y) / self.scale,
            (screen_x - self.translate_x) / self.scale,
        )
    }

    /// SVG `transform` attribute for the content group.
    pub fn svg_transform(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Clamp without panicking on an inverted range.
#[inline]
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// `available / extent`, unbounded for a zero-sized extent.
#[inline]
fn ratio(available: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        available / extent
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{TreeLayoutConfig, layout};
    use crate::tree::{ExpansionSet, TaxonomyNode, ids_with_children, prune};
    use std::rc::Rc;

    fn small_layout() -> Vec<VisibleNode> {
        let tree = Rc::new(TaxonomyNode::new("r", "R").with_children([
            TaxonomyNode::new("a", "A"),
            TaxonomyNode::new("b", "B"),
        ]));
        let pruned = prune(&tree, &ExpansionSet::new(), 0, 1);
        layout(&pruned, 800.0, &TreeLayoutConfig::default())
            .unwrap()
            .nodes
    }

    fn wide_layout() -> Vec<VisibleNode> {
        let tree = TaxonomyNode::new("r", "R").with_children((0..6).map(|i| {
            TaxonomyNode::new(format!("c{i}"), "Child").with_children((0..5).map(|j| {
                TaxonomyNode::new(format!("c{i}-{j}"), "Grandchild")
                    .with_children([TaxonomyNode::new(format!("c{i}-{j}-leaf"), "Leaf")])
            }))
        }));
        let tree = Rc::new(tree);
        let expanded = ids_with_children(&tree);
        let pruned = prune(&tree, &expanded, 0, 1);
        layout(&pruned, 800.0, &TreeLayoutConfig::default())
            .unwrap()
            .nodes
    }

    #[test]
    fn test_zoom_clamps() {
        let config = ViewportConfig::default();
        let mut viewport = Viewport::new();
        viewport.scale = 2.1;
        viewport.zoom(0.15, &config);
        assert_eq!(viewport.scale, 2.2);

        for _ in 0..20 {
            viewport.zoom(-0.15, &config);
        }
        assert_eq!(viewport.scale, 0.3);
        assert_eq!((viewport.translate_x, viewport.translate_y), (0.0, 0.0));
    }

    #[test]
    fn test_zoom_at_limit_stays_put() {
        let config = ViewportConfig::default();
        let mut viewport = Viewport::new();
        viewport.scale = 2.2;
        viewport.zoom(0.5, &config);
        assert_eq!(viewport.scale, 2.2);

        viewport.scale = 0.3;
        viewport.zoom(-0.5, &config);
        assert_eq!(viewport.scale, 0.3);
    }

    #[test]
    fn test_pan_accumulates() {
        let mut viewport = Viewport::new();
        viewport.pan(10.0, -4.0);
        viewport.pan(5.0, 4.0);
        assert_eq!((viewport.translate_x, viewport.translate_y), (15.0, 0.0));
        assert_eq!(viewport.scale, 1.0);
    }

    #[test]
    fn test_fit_small_tree() {
        let nodes = small_layout();
        let mut viewport = Viewport::new();
        assert!(viewport.fit_to_screen(&nodes, 1200.0, 800.0, &ViewportConfig::default()));
        // Padded box 296 x 152 fits easily, so the scale caps at 1.2
        assert_eq!(viewport.scale, 1.2);
        assert!((viewport.translate_x - 312.0).abs() < 1e-9);
        assert!((viewport.translate_y + 48.0).abs() < 1e-9);

        let root = viewport.to_screen(nodes[0].x, nodes[0].y);
        assert!((root.x - 480.0).abs() < 1e-9);
        assert!((root.y - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_keeps_nodes_inside_margins() {
        let nodes = wide_layout();
        let config = ViewportConfig::default();
        let (width, height) = (1600.0, 1400.0);
        let mut viewport = Viewport::new();
        assert!(viewport.fit_to_screen(&nodes, width, height, &config));
        assert!(viewport.scale > config.min_fit_scale, "scale must not be clamped here");

        let margins = config.fit_margins;
        let inset = config.fit_padding * viewport.scale;
        for node in &nodes {
            let screen = viewport.to_screen(node.x, node.y);
            assert!(screen.x >= margins.left + inset - 1e-6, "{} left of box", node.id);
            assert!(screen.x <= width - margins.right - inset + 1e-6, "{} right of box", node.id);
            assert!(screen.y >= margins.top + inset - 1e-6, "{} above box", node.id);
            assert!(screen.y <= height - margins.bottom - inset + 1e-6, "{} below box", node.id);
        }
    }

    #[test]
    fn test_fit_is_noop_without_area_or_nodes() {
        let config = ViewportConfig::default();
        let before = Viewport {
            scale: 0.8,
            translate_x: 3.0,
            translate_y: 4.0,
        };

        let mut viewport = before;
        assert!(!viewport.fit_to_screen(&[], 1200.0, 800.0, &config));
        assert!(!viewport.fit_to_screen(&small_layout(), 0.0, 800.0, &config));
        assert!(!viewport.fit_to_screen(&small_layout(), 1200.0, 0.0, &config));
        assert_eq!(viewport, before);
    }

    #[test]
    fn test_fit_single_node_without_padding() {
        let config = ViewportConfig {
            fit_padding: 0.0,
            fit_margins: FitMargins::none(),
            ..Default::default()
        };
        let nodes = &small_layout()[..1];
        let mut viewport = Viewport::new();
        assert!(viewport.fit_to_screen(nodes, 400.0, 300.0, &config));
        assert_eq!(viewport.scale, 1.2);
        let root = viewport.to_screen(nodes[0].x, nodes[0].y);
        assert!((root.x - 200.0).abs() < 1e-9);
        assert!((root.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_world_inverse() {
        let viewport = Viewport {
            scale: 1.5,
            translate_x: -20.0,
            translate_y: 35.0,
        };
        let screen = viewport.to_screen(312.0, 340.0);
        assert_eq!(screen, Point::new(490.0, 503.0));
        let (x, y) = viewport.to_world(screen.x, screen.y);
        assert!((x - 312.0).abs() < 1e-9);
        assert!((y - 340.0).abs() < 1e-9);
    }

    #[test]
    fn test_svg_transform() {
        let viewport = Viewport {
            scale: 1.2,
            translate_x: 312.0,
            translate_y: -48.0,
        };
        assert_eq!(viewport.svg_transform(), "translate(312,-48) scale(1.2)");
    }
}
