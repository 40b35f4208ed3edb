//! Pan/zoom viewport: scale, translation, fit-to-screen and conversion
//! between layout and screen coordinates.

mod bounds;
mod transform;

pub use bounds::LayoutBounds;
pub use transform::{FitMargins, Viewport, ViewportConfig};
