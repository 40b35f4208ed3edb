//! Interaction state machine.
//!
//! Ties pointer, wheel and toolbar input to expansion toggles, drag
//! panning, hover tooltips and node selection. State is an explicit value;
//! transitions are pure functions from state and input to the next state.

mod event;
mod state;

pub use event::{EventContext, InteractionEvent};
pub use state::{DragOrigin, InteractionConfig, InteractionState, Tooltip};
