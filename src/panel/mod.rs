//! Copilot panel
//!
//! Composition root for the conversation store, request dispatcher, and
//! suggestion engine, plus the key handling and rendering that sit on top.

mod events;
mod render;
mod state;

pub use state::{PanelState, WARNING_PREFIX};
