//! Viewport slice: the map's center and zoom.
//!
//! The store is the single source of truth for map position. The map
//! adapter writes here on every widget change; nothing here ever calls
//! back into the widget.

mod intent;
mod reducer;
mod state;

pub use intent::{MapIntent, ViewportPatch};
pub use reducer::MapReducer;
pub use state::{ViewportState, DEFAULT_VIEWPORT};
