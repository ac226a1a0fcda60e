//! Model-View-Intent (MVI) primitives for the application store.
//!
//! Every store slice is a feature module with the same three parts:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Store subscribers (UI, persistence)
//!    ↑                                        │
//!    └────────────────────────────────────────┘
//! ```
//!
//! - **State**: plain data describing one slice
//! - **Intent**: user actions or request outcomes
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
