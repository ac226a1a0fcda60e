//! Base trait for intents in the MVI store.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (panning the map, logging out)
/// - Request lifecycle events (started, fulfilled, rejected)
///
/// Intents are processed by reducers to produce new slice states.
pub trait Intent: Send + 'static {}
