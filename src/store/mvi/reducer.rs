//! Reducer trait for the MVI store.

use super::intent::Intent;
use super::state::SliceState;

/// Reducer transforms a slice based on intents.
///
/// The reducer is the only place where slice transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The slice this reducer operates on.
    type State: SliceState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
