use crate::store::mvi::Reducer;

use super::intent::{MapIntent, ViewportPatch};
use super::state::ViewportState;

pub struct MapReducer;

impl Reducer for MapReducer {
    type State = ViewportState;
    type Intent = MapIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MapIntent::SetPosition(patch) => merge(state, patch),
            MapIntent::Reset { default } => default,
        }
    }
}

fn merge(mut state: ViewportState, patch: ViewportPatch) -> ViewportState {
    merge_field(&mut state.longitude, patch.longitude);
    merge_field(&mut state.latitude, patch.latitude);
    merge_field(&mut state.zoom, patch.zoom);
    state
}

fn merge_field(slot: &mut f64, incoming: Option<f64>) {
    if let Some(value) = incoming {
        if value.to_bits() != slot.to_bits() {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_noop() {
        let state = ViewportState::new(1.0, 2.0, 3.0);
        let next = MapReducer::reduce(state, MapIntent::SetPosition(ViewportPatch::default()));
        assert_eq!(next, state);
    }

    #[test]
    fn nan_is_accepted_as_is() {
        let state = ViewportState::new(1.0, 2.0, 3.0);
        let next = MapReducer::reduce(state, MapIntent::SetPosition(ViewportPatch::zoom(f64::NAN)));
        assert!(next.zoom.is_nan());
        assert_eq!(next.longitude, 1.0);
    }

    #[test]
    fn infinity_is_accepted_as_is() {
        let state = ViewportState::default();
        let next = MapReducer::reduce(
            state,
            MapIntent::SetPosition(ViewportPatch::center(f64::INFINITY, 0.0)),
        );
        assert_eq!(next.longitude, f64::INFINITY);
        assert_eq!(next.latitude, 0.0);
    }

    #[test]
    fn reset_ignores_prior_state() {
        let default = ViewportState::new(10.0, 20.0, 4.0);
        let next = MapReducer::reduce(
            ViewportState::new(-5.0, -5.0, 17.0),
            MapIntent::Reset { default },
        );
        assert_eq!(next, default);
    }
}
