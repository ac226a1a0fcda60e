mod common;

use questmap::store::map::{MapIntent, MapReducer, ViewportPatch, ViewportState, DEFAULT_VIEWPORT};
use questmap::store::mvi::Reducer;
use questmap::store::Store;

#[test]
fn partial_patch_keeps_other_fields() {
    let state = ViewportState::new(10.0, 20.0, 3.0);
    let new = MapReducer::reduce(state, MapIntent::SetPosition(ViewportPatch::zoom(7.5)));
    assert_eq!(new, ViewportState::new(10.0, 20.0, 7.5));
}

#[test]
fn center_patch_keeps_zoom() {
    let state = ViewportState::new(10.0, 20.0, 3.0);
    let new = MapReducer::reduce(
        state,
        MapIntent::SetPosition(ViewportPatch::center(-0.1276, 51.5072)),
    );
    assert_eq!(new, ViewportState::new(-0.1276, 51.5072, 3.0));
}

#[test]
fn empty_patch_is_a_no_op() {
    let state = ViewportState::new(1.0, 2.0, 3.0);
    let new = MapReducer::reduce(state, MapIntent::SetPosition(ViewportPatch::default()));
    assert_eq!(new, state);
}

#[test]
fn non_finite_values_are_stored_as_is() {
    let state = ViewportState::default();
    let new = MapReducer::reduce(
        state,
        MapIntent::SetPosition(ViewportPatch::center(f64::NAN, f64::INFINITY)),
    );
    assert!(new.longitude.is_nan());
    assert_eq!(new.latitude, f64::INFINITY);
    assert_eq!(new.zoom, state.zoom);
}

#[test]
fn reset_is_idempotent() {
    let mut store = Store::new(DEFAULT_VIEWPORT);
    store.set_position(ViewportPatch::full(ViewportState::new(2.35, 48.85, 11.0)));

    assert!(store.reset_position());
    assert_eq!(store.viewport(), DEFAULT_VIEWPORT);
    assert!(!store.reset_position());
    assert_eq!(store.viewport(), DEFAULT_VIEWPORT);
}

#[test]
fn reset_uses_configured_default() {
    let default = ViewportState::new(139.6917, 35.6895, 9.0);
    let mut store = Store::new(default);
    store.set_position(ViewportPatch::zoom(2.0));
    store.reset_position();
    assert_eq!(store.viewport(), default);
}

#[test]
fn default_viewport_is_moscow() {
    assert_eq!(
        ViewportState::default(),
        ViewportState::new(37.6173, 55.7558, 5.0)
    );
}
