mod common;

use std::sync::{Arc, Mutex};

use common::persisted_store;
use questmap::map::{from_lon_lat, Camera, CanvasMap, ChangeListener, MapAdapter, MapWidget};
use questmap::persist::MemoryStorage;
use questmap::store::map::{ViewportPatch, ViewportState};
use questmap::store::Store;

/// What the test can observe of a widget after the adapter took it.
#[derive(Default)]
struct Probe {
    attached_with: Option<Camera>,
    detached: bool,
}

/// Widget driven by the test: `fire` plays the role of a user gesture.
struct ScriptedWidget {
    probe: Arc<Mutex<Probe>>,
    camera: Option<Camera>,
    listeners: Vec<ChangeListener>,
}

impl ScriptedWidget {
    fn new() -> (Self, Arc<Mutex<Probe>>) {
        let probe = Arc::new(Mutex::new(Probe::default()));
        let widget = Self {
            probe: Arc::clone(&probe),
            camera: None,
            listeners: Vec::new(),
        };
        (widget, probe)
    }

    fn fire(&mut self, longitude: f64, latitude: f64, zoom: f64) {
        let camera = Camera {
            center: from_lon_lat(longitude, latitude),
            zoom: Some(zoom),
        };
        self.camera = Some(camera);
        for listener in self.listeners.iter_mut() {
            listener(&camera);
        }
    }
}

impl MapWidget for ScriptedWidget {
    fn attach(&mut self, camera: Camera) {
        self.camera = Some(camera);
        self.probe.lock().unwrap().attached_with = Some(camera);
    }

    fn detach(&mut self) {
        self.camera = None;
        self.listeners.clear();
        self.probe.lock().unwrap().detached = true;
    }

    fn is_attached(&self) -> bool {
        self.camera.is_some()
    }

    fn camera(&self) -> Option<Camera> {
        self.camera
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}

// Degrees come back through the Mercator projection, so the last bits may differ.
fn assert_close(actual: ViewportState, longitude: f64, latitude: f64, zoom: f64) {
    assert!((actual.longitude - longitude).abs() < 1e-9, "longitude {}", actual.longitude);
    assert!((actual.latitude - latitude).abs() < 1e-9, "latitude {}", actual.latitude);
    assert_eq!(actual.zoom, zoom);
}

#[test]
fn mount_seeds_widget_from_store() {
    let store = Store::new(ViewportState::new(2.3522, 48.8566, 6.0));
    let (widget, probe) = ScriptedWidget::new();
    let _adapter = MapAdapter::mount(widget, store.viewport(), 5.0);

    let seeded = probe.lock().unwrap().attached_with.unwrap();
    assert_eq!(seeded.center, from_lon_lat(2.3522, 48.8566));
    assert_eq!(seeded.zoom, Some(6.0));
}

#[test]
fn user_pan_reaches_store_and_storage() {
    let storage = MemoryStorage::new();
    let mut store = persisted_store(&storage);
    let (widget, _probe) = ScriptedWidget::new();
    let mut adapter = MapAdapter::mount(widget, store.viewport(), 5.0);

    let widget = adapter.widget_mut().unwrap();
    widget.fire(30.0, 50.0, 8.0);
    widget.fire(37.6173, 55.7558, 12.0);
    assert_eq!(adapter.sync(&mut store), 2);

    assert_close(store.viewport(), 37.6173, 55.7558, 12.0);

    store.flush();
    let snapshot = common::stored_snapshot(&storage).unwrap();
    let map: ViewportState = serde_json::from_value(snapshot["map"].clone()).unwrap();
    assert_close(map, 37.6173, 55.7558, 12.0);
    assert!(map.is_identical(&store.viewport()));
}

#[test]
fn changes_apply_in_order() {
    let mut store = Store::new(ViewportState::default());
    let (widget, _probe) = ScriptedWidget::new();
    let mut adapter = MapAdapter::mount(widget, store.viewport(), 5.0);

    let widget = adapter.widget_mut().unwrap();
    widget.fire(10.0, 10.0, 3.0);
    widget.fire(-70.0, -33.0, 9.0);
    adapter.sync(&mut store);

    assert_close(store.viewport(), -70.0, -33.0, 9.0);
}

#[test]
fn store_changes_do_not_move_mounted_widget() {
    let mut store = Store::new(ViewportState::new(0.0, 0.0, 4.0));
    let (widget, _probe) = ScriptedWidget::new();
    let mut adapter = MapAdapter::mount(widget, store.viewport(), 5.0);
    let before = adapter.widget().unwrap().camera();

    store.set_position(ViewportPatch::full(ViewportState::new(100.0, 10.0, 15.0)));
    store.reset_position();
    assert_eq!(adapter.sync(&mut store), 0);

    assert_eq!(adapter.widget().unwrap().camera(), before);
}

#[test]
fn sync_without_changes_is_a_no_op() {
    let mut store = Store::new(ViewportState::new(1.0, 2.0, 3.0));
    let (widget, _probe) = ScriptedWidget::new();
    let mut adapter = MapAdapter::mount(widget, store.viewport(), 5.0);
    assert_eq!(adapter.sync(&mut store), 0);
    assert_eq!(store.viewport(), ViewportState::new(1.0, 2.0, 3.0));
}

#[test]
fn unmount_detaches_widget() {
    let store = Store::new(ViewportState::default());
    let (widget, probe) = ScriptedWidget::new();
    let adapter = MapAdapter::mount(widget, store.viewport(), 5.0);
    assert!(!probe.lock().unwrap().detached);

    adapter.unmount();
    assert!(probe.lock().unwrap().detached);
}

#[test]
fn remount_pushes_store_into_new_widget() {
    let mut store = Store::new(ViewportState::default());
    let (widget, _) = ScriptedWidget::new();
    let adapter = MapAdapter::mount(widget, store.viewport(), 5.0);

    store.set_position(ViewportPatch::full(ViewportState::new(12.4924, 41.8902, 14.0)));
    drop(adapter);

    let (widget, probe) = ScriptedWidget::new();
    let _adapter = MapAdapter::mount(widget, store.viewport(), 5.0);
    let seeded = probe.lock().unwrap().attached_with.unwrap();
    assert_eq!(seeded.center, from_lon_lat(12.4924, 41.8902));
    assert_eq!(seeded.zoom, Some(14.0));
}

#[test]
fn canvas_map_pan_and_zoom_flow_into_store() {
    let mut store = Store::new(ViewportState::new(0.0, 0.0, 5.0));
    let mut adapter = MapAdapter::mount(CanvasMap::new(1.0, 18.0), store.viewport(), 5.0);

    let widget = adapter.widget_mut().unwrap();
    widget.pan(0.1, 0.0);
    widget.zoom_by(2.0);
    assert_eq!(adapter.sync(&mut store), 2);

    let viewport = store.viewport();
    assert!(viewport.longitude > 0.0);
    assert!(viewport.latitude.abs() < 1e-9);
    assert_eq!(viewport.zoom, 7.0);
}
