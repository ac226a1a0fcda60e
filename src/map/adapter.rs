//! Bridge between an imperative map widget and the store.
//!
//! Sync direction is fixed:
//!
//! - store → widget: exactly once, when [`MapAdapter::mount`] seeds the
//!   widget camera from the store viewport;
//! - widget → store: every camera change the widget reports is converted
//!   to degrees and merged into the store by [`MapAdapter::sync`].
//!
//! The adapter never re-commands the widget when the store changes, so a
//! widget event can never echo back into another widget event. To push a
//! store change into the widget (reset, jump to a quest), drop the adapter
//! and mount a new one.

use std::sync::mpsc::{channel, Receiver};

use super::projection::{from_lon_lat, to_lon_lat};
use super::widget::{Camera, MapWidget};
use crate::store::map::{ViewportPatch, ViewportState};
use crate::store::Store;

pub struct MapAdapter<W: MapWidget> {
    widget: Option<W>,
    changes: Receiver<Camera>,
    default_zoom: f64,
}

impl<W: MapWidget> MapAdapter<W> {
    /// Attach `widget`, seed it from `viewport`, and start listening.
    ///
    /// `default_zoom` stands in for a widget that reports no zoom.
    pub fn mount(mut widget: W, viewport: ViewportState, default_zoom: f64) -> Self {
        widget.attach(Camera {
            center: from_lon_lat(viewport.longitude, viewport.latitude),
            zoom: Some(viewport.zoom),
        });

        let (sender, changes) = channel();
        widget.on_change(Box::new(move |camera| {
            // Receiver lives as long as the adapter; a failed send only
            // happens during teardown.
            let _ = sender.send(*camera);
        }));

        tracing::debug!(
            longitude = viewport.longitude,
            latitude = viewport.latitude,
            zoom = viewport.zoom,
            "Map widget mounted"
        );

        Self {
            widget: Some(widget),
            changes,
            default_zoom,
        }
    }

    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// Mutable access for forwarding user input to the widget.
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    /// Merge pending widget changes into `store`, in the order they fired.
    ///
    /// Returns the number of changes applied. Changes with a non-finite
    /// center or zoom are dropped.
    pub fn sync(&mut self, store: &mut Store) -> usize {
        let mut applied = 0;
        while let Ok(camera) = self.changes.try_recv() {
            let Some(viewport) = self.to_viewport(camera) else {
                tracing::warn!(?camera, "Ignoring non-finite map camera");
                continue;
            };
            store.set_position(ViewportPatch::full(viewport));
            applied += 1;
        }
        applied
    }

    /// Detach and release the widget. Equivalent to dropping the adapter.
    pub fn unmount(self) {}

    fn to_viewport(&self, camera: Camera) -> Option<ViewportState> {
        let zoom = camera.zoom.unwrap_or(self.default_zoom);
        if !camera.center.is_finite() || !zoom.is_finite() {
            return None;
        }
        let (longitude, latitude) = to_lon_lat(camera.center);
        Some(ViewportState::new(longitude, latitude, zoom))
    }
}

impl<W: MapWidget> Drop for MapAdapter<W> {
    fn drop(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            widget.detach();
            tracing::debug!("Map widget released");
        }
    }
}
