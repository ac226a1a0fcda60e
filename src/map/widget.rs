//! Contract between the map adapter and an interactive map widget.

use super::projection::Projected;

/// The widget's camera: projected center plus zoom.
///
/// A widget may not know its zoom yet (`None`); the adapter substitutes the
/// configured default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Projected,
    pub zoom: Option<f64>,
}

/// Callback invoked after every widget-originated camera change.
pub type ChangeListener = Box<dyn FnMut(&Camera) + Send>;

/// An imperative, stateful map view.
///
/// The widget owns its camera. After [`MapWidget::attach`] it may move the
/// camera at any time (user pan/zoom, animations) and must report every
/// change to all registered listeners, in the order the changes happen.
pub trait MapWidget {
    /// Bind the widget to its render target and seed the camera. Does not
    /// notify listeners.
    fn attach(&mut self, camera: Camera);

    /// Release the render target. Listeners are dropped and no further
    /// changes are reported.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;

    /// Current camera, if attached.
    fn camera(&self) -> Option<Camera>;

    fn on_change(&mut self, listener: ChangeListener);
}
