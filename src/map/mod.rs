//! Interactive map: projection math, the widget, and its store adapter.

pub mod adapter;
pub mod canvas;
pub mod projection;
pub mod widget;

pub use adapter::MapAdapter;
pub use canvas::{CanvasMap, MapMarker};
pub use projection::{from_lon_lat, to_lon_lat, Projected};
pub use widget::{Camera, ChangeListener, MapWidget};
