use serde::{Deserialize, Serialize};

use crate::store::mvi::Intent;

use super::state::ViewportState;

/// Partial viewport update. `None` fields leave the prior value untouched.
///
/// This is also the persisted form of the map slice: absent fields are
/// omitted, and `null` reads back as absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl ViewportPatch {
    /// Patch carrying all three fields.
    pub fn full(viewport: ViewportState) -> Self {
        Self {
            longitude: Some(viewport.longitude),
            latitude: Some(viewport.latitude),
            zoom: Some(viewport.zoom),
        }
    }

    /// Patch carrying only the finite fields of `viewport`.
    pub fn finite(viewport: ViewportState) -> Self {
        let keep = |v: f64| v.is_finite().then_some(v);
        Self {
            longitude: keep(viewport.longitude),
            latitude: keep(viewport.latitude),
            zoom: keep(viewport.zoom),
        }
    }

    pub fn center(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            zoom: None,
        }
    }

    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.longitude.is_none() && self.latitude.is_none() && self.zoom.is_none()
    }
}

#[derive(Debug, Clone)]
pub enum MapIntent {
    /// Merge the provided fields into the viewport.
    SetPosition(ViewportPatch),
    /// Restore the given default viewport.
    ///
    /// The default is carried in the intent so the reducer stays free of
    /// configuration; `Store::reset_position` fills it in.
    Reset { default: ViewportState },
}

impl Intent for MapIntent {}
