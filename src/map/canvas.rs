//! World map drawn on a ratatui canvas.
//!
//! `CanvasMap` is the interactive widget behind the map screen. It keeps its
//! own camera in Web Mercator meters, enforces the zoom range, and reports
//! every pan or zoom to its listeners. It never looks at the store.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map as WorldOutline, MapResolution};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use super::projection::{to_lon_lat, wrap_x, Projected, HALF_WORLD};
use super::widget::{Camera, ChangeListener, MapWidget};
use crate::ui::theme::{MAP_CROSSHAIR, MAP_LAND, MAP_MARKER, PANEL_BORDER};

/// A labelled point drawn over the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub longitude: f64,
    pub latitude: f64,
    pub label: String,
}

pub struct CanvasMap {
    camera: Option<Camera>,
    min_zoom: f64,
    max_zoom: f64,
    listeners: Vec<ChangeListener>,
}

impl CanvasMap {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            camera: None,
            min_zoom,
            max_zoom,
            listeners: Vec::new(),
        }
    }

    /// Move the camera by a fraction of the visible width.
    /// Positive `dx` pans east, positive `dy` pans north.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let Some(mut camera) = self.camera else {
            return;
        };
        let span = visible_span(camera.zoom.unwrap_or(self.min_zoom));
        camera.center = Projected::new(
            wrap_x(camera.center.x + dx * span),
            (camera.center.y + dy * span).clamp(-HALF_WORLD, HALF_WORLD),
        );
        self.set_camera(camera);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        let Some(mut camera) = self.camera else {
            return;
        };
        let current = camera.zoom.unwrap_or(self.min_zoom);
        let next = self.clamp_zoom(current + delta);
        if next == current {
            return;
        }
        camera.zoom = Some(next);
        self.set_camera(camera);
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, markers: &[MapMarker]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PANEL_BORDER))
            .title(self.title());

        let Some(camera) = self.camera else {
            frame.render_widget(block, area);
            return;
        };

        let span = visible_span(camera.zoom.unwrap_or(self.min_zoom));
        // Terminal cells are roughly twice as tall as wide.
        let aspect = if area.width == 0 {
            1.0
        } else {
            (f64::from(area.height) * 2.0) / f64::from(area.width)
        };
        let half_w = span / 2.0;
        let half_h = span * aspect / 2.0;
        let (west, south) = to_lon_lat(Projected::new(camera.center.x - half_w, camera.center.y - half_h));
        let (east, north) = to_lon_lat(Projected::new(camera.center.x + half_w, camera.center.y + half_h));
        let (center_lon, center_lat) = to_lon_lat(camera.center);

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([west, east])
            .y_bounds([south, north])
            .paint(move |ctx| {
                ctx.draw(&WorldOutline {
                    resolution: MapResolution::High,
                    color: MAP_LAND,
                });
                ctx.layer();
                for marker in markers {
                    ctx.print(
                        marker.longitude,
                        marker.latitude,
                        Span::styled(format!("◆ {}", marker.label), Style::default().fg(MAP_MARKER)),
                    );
                }
                ctx.print(center_lon, center_lat, Span::styled("+", Style::default().fg(MAP_CROSSHAIR)));
            });
        frame.render_widget(canvas, area);
    }

    fn title(&self) -> String {
        match self.camera {
            Some(camera) => {
                let (lon, lat) = to_lon_lat(camera.center);
                let zoom = camera.zoom.unwrap_or(self.min_zoom);
                format!(" Map  {:.4}, {:.4}  z{:.1} ", lon, lat, zoom)
            }
            None => " Map ".to_string(),
        }
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
        for listener in self.listeners.iter_mut() {
            listener(&camera);
        }
    }
}

impl MapWidget for CanvasMap {
    fn attach(&mut self, mut camera: Camera) {
        camera.zoom = camera.zoom.map(|zoom| self.clamp_zoom(zoom));
        self.camera = Some(camera);
    }

    fn detach(&mut self) {
        self.camera = None;
        self.listeners.clear();
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

/// Projected meters across the visible width at `zoom`. Zoom 1 shows the
/// whole world; each level halves the span.
fn visible_span(zoom: f64) -> f64 {
    2.0 * HALF_WORLD / 2f64.powf(zoom - 1.0)
}
