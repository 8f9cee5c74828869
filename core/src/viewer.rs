//! Pan/zoom state for the directions map viewer.
//!
//! The image is laid out at its fit size (letterboxed inside the viewport) and
//! rendered with `translate(tx, ty) scale(s)` around its center, so the
//! translation is in screen pixels and the pan limits follow directly from
//! how far the scaled image overflows the viewport.

use crate::config::ViewerConfig;
use crate::geometry::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewerPhase {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewTransform {
    pub fn identity(scale: f64) -> Self {
        Self {
            scale,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerGeometry {
    /// Viewer element bounds in client coordinates.
    pub viewport: Rect,
    /// Intrinsic image size; zero until the image has loaded.
    pub natural: Size,
}

impl ViewerGeometry {
    pub fn new(viewport: Rect, natural: Size) -> Self {
        Self { viewport, natural }
    }

    /// Largest aspect-preserving size of the image inside the viewport.
    pub fn fit_size(&self) -> Size {
        let view = self.viewport.size();
        let natural_w = first_positive(self.natural.width, view.width);
        let natural_h = first_positive(self.natural.height, view.height);
        let fit = ratio_or_one(view.width / natural_w).min(ratio_or_one(view.height / natural_h));
        Size::new(natural_w * fit, natural_h * fit)
    }

    /// Allowed translation magnitude per axis at `scale`.
    pub fn half_range(&self, scale: f64) -> (f64, f64) {
        let fit = self.fit_size();
        let view = self.viewport.size();
        let limit_x = ((fit.width * scale - view.width) / 2.0).max(0.0);
        let limit_y = ((fit.height * scale - view.height) / 2.0).max(0.0);
        (limit_x, limit_y)
    }
}

fn first_positive(value: f64, fallback: f64) -> f64 {
    if value > 0.0 {
        value
    } else if fallback > 0.0 {
        fallback
    } else {
        1.0
    }
}

fn ratio_or_one(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        1.0
    }
}

pub fn clamp_translation(transform: ViewTransform, geometry: &ViewerGeometry) -> ViewTransform {
    let (limit_x, limit_y) = geometry.half_range(transform.scale);
    ViewTransform {
        scale: transform.scale,
        translate_x: clamp_axis(transform.translate_x, limit_x),
        translate_y: clamp_axis(transform.translate_y, limit_y),
    }
}

fn clamp_axis(value: f64, limit: f64) -> f64 {
    if value.is_nan() || limit <= 0.0 {
        return 0.0;
    }
    value.clamp(-limit, limit)
}

#[derive(Clone, Copy, Debug)]
struct PanGesture {
    start: Point,
    baseline_x: f64,
    baseline_y: f64,
}

#[derive(Clone, Debug)]
pub struct PanZoomViewer {
    config: ViewerConfig,
    phase: ViewerPhase,
    transform: ViewTransform,
    geometry: ViewerGeometry,
    pan: Option<PanGesture>,
    resetting: bool,
}

impl PanZoomViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let transform = ViewTransform::identity(config.min_scale);
        Self {
            config,
            phase: ViewerPhase::Closed,
            transform,
            geometry: ViewerGeometry::default(),
            pan: None,
            resetting: false,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == ViewerPhase::Open
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn geometry(&self) -> ViewerGeometry {
        self.geometry
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn is_resetting(&self) -> bool {
        self.resetting
    }

    pub fn css_transform(&self) -> String {
        self.transform.css()
    }

    pub fn open(&mut self, viewport: Rect) {
        self.phase = ViewerPhase::Open;
        self.geometry.viewport = viewport;
        self.pan = None;
        self.reset(false);
    }

    /// Returns whether the viewer was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.phase = ViewerPhase::Closed;
        self.pan = None;
        self.reset(false);
        was_open
    }

    pub fn set_natural_size(&mut self, natural: Size) {
        if natural.is_empty() {
            return;
        }
        self.geometry.natural = natural;
        self.clamp_translation();
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.geometry.viewport = viewport;
        self.clamp_translation();
    }

    /// Re-clamps against new bounds; ignored while closed.
    pub fn on_resize(&mut self, viewport: Rect) -> bool {
        if !self.is_open() {
            return false;
        }
        self.set_viewport(viewport);
        true
    }

    pub fn clamp_translation(&mut self) {
        self.transform = clamp_translation(self.transform, &self.geometry);
    }

    /// Zooms by `delta_scale`, keeping `focal` (client coordinates, defaulting
    /// to the viewport center) fixed on screen. Returns whether the scale changed.
    pub fn zoom(&mut self, delta_scale: f64, focal: Option<Point>) -> bool {
        if !delta_scale.is_finite() {
            return false;
        }
        let current = self.transform.scale;
        let next = (current + delta_scale).clamp(self.config.min_scale, self.config.max_scale);
        if next == current {
            return false;
        }
        let center = self.geometry.viewport.center();
        let focal = focal.unwrap_or(center);
        if focal.is_finite() && current > 0.0 {
            let factor = next / current;
            let offset_x = focal.x - (center.x + self.transform.translate_x);
            let offset_y = focal.y - (center.y + self.transform.translate_y);
            self.transform.translate_x -= offset_x * (factor - 1.0);
            self.transform.translate_y -= offset_y * (factor - 1.0);
        }
        self.transform.scale = next;
        self.clamp_translation();
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom(self.config.zoom_step, None)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom(-self.config.zoom_step, None)
    }

    /// Wheel input. Returns whether the event was consumed, in which case the
    /// host should suppress page scrolling.
    pub fn wheel(&mut self, delta_y: f64, focal: Point) -> bool {
        if !self.is_open() {
            return false;
        }
        let step = if delta_y < 0.0 {
            self.config.wheel_step
        } else {
            -self.config.wheel_step
        };
        self.zoom(step, Some(focal));
        true
    }

    /// Starts a drag. Only one drag may be active; returns false otherwise.
    pub fn begin_pan(&mut self, point: Point) -> bool {
        if self.pan.is_some() {
            return false;
        }
        self.pan = Some(PanGesture {
            start: point,
            baseline_x: self.transform.translate_x,
            baseline_y: self.transform.translate_y,
        });
        true
    }

    pub fn pan_to(&mut self, point: Point) -> bool {
        let Some(gesture) = self.pan else {
            return false;
        };
        self.transform.translate_x = gesture.baseline_x + (point.x - gesture.start.x);
        self.transform.translate_y = gesture.baseline_y + (point.y - gesture.start.y);
        self.clamp_translation();
        true
    }

    /// Returns whether a drag was active.
    pub fn end_pan(&mut self) -> bool {
        self.pan.take().is_some()
    }

    /// Restores the identity transform. With `animate` the resetting flag is
    /// raised until `finish_reset_animation`.
    pub fn reset(&mut self, animate: bool) -> bool {
        self.transform = ViewTransform::identity(self.config.min_scale);
        self.resetting = animate;
        self.clamp_translation();
        animate
    }

    pub fn finish_reset_animation(&mut self) {
        self.resetting = false;
    }
}
