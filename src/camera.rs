//! Camera Controller: eased 2D pan/zoom.
//!
//! Two views are kept: `current` (what is drawn) and `target` (where the
//! camera is heading). Each frame every field moves a fixed fraction of
//! the remaining distance:
//!
//!   current += (target − current) · k,   k = 1 − (1 − easing)^(dt·60)
//!
//! so `k == easing` at 60 Hz and the approach is monotonic with no
//! overshoot for any `0 < easing < 1`.
//!
//! Transform (scene → screen):  screen = viewport_center + (world + pan) · zoom
//! Inverse   (screen → scene):  world  = (screen − viewport_center) / zoom − pan
//!
//! Zoom is clamped when a target is set, so the eased value never heads for
//! an out-of-range zoom.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Viewport};
use crate::layout::Cluster;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub easing: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// `focus_on_point(x, y)` targets pan `(−x·k, −y·k)`. 1.0 centers the point.
    pub focus_framing: f32,
    /// Zoom used when inspecting a cluster.
    pub inspect_zoom: f32,
    /// Zoom of the opening close-up on the brightest star.
    pub intro_zoom: f32,
    /// Delay before the opening close-up zooms out to the whole field.
    pub intro_delay_ms: u64,
    /// Pan distance (scene units) under which the camera snaps to target.
    pub pan_epsilon: f32,
    pub zoom_epsilon: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            easing: 0.04,
            zoom_min: 0.25,
            zoom_max: 4.0,
            focus_framing: 1.0,
            inspect_zoom: 2.2,
            intro_zoom: 2.6,
            intro_delay_ms: 3500,
            pan_epsilon: 0.01,
            zoom_epsilon: 1e-4,
        }
    }
}

/// A pan/zoom pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub pan: Point,
    pub zoom: f32,
}

impl View {
    pub const HOME: Self = Self {
        pan: Point::ZERO,
        zoom: 1.0,
    };

    pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
        viewport.center() + (world + self.pan) * self.zoom
    }

    pub fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
        (screen - viewport.center()) * (1.0 / self.zoom) - self.pan
    }
}

impl Default for View {
    fn default() -> Self {
        Self::HOME
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    current: View,
    target: View,
    config: CameraConfig,
}

/// Smallest zoom any configuration may reach.
pub const ZOOM_FLOOR: f32 = 1e-3;

impl Camera {
    pub fn new(mut config: CameraConfig) -> Self {
        if config.zoom_min.is_nan() || config.zoom_min < ZOOM_FLOOR {
            log::warn!("camera: zoom_min {} raised to {}", config.zoom_min, ZOOM_FLOOR);
            config.zoom_min = ZOOM_FLOOR;
        }
        let mut cam = Self {
            current: View::HOME,
            target: View::HOME,
            config,
        };
        // Home itself may sit outside a custom zoom range.
        let z = cam.clamp_zoom(1.0);
        cam.current.zoom = z;
        cam.target.zoom = z;
        cam
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn target(&self) -> View {
        self.target
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        let (lo, hi) = (self.config.zoom_min, self.config.zoom_max.max(self.config.zoom_min));
        if zoom.is_finite() {
            zoom.clamp(lo, hi)
        } else {
            self.target.zoom.clamp(lo, hi)
        }
    }

    /// Head for `pan`/`zoom` (zoom clamped, non-finite pan ignored).
    pub fn set_target(&mut self, pan: Point, zoom: f32) {
        if pan.is_finite() {
            self.target.pan = pan;
        }
        self.target.zoom = self.clamp_zoom(zoom);
    }

    /// Jump without easing.
    pub fn snap_to(&mut self, pan: Point, zoom: f32) {
        self.set_target(pan, zoom);
        self.current = self.target;
    }

    pub fn reset(&mut self) {
        self.set_target(Point::ZERO, 1.0);
    }

    fn focus_pan(&self, point: Point) -> Point {
        point * -self.config.focus_framing
    }

    pub fn focus_on_point(&mut self, point: Point, zoom: f32) {
        self.set_target(self.focus_pan(point), zoom);
    }

    /// Snap to a close-up of `point` at the intro zoom.
    pub fn snap_to_point(&mut self, point: Point, zoom: f32) {
        self.snap_to(self.focus_pan(point), zoom);
    }

    /// Center `cluster` at the inspect zoom; returns its member stars.
    pub fn focus_on_cluster<'a>(&mut self, cluster: &'a Cluster) -> &'a [usize] {
        self.set_target(self.focus_pan(cluster.center), self.config.inspect_zoom);
        &cluster.stars
    }

    /// Drag by a screen-space delta. Divided by zoom so perceived drag
    /// speed doesn't depend on zoom level.
    pub fn pan_by(&mut self, screen_delta: Point) {
        let pan = self.target.pan + screen_delta * (1.0 / self.current.zoom);
        self.set_target(pan, self.target.zoom);
    }

    /// Multiply the target zoom (pinch ratio, wheel step), then clamp.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.set_target(self.target.pan, self.target.zoom * factor);
        }
    }

    /// Advance one frame of `dt` seconds. Returns true while still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        if dt > 0.0 && dt.is_finite() {
            let keep = (1.0 - self.config.easing).clamp(0.0, 1.0);
            let k = 1.0 - keep.powf(dt * 60.0);
            let (pe, ze) = (self.config.pan_epsilon, self.config.zoom_epsilon);
            self.current.pan.x = approach(self.current.pan.x, self.target.pan.x, k, pe);
            self.current.pan.y = approach(self.current.pan.y, self.target.pan.y, k, pe);
            self.current.zoom = approach(self.current.zoom, self.target.zoom, k, ze);
        }
        !self.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Largest per-field gap between current and target.
    pub fn distance_to_target(&self) -> f32 {
        let d = self.target.pan - self.current.pan;
        d.x.abs()
            .max(d.y.abs())
            .max((self.target.zoom - self.current.zoom).abs())
    }
}

/// One easing step. Snaps once within `eps` or once f32 precision stops
/// making progress, so arrival takes finitely many steps.
fn approach(current: f32, target: f32, k: f32, eps: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= eps {
        return target;
    }
    let next = current + diff * k;
    if next == current {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn cluster_at(x: f32, y: f32) -> Cluster {
        Cluster {
            category_id: "art".into(),
            name: "Art".into(),
            color: crate::color::Rgb::WHITE,
            center: Point::new(x, y),
            item_count: 2,
            percentage: 100.0,
            stars: vec![3, 7],
        }
    }

    #[test]
    fn test_non_positive_zoom_min_is_floored() {
        for zoom_min in [0.0, -2.0, f32::NAN] {
            let mut cam = Camera::new(CameraConfig {
                zoom_min,
                ..CameraConfig::default()
            });
            assert_eq!(cam.config().zoom_min, ZOOM_FLOOR);
            cam.snap_to(Point::ZERO, 0.0);
            assert_eq!(cam.current().zoom, ZOOM_FLOOR);
            cam.pan_by(Point::new(5.0, 0.0));
            assert!(cam.target().pan.is_finite());
            let world = cam.current().screen_to_world(Point::new(10.0, 10.0), Viewport::new(100.0, 100.0));
            assert!(world.is_finite());
        }
    }

    #[test]
    fn test_reset_targets_home() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.snap_to(Point::new(40.0, -20.0), 3.0);
        cam.reset();
        assert_eq!(cam.target(), View::HOME);
        assert_eq!(cam.current().zoom, 3.0);
    }

    #[test]
    fn test_focus_on_point_uses_framing() {
        let mut cam = Camera::new(CameraConfig {
            focus_framing: 0.5,
            ..CameraConfig::default()
        });
        cam.focus_on_point(Point::new(100.0, 40.0), 2.0);
        assert_eq!(cam.target().pan, Point::new(-50.0, -20.0));
        assert_eq!(cam.target().zoom, 2.0);
    }

    #[test]
    fn test_focus_on_cluster_returns_members() {
        let mut cam = Camera::new(CameraConfig::default());
        let cluster = cluster_at(120.0, -80.0);
        let members = cam.focus_on_cluster(&cluster);
        assert_eq!(members, &[3, 7]);
        assert_eq!(cam.target().pan, Point::new(-120.0, 80.0));
        assert_eq!(cam.target().zoom, 2.2);
    }

    #[test]
    fn test_zoom_always_clamped() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.zoom_by(100.0);
        assert_eq!(cam.target().zoom, 4.0);
        cam.zoom_by(1e-6);
        assert_eq!(cam.target().zoom, 0.25);
        cam.focus_on_point(Point::ZERO, f32::INFINITY);
        assert_eq!(cam.target().zoom, 0.25);
        cam.snap_to(Point::ZERO, -3.0);
        assert_eq!(cam.current().zoom, 0.25);
        for _ in 0..500 {
            cam.zoom_by(1.06);
            cam.step(FRAME);
            let z = cam.current().zoom;
            assert!((0.25..=4.0).contains(&z));
        }
    }

    #[test]
    fn test_pinch_ratio_two_doubles_zoom() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.zoom_by(2.0);
        assert_eq!(cam.target().zoom, 2.0);
        cam.snap_to(Point::ZERO, 3.0);
        cam.zoom_by(2.0);
        assert_eq!(cam.target().zoom, 4.0);
    }

    #[test]
    fn test_easing_converges_monotonically() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.set_target(Point::new(-300.0, 150.0), 3.5);
        let mut last = cam.distance_to_target();
        let mut steps = 0;
        while cam.step(FRAME) {
            let d = cam.distance_to_target();
            assert!(d < last, "distance must strictly decrease: {d} !< {last}");
            last = d;
            steps += 1;
            assert!(steps < 10_000, "easing never settled");
        }
        assert_eq!(cam.current(), cam.target());
    }

    #[test]
    fn test_first_step_covers_easing_fraction() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.set_target(Point::new(100.0, 0.0), 1.0);
        cam.step(FRAME);
        assert!((cam.current().pan.x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_step_frame_rate_independent() {
        let mut a = Camera::new(CameraConfig::default());
        let mut b = Camera::new(CameraConfig::default());
        a.set_target(Point::new(200.0, 0.0), 1.0);
        b.set_target(Point::new(200.0, 0.0), 1.0);
        a.step(2.0 * FRAME);
        b.step(FRAME);
        b.step(FRAME);
        assert!((a.current().pan.x - b.current().pan.x).abs() < 1e-3);
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.set_target(Point::new(10.0, 0.0), 1.0);
        cam.step(0.0);
        cam.step(-1.0);
        cam.step(f32::NAN);
        assert_eq!(cam.current(), View::HOME);
    }

    #[test]
    fn test_pan_by_scales_with_zoom() {
        let mut cam = Camera::new(CameraConfig::default());
        cam.snap_to(Point::ZERO, 2.0);
        cam.pan_by(Point::new(10.0, -4.0));
        assert_eq!(cam.target().pan, Point::new(5.0, -2.0));
    }

    #[test]
    fn test_screen_world_inverse() {
        let view = View {
            pan: Point::new(-30.0, 12.0),
            zoom: 1.5,
        };
        let vp = Viewport::new(800.0, 600.0);
        let world = Point::new(75.0, -40.0);
        let back = view.screen_to_world(view.world_to_screen(world, vp), vp);
        assert!(back.distance(world) < 1e-3);
        // The focused point lands at the viewport center.
        let focused = View {
            pan: world * -1.0,
            zoom: 2.2,
        };
        assert!(focused.world_to_screen(world, vp).distance(vp.center()) < 1e-3);
    }
}
