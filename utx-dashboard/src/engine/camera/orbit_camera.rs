use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::{
    ORBIT_AUTO_ROTATE, ORBIT_AUTO_ROTATE_SPEED, ORBIT_DAMPING, ORBIT_MAX_RADIUS, ORBIT_MIN_RADIUS,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use std::f32::consts::{PI, TAU};

use crate::ui::visibility_panel::PanelPointerCapture;

/// Keeps the polar angle off the poles so `looking_at` stays well defined.
const POLAR_EPSILON: f32 = 1e-3;

/// Reference frame rate the damping factor is expressed in.
const DAMPING_FRAME_RATE: f32 = 60.0;

/// Orbit state for the dashboard camera: spherical coordinates around a
/// target plus pending motion that is released gradually each frame.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub damping: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    /// Natural log of the pending radius scale.
    pending_zoom: f32,
    pending_pan: Vec3,
}

impl OrbitCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(ORBIT_MIN_RADIUS);

        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            damping: ORBIT_DAMPING,
            auto_rotate: ORBIT_AUTO_ROTATE,
            auto_rotate_speed: ORBIT_AUTO_ROTATE_SPEED,
            min_radius: ORBIT_MIN_RADIUS,
            max_radius: ORBIT_MAX_RADIUS,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,
            pending_pan: Vec3::ZERO,
        }
    }

    pub fn with_auto_rotate(mut self, enabled: bool, speed: f32) -> Self {
        self.auto_rotate = enabled;
        self.auto_rotate_speed = speed;
        self
    }

    /// Camera position for the current spherical coordinates.
    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    /// Queue a rotation, in radians.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.pending_azimuth += azimuth;
        self.pending_polar += polar;
    }

    /// Queue a dolly. Positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_zoom -= steps * 0.05 * ORBIT_ZOOM_SPEED;
    }

    /// Queue a target translation in world units.
    pub fn pan(&mut self, offset: Vec3) {
        self.pending_pan += offset;
    }

    /// Radians per second contributed by auto-rotation.
    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// Advance by `dt` seconds, releasing `damping` of the pending motion
    /// per 60 Hz frame.
    pub fn advance(&mut self, dt: f32) {
        if self.auto_rotate {
            self.pending_azimuth -= self.auto_rotate_rate() * dt;
        }

        let frames = dt * DAMPING_FRAME_RATE;
        let released = 1.0 - (1.0 - self.damping).powf(frames);

        self.azimuth = (self.azimuth + self.pending_azimuth * released).rem_euclid(TAU);
        self.polar = (self.polar + self.pending_polar * released)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * (self.pending_zoom * released).exp())
            .clamp(self.min_radius, self.max_radius);
        self.target += self.pending_pan * released;

        let kept = 1.0 - released;
        self.pending_azimuth *= kept;
        self.pending_polar *= kept;
        self.pending_zoom *= kept;
        self.pending_pan *= kept;
    }
}

/// Read pointer input into the orbit, unless the pointer is over the panel.
pub fn orbit_camera_input(
    mut cameras: Query<(&mut OrbitCamera, &Transform, &Projection)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    capture: Res<PanelPointerCapture>,
) {
    if capture.0 {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.height().max(1.0);

    for (mut orbit, transform, projection) in &mut cameras {
        let delta = mouse_motion.delta;

        if mouse_button.pressed(MouseButton::Left) && delta != Vec2::ZERO {
            let scale = TAU / height * ORBIT_ROTATE_SPEED;
            orbit.rotate(-delta.x * scale, -delta.y * scale);
        }

        if mouse_button.pressed(MouseButton::Right) && delta != Vec2::ZERO {
            let fov = match projection {
                Projection::Perspective(perspective) => perspective.fov,
                _ => std::f32::consts::FRAC_PI_4,
            };
            let world_per_pixel = 2.0 * orbit.radius * (fov * 0.5).tan() / height;
            let offset =
                (-transform.right() * delta.x + transform.up() * delta.y) * world_per_pixel;
            orbit.pan(offset);
        }

        let steps = match mouse_scroll.unit {
            MouseScrollUnit::Line => mouse_scroll.delta.y,
            MouseScrollUnit::Pixel => mouse_scroll.delta.y * 0.01,
        };
        if steps.abs() > f32::EPSILON {
            orbit.zoom(steps);
        }
    }
}

/// Apply damping and auto-rotation, then place the camera.
pub fn update_orbit_camera(
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    time: Res<Time>,
) {
    for (mut orbit, mut transform) in &mut cameras {
        orbit.advance(time.delta_secs());
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use constants::render_settings::{CAMERA_POSITION, CAMERA_TARGET};

    fn still_orbit() -> OrbitCamera {
        OrbitCamera::new(CAMERA_POSITION, CAMERA_TARGET).with_auto_rotate(false, 0.0)
    }

    #[test]
    fn reproduces_initial_pose() {
        let orbit = still_orbit();
        let position = orbit.position();

        assert_relative_eq!(position.x, CAMERA_POSITION.x, epsilon = 1e-2);
        assert_relative_eq!(position.y, CAMERA_POSITION.y, epsilon = 1e-2);
        assert_relative_eq!(position.z, CAMERA_POSITION.z, epsilon = 1e-2);
        assert_relative_eq!(orbit.radius, (CAMERA_POSITION - CAMERA_TARGET).length());
    }

    #[test]
    fn looks_at_target() {
        let orbit = still_orbit();
        let transform = orbit.transform();
        let towards_target = (CAMERA_TARGET - transform.translation).normalize();

        assert_relative_eq!(transform.forward().dot(towards_target), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn zero_time_step_changes_nothing() {
        let mut orbit = still_orbit();
        orbit.rotate(1.0, 0.5);
        let before = orbit.position();
        orbit.advance(0.0);

        assert_eq!(orbit.position(), before);
    }

    #[test]
    fn auto_rotation_keeps_radius_and_height() {
        let mut orbit = OrbitCamera::new(CAMERA_POSITION, CAMERA_TARGET);
        let start = orbit.position();
        for _ in 0..120 {
            orbit.advance(1.0 / 60.0);
        }
        let end = orbit.position();

        assert_relative_eq!((end - CAMERA_TARGET).length(), orbit.radius, epsilon = 1e-2);
        assert_relative_eq!(end.y, start.y, epsilon = 1e-2);
        assert!(end.distance(start) > 1.0);
    }

    #[test]
    fn auto_rotation_settles_at_configured_rate() {
        let mut orbit = OrbitCamera::new(CAMERA_POSITION, CAMERA_TARGET);
        // let the pending motion reach steady state
        for _ in 0..600 {
            orbit.advance(1.0 / 60.0);
        }
        let before = orbit.azimuth;
        orbit.advance(1.0 / 60.0);
        let step = (before - orbit.azimuth).rem_euclid(TAU);

        assert_relative_eq!(step, orbit.auto_rotate_rate() / 60.0, epsilon = 1e-4);
    }

    #[test]
    fn damping_releases_input_gradually() {
        let mut orbit = still_orbit();
        let start = orbit.azimuth;
        orbit.rotate(0.5, 0.0);

        orbit.advance(1.0 / 60.0);
        let first = (orbit.azimuth - start).rem_euclid(TAU);
        assert_relative_eq!(first, 0.5 * ORBIT_DAMPING, epsilon = 1e-4);

        for _ in 0..2000 {
            orbit.advance(1.0 / 60.0);
        }
        let total = (orbit.azimuth - start).rem_euclid(TAU);
        assert_relative_eq!(total, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = still_orbit();
        orbit.zoom(10_000.0);
        for _ in 0..600 {
            orbit.advance(1.0 / 60.0);
        }

        assert_relative_eq!(orbit.radius, ORBIT_MIN_RADIUS);
    }

    #[test]
    fn polar_angle_stays_off_the_pole() {
        let mut orbit = still_orbit();
        orbit.rotate(0.0, -10.0);
        for _ in 0..600 {
            orbit.advance(1.0 / 60.0);
        }

        assert!(orbit.polar >= POLAR_EPSILON);
        assert!(orbit.transform().translation.is_finite());
    }
}
