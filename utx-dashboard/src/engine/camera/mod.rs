//! Dashboard camera: a damped, auto-rotating orbit around the map centre.

/// Orbit state, pointer input handling and per-frame camera placement.
pub mod orbit_camera;

use bevy::prelude::*;
use constants::render_settings::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_POSITION, CAMERA_TARGET};

use orbit_camera::OrbitCamera;

/// Marks the single camera the dashboard renders through.
#[derive(Component)]
pub struct DashboardCamera;

pub fn spawn_dashboard_camera(commands: &mut Commands) {
    let orbit = OrbitCamera::new(CAMERA_POSITION, CAMERA_TARGET);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
        Msaa::Sample4,
        orbit,
        DashboardCamera,
        Name::new("DashboardCamera"),
    ));
}
