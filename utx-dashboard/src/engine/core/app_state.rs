use bevy::prelude::*;

use crate::engine::assets::dashboard_manifest::DashboardManifest;
use crate::engine::camera::orbit_camera::OrbitCamera;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the manifest to load or fail.
    #[default]
    Configuring,
    /// Model and point cloud layers are arriving. The scene is interactive
    /// throughout.
    Streaming,
}

#[derive(Component)]
pub struct FpsText;

/// Carry the manifest's rotation settings onto the orbit camera.
pub fn apply_manifest_to_camera(
    manifest: Res<DashboardManifest>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    for mut orbit in &mut cameras {
        orbit.auto_rotate = manifest.auto_rotate;
        orbit.auto_rotate_speed = manifest.auto_rotate_speed;
    }
    info!(
        "→ Streaming layers (auto-rotate {}, speed {})",
        manifest.auto_rotate, manifest.auto_rotate_speed
    );
}
