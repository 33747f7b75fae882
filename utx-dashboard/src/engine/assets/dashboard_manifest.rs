use bevy::prelude::*;
use constants::coordinate_system::POINT_CLOUD_SCALE;
use constants::path::{MODEL_PATH, POINT_CLOUD_PATHS};
use constants::render_settings::{ORBIT_AUTO_ROTATE, ORBIT_AUTO_ROTATE_SPEED};
use serde::{Deserialize, Serialize};

/// Dashboard configuration as a Bevy asset. Mirrors `dashboard.json`;
/// missing keys fall back to the built-in constants.
#[derive(Asset, Resource, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath)]
#[serde(default)]
pub struct DashboardManifest {
    pub model_path: String,
    pub point_cloud_paths: Vec<String>,
    pub point_scale: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for DashboardManifest {
    fn default() -> Self {
        Self {
            model_path: MODEL_PATH.to_string(),
            point_cloud_paths: POINT_CLOUD_PATHS.iter().map(|p| p.to_string()).collect(),
            point_scale: POINT_CLOUD_SCALE,
            auto_rotate: ORBIT_AUTO_ROTATE,
            auto_rotate_speed: ORBIT_AUTO_ROTATE_SPEED,
        }
    }
}
