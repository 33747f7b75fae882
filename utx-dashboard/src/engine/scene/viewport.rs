use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use constants::render_settings::MAX_PIXEL_RATIO;

use crate::engine::camera::DashboardCamera;

/// Current output size of the canvas.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub logical: Vec2,
    pub pixel_ratio: f32,
    pub physical: UVec2,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let pixel_ratio = device_pixel_ratio.clamp(f32::EPSILON, MAX_PIXEL_RATIO);
        let logical = Vec2::new(width.max(0.0), height.max(0.0));

        Self {
            logical,
            pixel_ratio,
            physical: (logical * pixel_ratio).round().as_uvec2(),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.logical.x.max(1.0) / self.logical.y.max(1.0)
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Seed the viewport from the primary window once it exists.
pub fn init_viewport_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    if let Ok(window) = windows.single() {
        *viewport = ViewportSize::new(window.width(), window.height(), window.scale_factor());
    }
}

/// Keep device pixels per logical pixel at or below the cap.
pub fn cap_pixel_ratio(mut windows: Query<&mut Window, Changed<Window>>) {
    for mut window in &mut windows {
        let base = window.resolution.base_scale_factor();
        let wanted = (base > MAX_PIXEL_RATIO).then_some(MAX_PIXEL_RATIO);

        if window.resolution.scale_factor_override() != wanted {
            window.resolution.set_scale_factor_override(wanted);
        }
    }
}

/// Recompute aspect ratio and output size in the frame the resize arrives.
pub fn handle_viewport_resize(
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window>,
    mut viewport: ResMut<ViewportSize>,
    mut cameras: Query<&mut Projection, With<DashboardCamera>>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };

    let pixel_ratio = windows
        .get(event.window)
        .map(|window| window.scale_factor())
        .unwrap_or(viewport.pixel_ratio);
    *viewport = ViewportSize::new(event.width, event.height, pixel_ratio);
    debug!(
        "Viewport resized to {}x{} ({}x{} px at ratio {})",
        viewport.logical.x,
        viewport.logical.y,
        viewport.physical.x,
        viewport.physical.y,
        viewport.pixel_ratio
    );

    for mut projection in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = viewport.aspect_ratio();
        }
    }
}
