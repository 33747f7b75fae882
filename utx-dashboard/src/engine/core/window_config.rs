use bevy::prelude::*;
use bevy::window::PresentMode;

#[cfg(target_arch = "wasm32")]
use constants::path::CANVAS_SELECTOR;

/// Primary window. On the web it binds to the dashboard canvas and follows
/// the size of its parent element.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "UTX Dashboard".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
