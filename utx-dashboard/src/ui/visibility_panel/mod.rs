//! Layer visibility panel.
//!
//! A collapsible panel docked to the right edge of the canvas with one
//! section for models and one for point clouds. Rows appear as layers are
//! registered, in registration order; clicking a row flips the layer's
//! [`VisibilityToggle`](crate::engine::layers::VisibilityToggle), which is
//! pushed onto the scene entity in the same frame.
//!
//! The panel also claims pointer input that starts over it, so orbit input
//! does not fire while the user works the panel. Orbit input is ordered
//! after the claim is updated.

/// Row and collapse button interactions, plus pointer capture.
pub mod interactions;

/// UI state resources and marker components.
pub mod state;

/// Panel spawning, row creation and collapse layout.
pub mod ui;

use bevy::prelude::*;

pub use interactions::PanelPointerCapture;
pub use state::{PanelUiState, SpawnedRows};

use crate::engine::layers::apply_visibility_toggles;
use interactions::{
    collapse_button_interaction, reflect_toggle_state, toggle_row_interaction,
    update_pointer_capture,
};
use ui::{apply_collapse_state, spawn_visibility_panel, sync_toggle_rows};

// Registers the visibility panel, its resources and systems.
pub struct VisibilityPanelPlugin;

impl Plugin for VisibilityPanelPlugin {
    fn build(&self, app: &mut App) {
        app
            // init resources
            .init_resource::<PanelUiState>()
            .init_resource::<SpawnedRows>()
            .init_resource::<PanelPointerCapture>()
            .add_systems(Startup, spawn_visibility_panel)
            .add_systems(
                Update,
                (
                    collapse_button_interaction,
                    apply_collapse_state,
                    sync_toggle_rows,
                    (toggle_row_interaction, apply_visibility_toggles, reflect_toggle_state).chain(),
                    update_pointer_capture,
                ),
            );
    }
}
