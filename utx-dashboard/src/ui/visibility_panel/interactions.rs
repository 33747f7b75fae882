use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use constants::panel::{BUTTON_HOVERED, BUTTON_IDLE, BUTTON_PRESSED};

use super::state::*;
use crate::engine::layers::VisibilityToggle;

/// Set while pointer input belongs to the panel so the camera ignores it.
/// A drag keeps the owner it had on the frame the button went down.
#[derive(Resource, Default)]
pub struct PanelPointerCapture(pub bool);

// Chevron icon toggles collapse state
pub fn collapse_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<CollapseButton>)>,
    mut state: ResMut<PanelUiState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => { state.collapsed = !state.collapsed; *bg = BackgroundColor(BUTTON_PRESSED); }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None    => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

// Clicking a row flips its layer's visibility flag
pub fn toggle_row_interaction(
    mut q: Query<(&Interaction, &mut VisibilityToggle, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut toggle, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => { toggle.visible = !toggle.visible; *bg = BackgroundColor(BUTTON_PRESSED); }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None    => *bg = BackgroundColor(Color::NONE),
        }
    }
}

// Keep each row's check mark in step with its flag
pub fn reflect_toggle_state(
    toggles: Query<(&VisibilityToggle, &Children), Changed<VisibilityToggle>>,
    mut checks: Query<&mut Text, With<ToggleCheck>>,
) {
    for (toggle, children) in &toggles {
        for &child in &**children {
            if let Ok(mut text) = checks.get_mut(child) {
                if text.0 != check_mark(toggle.visible) {
                    text.0 = check_mark(toggle.visible).to_string();
                }
            }
        }
    }
}

pub fn update_pointer_capture(
    panels: Query<&RelativeCursorPosition, With<PanelRoot>>,
    buttons: Query<&Interaction, With<Button>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut capture: ResMut<PanelPointerCapture>,
) {
    let dragging = mouse_button.get_pressed().next().is_some();
    let drag_started = mouse_button.get_just_pressed().next().is_some();
    if dragging && !drag_started {
        return;
    }

    let over_panel = panels.iter().any(|cursor| cursor.mouse_over())
        || buttons.iter().any(|interaction| *interaction != Interaction::None);

    if capture.0 != over_panel {
        capture.0 = over_panel;
    }
}
