use bevy::prelude::*;
use constants::panel::{PANEL_CLOSED_WIDTH, PANEL_OPEN_WIDTH};

use crate::engine::layers::LayerSection;

// Resources
#[derive(Resource)]
pub struct PanelUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for PanelUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: PANEL_OPEN_WIDTH,
            closed_width: PANEL_CLOSED_WIDTH,
        }
    }
}

impl PanelUiState {
    pub fn width(&self) -> f32 {
        if self.collapsed { self.closed_width } else { self.open_width }
    }

    pub fn body_display(&self) -> Display {
        if self.collapsed { Display::None } else { Display::Flex }
    }
}

/// How many registry entries already have a row in the panel.
#[derive(Resource, Default)]
pub struct SpawnedRows(pub usize);

// Components
#[derive(Component)]
pub struct PanelRoot;
#[derive(Component)]
pub struct PanelBody;
#[derive(Component)]
pub struct HeaderNode;
#[derive(Component)]
pub struct TitleText;
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;

/// Container that receives the rows of one section.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SectionList(pub LayerSection);

/// Check mark text inside a toggle row.
#[derive(Component)]
pub struct ToggleCheck;

pub fn check_mark(visible: bool) -> &'static str {
    if visible { "[x]" } else { "[ ]" }
}
