//! Registry of toggleable scene layers and the one-way visibility binding.
//!
//! Loaders register an entity once its geometry is in the scene. The panel
//! reads the registry to build its rows, and each row owns a
//! [`VisibilityToggle`] whose flag is pushed onto the target's `Visibility`.

use bevy::prelude::*;
use constants::panel::{MODELS_SECTION_TITLE, POINT_CLOUDS_SECTION_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSection {
    Models,
    PointClouds,
}

impl LayerSection {
    pub fn title(&self) -> &'static str {
        match self {
            LayerSection::Models => MODELS_SECTION_TITLE,
            LayerSection::PointClouds => POINT_CLOUDS_SECTION_TITLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredLayer {
    pub target: Entity,
    pub label: String,
    pub section: LayerSection,
}

/// Every layer added to the scene, in registration order.
#[derive(Resource, Debug, Default)]
pub struct LayerRegistry {
    layers: Vec<RegisteredLayer>,
}

impl LayerRegistry {
    pub fn register(&mut self, target: Entity, label: &str, section: LayerSection) {
        info!("Registered {:?} layer '{}'", section, label);
        self.layers.push(RegisteredLayer {
            target,
            label: label.to_string(),
            section,
        });
    }

    pub fn layers(&self) -> &[RegisteredLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn count_in(&self, section: LayerSection) -> usize {
        self.layers.iter().filter(|l| l.section == section).count()
    }
}

/// Boolean bound to one scene entity's visibility.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VisibilityToggle {
    pub target: Entity,
    pub visible: bool,
}

impl VisibilityToggle {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            visible: true,
        }
    }
}

pub fn visibility_for(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Push changed toggle flags onto their targets.
pub fn apply_visibility_toggles(
    toggles: Query<&VisibilityToggle, Changed<VisibilityToggle>>,
    mut targets: Query<&mut Visibility>,
) {
    for toggle in &toggles {
        if let Ok(mut visibility) = targets.get_mut(toggle.target) {
            visibility.set_if_neq(visibility_for(toggle.visible));
        }
    }
}
