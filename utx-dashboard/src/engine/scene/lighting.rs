use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, AMBIENT_COLOUR, DIRECTIONAL_ILLUMINANCE, DIRECTIONAL_LIGHT_DIRECTION,
};

pub fn ambient_light() -> AmbientLight {
    AmbientLight {
        color: AMBIENT_COLOUR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    }
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_LIGHT_DIRECTION.normalize())
            .looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("DirectionalLight"),
    ));
}
