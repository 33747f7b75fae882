use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::BACKGROUND_COLOUR;

// Crate engine modules
use crate::engine::assets::coordinate_table::{CoordinateTable, CoordinateTableLoader};
use crate::engine::assets::dashboard_manifest::DashboardManifest;
use crate::engine::camera::orbit_camera::{orbit_camera_input, update_orbit_camera};
use crate::engine::camera::spawn_dashboard_camera;
use crate::engine::core::app_state::{AppState, FpsText, apply_manifest_to_camera};
use crate::engine::core::window_config::create_window_config;
use crate::engine::layers::LayerRegistry;
use crate::engine::scene::grid::create_ground_grid;
use crate::engine::scene::lighting::{ambient_light, spawn_lighting};
use crate::engine::scene::viewport::{
    ViewportSize, cap_pixel_ratio, handle_viewport_resize, init_viewport_size,
};
// Loading
use crate::engine::loading::manifest_loader::{ManifestLoader, resolve_manifest, start_loading};
use crate::engine::loading::model_loader::{
    ModelLoader, ModelMaterial, attach_model_when_ready, start_model_load,
};
use crate::engine::loading::point_cloud_queue::{
    PointCloudPalette, advance_point_cloud_queue, start_point_cloud_queue,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::point_cloud::layer::PointCloudMaterial;
// UI
use crate::ui::visibility_panel::VisibilityPanelPlugin;
use crate::ui::visibility_panel::interactions::update_pointer_capture;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers DashboardManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<DashboardManifest>::new(&["json"]))
        .init_asset::<CoordinateTable>()
        .init_asset_loader::<CoordinateTableLoader>()
        .insert_resource(ClearColor(BACKGROUND_COLOUR))
        .insert_resource(ambient_light());

    // Plugin for the layer visibility panel
    app.add_plugins(VisibilityPanelPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ModelLoader>()
        .init_resource::<ModelMaterial>()
        .init_resource::<PointCloudMaterial>()
        .init_resource::<PointCloudPalette>()
        .init_resource::<LayerRegistry>()
        .init_resource::<ViewportSize>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading, init_viewport_size).chain())
        .add_systems(
            Update,
            resolve_manifest.run_if(in_state(AppState::Configuring)),
        )
        .add_systems(
            OnEnter(AppState::Streaming),
            (
                apply_manifest_to_camera,
                start_model_load,
                start_point_cloud_queue,
            ),
        )
        .add_systems(
            Update,
            (attach_model_when_ready, advance_point_cloud_queue)
                .run_if(in_state(AppState::Streaming)),
        );

    // Runtime systems, active from the first frame
    app.add_systems(PreUpdate, (cap_pixel_ratio, handle_viewport_resize).chain())
        .add_systems(
            Update,
            (orbit_camera_input, update_orbit_camera)
                .chain()
                .after(update_pointer_capture),
        );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system for the static scene
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_dashboard_camera(&mut commands);
    spawn_lighting(&mut commands);
    create_ground_grid(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        FpsText,
        Name::new("FpsOverlay"),
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
