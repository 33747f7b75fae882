use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::path::MODEL_LABEL;
use constants::render_settings::MODEL_COLOUR;

use crate::engine::assets::dashboard_manifest::DashboardManifest;
use crate::engine::layers::{LayerRegistry, LayerSection};
use crate::engine::loading::progress::{LoadingProgress, ModelStatus};

/// Marks the root entity of the map model.
#[derive(Component)]
pub struct ModelLayer;

/// Opaque material forced onto every mesh of the map model.
#[derive(Resource, Clone)]
pub struct ModelMaterial(pub Handle<StandardMaterial>);

impl FromWorld for ModelMaterial {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        Self(materials.add(StandardMaterial {
            base_color: MODEL_COLOUR,
            ..default()
        }))
    }
}

#[derive(Resource, Default)]
pub struct ModelLoader {
    handle: Option<Handle<Scene>>,
    finished: bool,
}

pub fn start_model_load(
    mut model_loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
    manifest: Res<DashboardManifest>,
) {
    info!("Loading model from: {}", manifest.model_path);
    model_loader.handle =
        Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(manifest.model_path.clone())));
}

/// Attach the model once its scene has loaded. A failed load is logged and
/// leaves the scene without a model layer.
pub fn attach_model_when_ready(
    mut model_loader: ResMut<ModelLoader>,
    mut registry: ResMut<LayerRegistry>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifest: Res<DashboardManifest>,
) {
    if model_loader.finished {
        return;
    }

    let Some(handle) = model_loader.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            let entity = commands
                .spawn((
                    SceneRoot(handle),
                    Transform::IDENTITY,
                    Visibility::Inherited,
                    ModelLayer,
                    Name::new(manifest.model_path.clone()),
                ))
                .observe(override_model_materials)
                .id();

            registry.register(entity, MODEL_LABEL, LayerSection::Models);
            loading_progress.model = ModelStatus::Loaded;
            model_loader.finished = true;
        }
        Some(LoadState::Failed(err)) => {
            error!("Failed to load model {}: {}", manifest.model_path, err);
            loading_progress.model = ModelStatus::Failed;
            model_loader.finished = true;
        }
        _ => {}
    }
}

fn override_model_materials(
    trigger: Trigger<SceneInstanceReady>,
    children: Query<&Children>,
    mut mesh_materials: Query<&mut MeshMaterial3d<StandardMaterial>>,
    model_material: Res<ModelMaterial>,
) {
    let replaced = apply_model_material(
        trigger.target(),
        &children,
        &mut mesh_materials,
        &model_material.0,
    );
    info!("Model ready, replaced {} mesh materials", replaced);
}

/// Point every mesh below `root` at `material`. Returns how many were replaced.
pub fn apply_model_material(
    root: Entity,
    children: &Query<&Children>,
    mesh_materials: &mut Query<&mut MeshMaterial3d<StandardMaterial>>,
    material: &Handle<StandardMaterial>,
) -> usize {
    let mut replaced = 0;

    for descendant in children.iter_descendants(root) {
        if let Ok(mut mesh_material) = mesh_materials.get_mut(descendant) {
            mesh_material.0 = material.clone();
            replaced += 1;
        }
    }

    replaced
}
