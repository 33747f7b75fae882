use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::MANIFEST_PATH;

use crate::engine::assets::dashboard_manifest::DashboardManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<DashboardManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading dashboard manifest from: {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Install the manifest as a resource once it resolves, falling back to the
/// built-in layer list when it cannot be loaded, then start streaming.
pub fn resolve_manifest(
    manifest_loader: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<DashboardManifest>>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
    mut commands: Commands,
) {
    if loading_progress.manifest_resolved {
        return;
    }

    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => {
            let Some(manifest) = manifests.get(handle) else {
                return;
            };
            info!(
                "Dashboard manifest loaded: {} point cloud files",
                manifest.point_cloud_paths.len()
            );
            manifest.clone()
        }
        Some(LoadState::Failed(err)) => {
            warn!("Dashboard manifest unavailable ({err}); using built-in layer list");
            DashboardManifest::default()
        }
        _ => return,
    };

    commands.insert_resource(manifest);
    loading_progress.manifest_resolved = true;
    next_state.set(AppState::Streaming);
}
