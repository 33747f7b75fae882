use std::path::Path;
use std::time::Duration;

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;

/// Headless app whose asset server reads from `root`.
pub fn asset_app(root: &Path) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin {
            file_path: root.to_string_lossy().into_owned(),
            meta_check: AssetMetaCheck::Never,
            ..default()
        },
    ));
    app
}

/// Run frames until `done` holds. Asset IO runs on other threads, so each
/// frame yields briefly before checking again.
pub fn update_until(app: &mut App, mut done: impl FnMut(&mut App) -> bool) {
    for _ in 0..1000 {
        app.update();
        if done(app) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("app did not settle within 1000 frames");
}
