use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::core::app_state::FpsText;
use crate::engine::layers::{LayerRegistry, LayerSection};
use crate::engine::loading::progress::LoadingProgress;

pub fn overlay_text(fps: Option<f64>, registry: &LayerRegistry, progress: &LoadingProgress) -> String {
    let fps = match fps {
        Some(value) => format!("FPS: {value:.1}"),
        None => "FPS: -".to_string(),
    };

    format!(
        "{fps}\nPoint clouds: {}/{}\nModels: {}",
        registry.count_in(LayerSection::PointClouds),
        progress.point_clouds_total,
        registry.count_in(LayerSection::Models)
    )
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    registry: Res<LayerRegistry>,
    loading_progress: Res<LoadingProgress>,
    mut last_update: Local<f32>,
    time: Res<Time>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let current_time = time.elapsed_secs();

    // Refresh twice a second
    if current_time - *last_update < 0.5 {
        return;
    }
    *last_update = current_time;

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());

    for mut text in &mut query {
        text.0 = overlay_text(fps, &registry, &loading_progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_reports_fps_and_layers() {
        let mut registry = LayerRegistry::default();
        registry.register(Entity::from_raw(1), "GLTF Model", LayerSection::Models);
        registry.register(Entity::from_raw(2), "P1_S2_CHART.csv", LayerSection::PointClouds);
        let progress = LoadingProgress {
            point_clouds_total: 10,
            ..default()
        };

        assert_eq!(
            overlay_text(Some(59.94), &registry, &progress),
            "FPS: 59.9\nPoint clouds: 1/10\nModels: 1"
        );
    }

    #[test]
    fn missing_fps_sample_shows_placeholder() {
        let text = overlay_text(None, &LayerRegistry::default(), &LoadingProgress::default());

        assert!(text.starts_with("FPS: -"));
    }
}
