use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub manifest_resolved: bool,
    pub model: ModelStatus,
    pub point_clouds_total: usize,
    pub point_clouds_loaded: usize,
    pub point_clouds_skipped: usize,
    pub point_clouds_finished: bool,
}

impl LoadingProgress {
    pub fn point_clouds_done(&self) -> usize {
        self.point_clouds_loaded + self.point_clouds_skipped
    }

    pub fn summary(&self) -> String {
        format!(
            "{}/{} point clouds done ({} loaded, {} skipped), model {:?}",
            self.point_clouds_done(),
            self.point_clouds_total,
            self.point_clouds_loaded,
            self.point_clouds_skipped,
            self.model
        )
    }
}
