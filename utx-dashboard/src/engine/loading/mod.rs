//! Asset loading systems for the dashboard scene.
//!
//! Resolves the optional manifest first, then loads the map model and walks
//! the point cloud tables one at a time, tracking progress as layers appear.

/// Optional dashboard manifest resolution.
///
/// Falls back to built-in defaults when the manifest is missing or invalid.
pub mod manifest_loader;

/// Map model loading and material override.
pub mod model_loader;

/// Sequential point cloud table loading.
///
/// Requests one table at a time and installs each as a toggleable layer.
pub mod point_cloud_queue;

/// Loading progress tracking resource.
pub mod progress;

#[cfg(test)]
pub(crate) mod test_app;
