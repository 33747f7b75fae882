//! Loadable asset types for the dashboard.
//!
//! Both assets arrive through Bevy's asset server, so the same code path
//! fetches from disk on native builds and over HTTP in the browser.

/// Raw comma-separated coordinate rows and their asset loader.
pub mod coordinate_table;

/// JSON manifest listing the model and point cloud files to load.
pub mod dashboard_manifest;
