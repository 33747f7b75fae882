//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loaders, scene setup, loading systems
/// and the visibility panel.
pub mod app_setup;

/// Application state machine.
///
/// Moves from manifest resolution to streaming model and point cloud layers.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
