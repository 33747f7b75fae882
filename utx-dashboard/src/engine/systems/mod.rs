//! Runtime diagnostics systems.

/// FPS and layer count overlay for native builds.
pub mod fps_tracking;
