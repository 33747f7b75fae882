//! Static scene furniture and viewport tracking.
//!
//! Everything here is created once at startup and lives for the session;
//! only the viewport size changes afterwards.

/// Flat reference grid under the map.
pub mod grid;

/// Ambient and directional lighting.
pub mod lighting;

/// Canvas size tracking, pixel ratio cap and camera aspect updates.
pub mod viewport;
