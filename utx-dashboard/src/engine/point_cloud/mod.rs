//! Point clouds built from survey coordinate tables.
//!
//! Conversion is pure and works on raw rows; layer creation turns the
//! resulting buffers into a scaled, labelled mesh entity.

/// Row validation, axis remapping and per-cloud colour assignment.
pub mod conversion;

/// Mesh creation, entity spawning and panel labels.
pub mod layer;
