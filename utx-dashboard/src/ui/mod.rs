//! Screen-space user interface.

/// Collapsible layer visibility panel with "Models" and "Point Clouds" sections.
pub mod visibility_panel;
