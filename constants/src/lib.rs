pub mod coordinate_system;
pub mod panel;
pub mod path;
pub mod render_settings;
