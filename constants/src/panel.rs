use bevy::color::Color;

pub const PANEL_OPEN_WIDTH: f32 = 260.0;
pub const PANEL_CLOSED_WIDTH: f32 = 32.0;

pub const MODELS_SECTION_TITLE: &str = "Models";
pub const POINT_CLOUDS_SECTION_TITLE: &str = "Point Clouds";

pub const PANEL_BACKGROUND: Color = Color::srgb(0.10, 0.11, 0.13);
pub const HEADER_BACKGROUND: Color = Color::srgb(0.14, 0.16, 0.20);
pub const BODY_BACKGROUND: Color = Color::srgb(0.12, 0.13, 0.15);
pub const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
pub const TEXT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const MUTED_TEXT_COLOUR: Color = Color::srgb(0.62, 0.65, 0.70);
