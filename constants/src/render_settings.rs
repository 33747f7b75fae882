use bevy::color::Color;
use bevy::math::Vec3;

pub const BACKGROUND_COLOUR: Color = Color::WHITE;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(700.0, 700.0, -350.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.0, -250.0);

/// Upper bound on device pixels per logical pixel.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Fraction of the remaining orbit motion applied per 60 Hz frame.
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_AUTO_ROTATE: bool = true;
/// 2.0 is one revolution every 30 seconds.
pub const ORBIT_AUTO_ROTATE_SPEED: f32 = 0.3;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_RADIUS: f32 = 1.0;
pub const ORBIT_MAX_RADIUS: f32 = 9_000.0;

pub const GRID_SIZE: f32 = 400.0;
pub const GRID_DIVISIONS: u32 = 1;
pub const GRID_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -250.0);
pub const GRID_COLOUR: Color = Color::srgb(0.533, 0.533, 0.533);

pub const AMBIENT_COLOUR: Color = Color::srgb(0.251, 0.251, 0.251);
pub const AMBIENT_BRIGHTNESS: f32 = 1_500.0;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 3_000.0;
/// Light position; the light shines from here towards the origin.
pub const DIRECTIONAL_LIGHT_DIRECTION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

/// Colour forced onto every mesh of the map model.
pub const MODEL_COLOUR: Color = Color::WHITE;
