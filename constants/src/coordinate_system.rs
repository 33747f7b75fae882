/// Axis remap matrix (row-major: [x_new, y_new, z_new])
/// Survey Z-up to scene Y-up: X→X, Z→Y, -Y→Z
pub const COORDINATE_TRANSFORM: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0],  // X = X
    [0.0, 0.0, 1.0],  // Y = Z
    [0.0, -1.0, 0.0], // Z = -Y
];

/// Uniform display scale applied to every point cloud layer.
pub const POINT_CLOUD_SCALE: f32 = 0.01;

/// Apply the axis remap to a single survey coordinate.
/// Zero weights are skipped so an infinite input stays on its own axis.
pub fn transform_coordinates(x: f32, y: f32, z: f32) -> [f32; 3] {
    COORDINATE_TRANSFORM.map(|row| {
        row.iter()
            .zip([x, y, z])
            .filter(|(weight, _)| **weight != 0.0)
            .map(|(weight, value)| weight * value)
            .sum::<f32>()
    })
}
