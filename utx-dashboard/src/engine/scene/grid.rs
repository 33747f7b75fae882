//! Flat reference grid under the map.
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::render_settings::{GRID_COLOUR, GRID_DIVISIONS, GRID_OFFSET, GRID_SIZE};

#[derive(Component)]
pub struct GroundGrid;

/// Line endpoints for a square grid on the XZ plane, centred on the origin.
/// `divisions` cells per side gives `divisions + 1` lines in each direction.
pub fn grid_line_positions(size: f32, divisions: u32) -> Vec<[f32; 3]> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;
    let mut vertices = Vec::with_capacity((divisions as usize + 1) * 4);

    for i in 0..=divisions {
        let offset = -half + i as f32 * step;

        // Line running along Z, fixed X
        vertices.push([offset, 0.0, -half]);
        vertices.push([offset, 0.0, half]);

        // Line running along X, fixed Z
        vertices.push([-half, 0.0, offset]);
        vertices.push([half, 0.0, offset]);
    }

    vertices
}

pub fn create_grid_mesh(size: f32, divisions: u32) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, grid_line_positions(size, divisions));
    mesh
}

pub fn create_ground_grid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let grid_material = materials.add(StandardMaterial {
        base_color: GRID_COLOUR,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(create_grid_mesh(GRID_SIZE, GRID_DIVISIONS))),
        MeshMaterial3d(grid_material),
        Transform::from_translation(GRID_OFFSET),
        Visibility::Visible,
        GroundGrid,
        Name::new("GroundGrid"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_division_grid_is_a_square_outline() {
        let vertices = grid_line_positions(400.0, 1);

        assert_eq!(vertices.len(), 8);
        for [x, y, z] in &vertices {
            assert_eq!(*y, 0.0);
            assert!(x.abs() == 200.0 || z.abs() == 200.0);
        }
    }

    #[test]
    fn line_count_follows_divisions() {
        // 11 lines per direction, two endpoints each
        assert_eq!(grid_line_positions(10.0, 10).len(), 11 * 2 * 2);
    }

    #[test]
    fn zero_divisions_falls_back_to_one() {
        assert_eq!(grid_line_positions(4.0, 0), grid_line_positions(4.0, 1));
    }
}
