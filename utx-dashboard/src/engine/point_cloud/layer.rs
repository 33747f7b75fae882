use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;

use super::conversion::PointCloudGeometry;
use crate::engine::layers::{LayerRegistry, LayerSection};

/// Marks an entity spawned from one coordinate table.
#[derive(Component, Debug, Clone)]
pub struct PointCloudLayer {
    pub source: String,
    pub point_count: usize,
}

/// Unlit material shared by every point cloud; per-point colour comes
/// from the mesh's vertex colours.
#[derive(Resource, Clone)]
pub struct PointCloudMaterial(pub Handle<StandardMaterial>);

impl FromWorld for PointCloudMaterial {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        Self(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        }))
    }
}

/// Panel label for a source path: its trailing segment.
pub fn layer_label(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}

/// Point-list mesh with one position and one RGBA colour per point.
pub fn create_point_cloud_mesh(geometry: &PointCloudGeometry) -> Mesh {
    let colors: Vec<[f32; 4]> = geometry
        .colors
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2], 1.0])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, geometry.points());
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);

    mesh
}

/// Add a converted point cloud to the scene and register its toggle.
pub fn spawn_point_cloud_layer(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &PointCloudMaterial,
    registry: &mut LayerRegistry,
    source: &str,
    geometry: &PointCloudGeometry,
    scale: f32,
) -> Entity {
    let entity = commands
        .spawn((
            Mesh3d(meshes.add(create_point_cloud_mesh(geometry))),
            MeshMaterial3d(material.0.clone()),
            Transform::from_scale(Vec3::splat(scale)),
            Visibility::Inherited,
            Name::new(source.to_string()),
            PointCloudLayer {
                source: source.to_string(),
                point_count: geometry.point_count(),
            },
        ))
        .id();

    registry.register(entity, layer_label(source), LayerSection::PointClouds);

    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::point_cloud::conversion::convert_rows;
    use crate::engine::point_cloud::conversion::tests::{FixedColor, rows};
    use bevy::ecs::system::RunSystemOnce;
    use bevy::render::mesh::VertexAttributeValues;

    fn sample_geometry() -> PointCloudGeometry {
        let input = rows(&[&["1", "2", "3"], &["4", "5", "6"]]);
        convert_rows(&input, &mut FixedColor([0.5, 0.25, 1.0]))
            .geometry
            .unwrap()
    }

    #[test]
    fn label_is_trailing_path_segment() {
        assert_eq!(layer_label("/csv/P1_S2_CHART.csv"), "P1_S2_CHART.csv");
        assert_eq!(layer_label("csv/nested/P3_S4_CHART.csv"), "P3_S4_CHART.csv");
        assert_eq!(layer_label("plain.csv"), "plain.csv");
    }

    #[test]
    fn mesh_carries_positions_and_rgba_colours() {
        let mesh = create_point_cloud_mesh(&sample_geometry());

        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::PointList);
        assert_eq!(mesh.count_vertices(), 2);

        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("colour attribute missing");
        };
        assert_eq!(colors, &vec![[0.5, 0.25, 1.0, 1.0]; 2]);
    }

    #[test]
    fn spawned_layer_is_scaled_named_and_registered() {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<LayerRegistry>();
        world.init_resource::<PointCloudMaterial>();

        let geometry = sample_geometry();
        let entity = world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      material: Res<PointCloudMaterial>,
                      mut registry: ResMut<LayerRegistry>| {
                    spawn_point_cloud_layer(
                        &mut commands,
                        &mut meshes,
                        &material,
                        &mut registry,
                        "csv/P2_S3_CHART.csv",
                        &geometry,
                        0.01,
                    )
                },
            )
            .unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.scale, Vec3::splat(0.01));
        assert_eq!(world.get::<Name>(entity).unwrap().as_str(), "csv/P2_S3_CHART.csv");
        assert_eq!(world.get::<PointCloudLayer>(entity).unwrap().point_count, 2);

        let registry = world.resource::<LayerRegistry>();
        assert_eq!(registry.len(), 1);
        let layer = &registry.layers()[0];
        assert_eq!(layer.target, entity);
        assert_eq!(layer.label, "P2_S3_CHART.csv");
        assert_eq!(layer.section, LayerSection::PointClouds);
    }
}
