use std::collections::VecDeque;

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::coordinate_table::CoordinateTable;
use crate::engine::assets::dashboard_manifest::DashboardManifest;
use crate::engine::layers::LayerRegistry;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::point_cloud::conversion::{ColorSource, RandomColorSource, convert_rows};
use crate::engine::point_cloud::layer::{PointCloudMaterial, spawn_point_cloud_layer};

/// The table currently being fetched.
#[derive(Debug)]
pub struct InFlight {
    pub source: String,
    pub handle: Handle<CoordinateTable>,
}

/// Coordinate tables still to load. At most one is in flight; the next is
/// only requested after the current one has loaded or failed.
#[derive(Resource, Debug, Default)]
pub struct PointCloudQueue {
    pending: VecDeque<String>,
    in_flight: Option<InFlight>,
}

impl PointCloudQueue {
    pub fn new(sources: impl IntoIterator<Item = String>) -> Self {
        Self {
            pending: sources.into_iter().collect(),
            in_flight: None,
        }
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.in_flight.is_none()
    }

    /// Request the next table through `load`, unless one is already in flight.
    /// Returns the source that was requested.
    pub fn request_next(
        &mut self,
        load: impl FnOnce(&str) -> Handle<CoordinateTable>,
    ) -> Option<&str> {
        if self.in_flight.is_some() {
            return None;
        }

        let source = self.pending.pop_front()?;
        let handle = load(&source);
        let in_flight = self.in_flight.insert(InFlight { source, handle });

        Some(in_flight.source.as_str())
    }

    /// Release the current table so the next one can be requested.
    pub fn finish(&mut self) -> Option<InFlight> {
        self.in_flight.take()
    }
}

/// Colour source for newly loaded clouds.
#[derive(Resource)]
pub struct PointCloudPalette(pub Box<dyn ColorSource + Send + Sync>);

impl Default for PointCloudPalette {
    fn default() -> Self {
        Self(Box::new(RandomColorSource))
    }
}

pub fn start_point_cloud_queue(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    manifest: Res<DashboardManifest>,
) {
    loading_progress.point_clouds_total = manifest.point_cloud_paths.len();
    commands.insert_resource(PointCloudQueue::new(manifest.point_cloud_paths.clone()));
}

/// Drive the queue one step per frame: request the next table when idle,
/// otherwise turn the in-flight table into a layer once it resolves.
pub fn advance_point_cloud_queue(
    mut queue: ResMut<PointCloudQueue>,
    mut tables: ResMut<Assets<CoordinateTable>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut registry: ResMut<LayerRegistry>,
    mut palette: ResMut<PointCloudPalette>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    material: Res<PointCloudMaterial>,
    manifest: Res<DashboardManifest>,
    asset_server: Res<AssetServer>,
) {
    let load_state = queue
        .in_flight()
        .map(|current| asset_server.get_load_state(&current.handle));

    match load_state {
        None if queue.is_drained() => {
            if !loading_progress.point_clouds_finished {
                loading_progress.point_clouds_finished = true;
                info!("Point cloud loading finished: {}", loading_progress.summary());
            }
        }
        None => {
            let requested = queue
                .request_next(|source| asset_server.load(source.to_string()))
                .map(str::to_owned);
            if let Some(source) = requested {
                info!(
                    "Loading point cloud from: {} ({} more queued)",
                    source,
                    queue.pending()
                );
            }
        }
        Some(Some(LoadState::Loaded)) => {
            let Some(current) = queue.finish() else {
                return;
            };
            let Some(table) = tables.remove(&current.handle) else {
                error!("Point cloud {} loaded but its table is missing", current.source);
                loading_progress.point_clouds_skipped += 1;
                return;
            };

            let installed = install_point_cloud(
                &mut commands,
                &mut meshes,
                &material,
                &mut registry,
                palette.0.as_mut(),
                &current.source,
                &table,
                manifest.point_scale,
            );
            if installed.is_some() {
                loading_progress.point_clouds_loaded += 1;
            } else {
                loading_progress.point_clouds_skipped += 1;
            }
        }
        Some(Some(LoadState::Failed(err))) => {
            if let Some(current) = queue.finish() {
                error!("Error loading point cloud {}: {}", current.source, err);
            }
            loading_progress.point_clouds_skipped += 1;
        }
        Some(_) => {}
    }
}

/// Convert a loaded table and add it to the scene. Rejected rows are logged
/// as warnings; a table without a single valid row adds nothing.
#[allow(clippy::too_many_arguments)]
pub fn install_point_cloud(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &PointCloudMaterial,
    registry: &mut LayerRegistry,
    colors: &mut dyn ColorSource,
    source: &str,
    table: &CoordinateTable,
    scale: f32,
) -> Option<Entity> {
    if table.is_empty() {
        error!("{}: file contains no rows", source);
        return None;
    }

    let conversion = convert_rows(&table.rows, colors);

    for rejection in &conversion.rejections {
        warn!("{}: {}", source, rejection);
    }

    match conversion.geometry {
        Ok(geometry) => {
            let entity = spawn_point_cloud_layer(
                commands, meshes, material, registry, source, &geometry, scale,
            );
            info!(
                "Point cloud {} ready with {} points ({} of {} rows skipped)",
                source,
                geometry.point_count(),
                conversion.rejections.len(),
                table.len()
            );
            Some(entity)
        }
        Err(err) => {
            error!("{}: {}", source, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::point_cloud::conversion::tests::FixedColor;
    use crate::engine::point_cloud::layer::PointCloudLayer;
    use crate::engine::assets::coordinate_table::CoordinateTableLoader;
    use crate::engine::loading::test_app::{asset_app, update_until};
    use bevy::ecs::system::RunSystemOnce;
    use std::fs;

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn requests_one_table_at_a_time_in_order() {
        let mut queue = PointCloudQueue::new(sources(&["csv/a.csv", "csv/b.csv", "csv/c.csv"]));
        let mut requested = Vec::new();

        let first = queue.request_next(|s| {
            requested.push(s.to_string());
            Handle::default()
        });
        assert_eq!(first, Some("csv/a.csv"));

        // still in flight, nothing else may start
        assert_eq!(queue.request_next(|_| unreachable!()), None);
        assert_eq!(queue.pending(), 2);

        assert_eq!(queue.finish().map(|f| f.source), Some("csv/a.csv".to_string()));
        queue.request_next(|s| {
            requested.push(s.to_string());
            Handle::default()
        });
        queue.finish();
        queue.request_next(|s| {
            requested.push(s.to_string());
            Handle::default()
        });

        assert_eq!(requested, sources(&["csv/a.csv", "csv/b.csv", "csv/c.csv"]));
        assert!(!queue.is_drained());
        queue.finish();
        assert!(queue.is_drained());
    }

    #[test]
    fn failed_table_still_advances_the_queue() {
        let mut queue = PointCloudQueue::new(sources(&["csv/missing.csv", "csv/ok.csv"]));
        queue.request_next(|_| Handle::default());

        // a failure releases the slot exactly like a success
        queue.finish();

        assert_eq!(queue.request_next(|_| Handle::default()), Some("csv/ok.csv"));
    }

    #[test]
    fn empty_queue_requests_nothing() {
        let mut queue = PointCloudQueue::new(Vec::new());

        assert_eq!(queue.request_next(|_| unreachable!()), None);
        assert!(queue.is_drained());
    }

    fn install_into_world(table: CoordinateTable) -> (World, Option<Entity>) {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<LayerRegistry>();
        world.init_resource::<PointCloudMaterial>();

        let installed = world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      material: Res<PointCloudMaterial>,
                      mut registry: ResMut<LayerRegistry>| {
                    install_point_cloud(
                        &mut commands,
                        &mut meshes,
                        &material,
                        &mut registry,
                        &mut FixedColor([0.3, 0.6, 0.9]),
                        "csv/P1_S2_CHART.csv",
                        &table,
                        0.01,
                    )
                },
            )
            .unwrap();

        (world, installed)
    }

    #[test]
    fn table_without_valid_rows_adds_no_layer() {
        let table = CoordinateTable::parse("x,y,z\nbad,1,2\n1,2\n");
        let (mut world, installed) = install_into_world(table);

        assert!(installed.is_none());
        assert!(world.resource::<LayerRegistry>().is_empty());
        let mut layers = world.query::<&PointCloudLayer>();
        assert_eq!(layers.iter(&world).count(), 0);
    }

    #[test]
    fn mixed_table_adds_one_layer_with_valid_rows() {
        let table = CoordinateTable::parse("1.0,2.0,3.0\nbad,2,3\n4,5,6\n");
        let (world, installed) = install_into_world(table);

        let entity = installed.unwrap();
        assert_eq!(world.get::<PointCloudLayer>(entity).unwrap().point_count, 2);
        let registry = world.resource::<LayerRegistry>();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.layers()[0].label, "P1_S2_CHART.csv");
    }

    #[test]
    fn empty_table_adds_no_layer() {
        let (mut world, installed) = install_into_world(CoordinateTable::parse(""));

        assert!(installed.is_none());
        assert!(world.resource::<LayerRegistry>().is_empty());
        let mut layers = world.query::<&PointCloudLayer>();
        assert_eq!(layers.iter(&world).count(), 0);
    }

    fn streaming_app(root: &std::path::Path, names: &[&str]) -> App {
        let mut app = asset_app(root);
        app.init_asset::<CoordinateTable>()
            .init_asset_loader::<CoordinateTableLoader>()
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<LayerRegistry>()
            .init_resource::<LoadingProgress>()
            .init_resource::<PointCloudMaterial>()
            .insert_resource(PointCloudPalette(Box::new(FixedColor([0.3, 0.6, 0.9]))))
            .insert_resource(DashboardManifest::default())
            .insert_resource(PointCloudQueue::new(sources(names)))
            .add_systems(Update, advance_point_cloud_queue);
        app
    }

    #[test]
    fn missing_table_is_skipped_and_the_next_one_loads() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("csv")).unwrap();
        fs::write(dir.path().join("csv/ok.csv"), "1,2,3\nbad,0,0\n4,5,6\n").unwrap();

        let mut app = streaming_app(dir.path(), &["csv/missing.csv", "csv/ok.csv"]);
        let mut requested: Vec<String> = Vec::new();
        update_until(&mut app, |app| {
            let world = app.world();
            if let Some(current) = world.resource::<PointCloudQueue>().in_flight() {
                if requested.last() != Some(&current.source) {
                    requested.push(current.source.clone());
                }
            }
            world.resource::<LoadingProgress>().point_clouds_finished
        });

        assert_eq!(requested, sources(&["csv/missing.csv", "csv/ok.csv"]));

        let progress = app.world().resource::<LoadingProgress>();
        assert_eq!(progress.point_clouds_loaded, 1);
        assert_eq!(progress.point_clouds_skipped, 1);

        let registry = app.world().resource::<LayerRegistry>();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.layers()[0].label, "ok.csv");

        let world = app.world_mut();
        let counts: Vec<_> = world
            .query::<&PointCloudLayer>()
            .iter(world)
            .map(|layer| layer.point_count)
            .collect();
        assert_eq!(counts, vec![2]);
        // the raw table is dropped once its layer exists
        assert_eq!(world.resource::<Assets<CoordinateTable>>().len(), 0);
    }

    #[test]
    fn queue_of_only_missing_tables_still_finishes() {
        let dir = tempfile::tempdir().unwrap();

        let mut app = streaming_app(dir.path(), &["csv/a.csv", "csv/b.csv"]);
        update_until(&mut app, |app| {
            app.world().resource::<LoadingProgress>().point_clouds_finished
        });

        let progress = app.world().resource::<LoadingProgress>();
        assert_eq!(progress.point_clouds_loaded, 0);
        assert_eq!(progress.point_clouds_skipped, 2);
        assert!(app.world().resource::<PointCloudQueue>().is_drained());
        assert!(app.world().resource::<LayerRegistry>().is_empty());
    }

    #[test]
    fn default_palette_produces_unit_colours() {
        let mut palette = PointCloudPalette::default();
        let color = palette.0.next_color();

        assert!(color.iter().all(|c| (0.0..1.0).contains(c)));
    }
}
