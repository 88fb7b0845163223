//! Systems that keep [`TileMetadata`] in step with the tileset asset.

use bevy::asset::LoadState;
use bevy::prelude::*;
use entity_tiles_assets::prelude::EntityTilesetAsset;

use crate::events::{TileMetadataLoadFailed, TileMetadataReady};
use crate::metadata::TileMetadata;
use crate::plugin::EntityTilesConfig;

/// The tileset asset whose table backs [`TileMetadata`].
///
/// Inserted at startup from [`EntityTilesConfig::tileset_path`]. Insert it
/// yourself before the first update to track a different handle.
#[derive(Resource, Debug, Clone)]
pub struct TileMetadataSource {
    pub handle: Handle<EntityTilesetAsset>,
    failure_reported: bool,
}

impl TileMetadataSource {
    pub fn new(handle: Handle<EntityTilesetAsset>) -> Self {
        Self {
            handle,
            failure_reported: false,
        }
    }
}

/// Startup system: start loading the configured tileset.
pub fn request_tileset_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<EntityTilesConfig>,
    existing: Option<Res<TileMetadataSource>>,
) {
    if existing.is_some() {
        debug!("TileMetadataSource already present, not loading {}", config.tileset_path);
        return;
    }

    info!("Loading entity tileset {}", config.tileset_path);
    let handle = asset_server.load(config.tileset_path.clone());
    commands.insert_resource(TileMetadataSource::new(handle));
}

/// Install the table once it is loaded, and swap it on hot reload.
///
/// Runs in `PreUpdate`. A swap replaces the `Arc` held by [`TileMetadata`];
/// the previous table is left untouched for readers still holding it.
pub fn sync_tile_metadata(
    mut commands: Commands,
    mut asset_events: MessageReader<AssetEvent<EntityTilesetAsset>>,
    assets: Res<Assets<EntityTilesetAsset>>,
    asset_server: Res<AssetServer>,
    config: Res<EntityTilesConfig>,
    source: Option<ResMut<TileMetadataSource>>,
    metadata: Option<ResMut<TileMetadata>>,
) {
    let Some(mut source) = source else {
        asset_events.clear();
        return;
    };
    let id = source.handle.id();

    let mut modified = false;
    for event in asset_events.read() {
        if event.is_modified(id) {
            modified = true;
        } else if let AssetEvent::Modified { id: other } = event {
            warn!("Ignoring reload of untracked entity tileset {:?}", other);
        }
    }

    match metadata {
        None => {
            if let Some(asset) = assets.get(id) {
                let installed = TileMetadata::new(asset.table.clone(), config.first_gid);
                info!(
                    "Entity tile metadata installed: {} tiles (first gid {})",
                    asset.table.len(),
                    config.first_gid
                );
                commands.trigger(TileMetadataReady {
                    revision: installed.revision(),
                    tile_count: asset.table.len(),
                });
                commands.insert_resource(installed);
                source.failure_reported = false;
                return;
            }
        }
        Some(mut metadata) if modified => {
            if !config.hot_reload {
                warn!("Entity tileset changed on disk but hot reload is disabled");
            } else if let Some(asset) = assets.get(id) {
                metadata.replace(asset.table.clone());
                info!(
                    "Entity tile metadata reloaded: revision {}, {} tiles",
                    metadata.revision(),
                    asset.table.len()
                );
                commands.trigger(TileMetadataReady {
                    revision: metadata.revision(),
                    tile_count: asset.table.len(),
                });
                source.failure_reported = false;
                return;
            }
        }
        Some(_) => {}
    }

    if source.failure_reported {
        return;
    }
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(id) {
        source.failure_reported = true;
        let path = asset_server
            .get_path(id)
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| config.tileset_path.clone());
        error!("Failed to load entity tileset {}: {}", path, err);
        commands.trigger(TileMetadataLoadFailed {
            path,
            error: err.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use entity_tiles_assets::prelude::*;

    use crate::plugin::EntityTilesCorePlugin;

    const FIXTURE: &str = include_str!("../../entity_tiles_assets/fixtures/entity_tiles.tsx");

    #[derive(Resource, Default)]
    struct ReadyRevisions(Vec<u32>);

    #[derive(Resource, Default)]
    struct LoadFailures(Vec<String>);

    fn app_with_config(config: EntityTilesConfig, asset_plugin: AssetPlugin) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, asset_plugin, EntityTilesAssetsPlugin))
            .add_plugins(EntityTilesCorePlugin::new(config))
            .init_resource::<ReadyRevisions>()
            .init_resource::<LoadFailures>()
            .add_observer(
                |event: On<TileMetadataReady>, mut seen: ResMut<ReadyRevisions>| {
                    seen.0.push(event.revision);
                },
            )
            .add_observer(
                |event: On<TileMetadataLoadFailed>, mut seen: ResMut<LoadFailures>| {
                    seen.0.push(event.path.clone());
                },
            );
        app
    }

    fn app_with_fixture(config: EntityTilesConfig) -> App {
        let mut app = app_with_config(config, AssetPlugin::default());
        let table = TileMetadataTable::load(FIXTURE).unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<EntityTilesetAsset>>()
            .add(EntityTilesetAsset::new(table));
        app.insert_resource(TileMetadataSource::new(handle));
        app
    }

    /// Overwrite the tracked asset in place, which queues `AssetEvent::Modified`.
    fn edit_tracked_asset(app: &mut App) {
        let replacement = TileMetadataTable::load(
            r#"<tileset name="edited" tilewidth="32" tileheight="32" tilecount="64" columns="8">
 <tile id="8"><properties><property name="name" value="exit"/></properties></tile>
</tileset>"#,
        )
        .unwrap();
        let id = app.world().resource::<TileMetadataSource>().handle.id();
        app.world_mut()
            .resource_mut::<Assets<EntityTilesetAsset>>()
            .insert(id, EntityTilesetAsset::new(replacement))
            .unwrap();
    }

    /// App loading `file` from this crate's fixtures through the asset server.
    fn app_loading_fixture_file(file: &str) -> App {
        app_with_config(
            EntityTilesConfig {
                tileset_path: file.to_string(),
                ..default()
            },
            AssetPlugin {
                file_path: concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures").to_string(),
                ..default()
            },
        )
    }

    fn update_until_failure(app: &mut App) {
        for _ in 0..500 {
            app.update();
            if !app.world().resource::<LoadFailures>().0.is_empty() {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("tileset load never failed");
    }

    #[test]
    fn test_table_installed_from_assets() {
        let mut app = app_with_fixture(EntityTilesConfig::default());
        app.update();

        let metadata = app.world().resource::<TileMetadata>();
        assert_eq!(metadata.revision(), 1);
        assert_eq!(metadata.first_gid(), 1);
        // GID 9 is local tile 8: the first player.
        let player = metadata.lookup_gid(9).unwrap();
        assert_eq!(player.kind, TileKind::Player);
        assert!(metadata.lookup_gid(3).is_none());

        assert_eq!(app.world().resource::<ReadyRevisions>().0, vec![1]);
    }

    #[test]
    fn test_install_happens_once() {
        let mut app = app_with_fixture(EntityTilesConfig::default());
        app.update();
        app.update();
        app.update();

        assert_eq!(app.world().resource::<TileMetadata>().revision(), 1);
        assert_eq!(app.world().resource::<ReadyRevisions>().0, vec![1]);
    }

    #[test]
    fn test_nothing_installed_without_source() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), EntityTilesAssetsPlugin))
            .add_systems(PreUpdate, sync_tile_metadata)
            .insert_resource(EntityTilesConfig::default());
        app.update();

        assert!(app.world().get_resource::<TileMetadata>().is_none());
    }

    #[test]
    fn test_modified_asset_is_swapped_in() {
        let mut app = app_with_fixture(EntityTilesConfig::default());
        app.update();
        let before = app.world().resource::<TileMetadata>().table();

        edit_tracked_asset(&mut app);
        for _ in 0..3 {
            app.update();
        }

        let metadata = app.world().resource::<TileMetadata>();
        assert_eq!(metadata.revision(), 2);
        assert_eq!(metadata.lookup(8).map(|r| &r.kind), Some(&TileKind::Exit));
        assert_eq!(metadata.table().info().name, "edited");
        // Snapshots taken before the swap are untouched.
        assert_eq!(before.lookup(8).map(|r| &r.kind), Some(&TileKind::Player));
        assert_eq!(app.world().resource::<ReadyRevisions>().0, vec![1, 2]);
    }

    #[test]
    fn test_modified_asset_ignored_without_hot_reload() {
        let mut app = app_with_fixture(EntityTilesConfig {
            hot_reload: false,
            ..default()
        });
        app.update();

        edit_tracked_asset(&mut app);
        for _ in 0..3 {
            app.update();
        }

        let metadata = app.world().resource::<TileMetadata>();
        assert_eq!(metadata.revision(), 1);
        assert_eq!(metadata.lookup(8).map(|r| &r.kind), Some(&TileKind::Player));
        assert_eq!(app.world().resource::<ReadyRevisions>().0, vec![1]);
    }

    #[test]
    fn test_load_failure_reported_once() {
        let mut app = app_loading_fixture_file("duplicate_tile.tsx");
        update_until_failure(&mut app);
        for _ in 0..5 {
            app.update();
        }

        let failures = &app.world().resource::<LoadFailures>().0;
        assert_eq!(failures.len(), 1);
        assert!(failures[0].ends_with("duplicate_tile.tsx"));
        assert!(app.world().resource::<TileMetadataSource>().failure_reported);
        assert!(app.world().get_resource::<TileMetadata>().is_none());
        assert!(app.world().resource::<ReadyRevisions>().0.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_installed_table() {
        let mut app = app_loading_fixture_file("duplicate_tile.tsx");
        let table = TileMetadataTable::load(FIXTURE).unwrap();
        app.insert_resource(TileMetadata::new(std::sync::Arc::new(table), 1));
        update_until_failure(&mut app);

        let metadata = app.world().resource::<TileMetadata>();
        assert_eq!(metadata.revision(), 1);
        assert_eq!(metadata.lookup(8).map(|r| &r.kind), Some(&TileKind::Player));
        assert_eq!(metadata.lookup(4).map(|r| &r.kind), Some(&TileKind::Boost));
        assert_eq!(app.world().resource::<LoadFailures>().0.len(), 1);
    }
}
