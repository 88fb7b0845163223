//! Plugin for `entity_tiles_core`.

use bevy::prelude::*;

use crate::systems::{request_tileset_load, sync_tile_metadata};

/// Configuration for `EntityTilesCorePlugin`.
///
/// Stored as a resource so systems can read it.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use entity_tiles_core::{EntityTilesConfig, EntityTilesCorePlugin};
///
/// App::new()
///     .add_plugins(EntityTilesCorePlugin::new(EntityTilesConfig {
///         tileset_path: "levels/entities.tsx".into(),
///         first_gid: 65,
///         ..default()
///     }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct EntityTilesConfig {
    /// Asset path of the entity tileset.
    pub tileset_path: String,

    /// First GID of the entity tileset in the maps that use it.
    ///
    /// Used by `TileMetadata::lookup_gid`.
    pub first_gid: u32,

    /// Swap in the new table when the `.tsx` changes on disk.
    ///
    /// Needs Bevy's `file_watcher` feature to see changes at all.
    pub hot_reload: bool,
}

impl Default for EntityTilesConfig {
    fn default() -> Self {
        Self {
            tileset_path: "maps/entityTiles.tsx".to_string(),
            first_gid: 1,
            hot_reload: true,
        }
    }
}

/// Plugin that keeps `TileMetadata` loaded and current.
///
/// Add this plugin after `EntityTilesAssetsPlugin`.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use entity_tiles_assets::EntityTilesAssetsPlugin;
/// use entity_tiles_core::EntityTilesCorePlugin;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(AssetPlugin::default())
///     .add_plugins(EntityTilesAssetsPlugin)
///     .add_plugins(EntityTilesCorePlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct EntityTilesCorePlugin {
    config: EntityTilesConfig,
}

impl EntityTilesCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: EntityTilesConfig) -> Self {
        Self { config }
    }
}

impl Plugin for EntityTilesCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        app.add_systems(Startup, request_tileset_load);

        // Before user systems, so a swapped table is visible the same frame
        app.add_systems(PreUpdate, sync_tile_metadata);
    }
}
