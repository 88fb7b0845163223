//! Unified plugin for entity_tiles.

use bevy::prelude::*;

use entity_tiles_assets::EntityTilesAssetsPlugin;
use entity_tiles_core::{EntityTilesConfig, EntityTilesCorePlugin};

/// Unified plugin that adds tileset loading and the runtime metadata resource.
///
/// This plugin automatically includes:
/// - Asset loading ([`EntityTilesAssetsPlugin`])
/// - Runtime metadata ([`EntityTilesCorePlugin`])
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use entity_tiles::prelude::*;
///
/// App::new()
///     .add_plugins((MinimalPlugins, AssetPlugin::default()))
///     .add_plugins(EntityTilesPlugin::default().with_config(EntityTilesConfig {
///         tileset_path: "maps/entityTiles.tsx".into(),
///         first_gid: 65,
///         hot_reload: false,
///     }))
///     .run();
/// ```
#[derive(Default)]
pub struct EntityTilesPlugin {
    pub config: EntityTilesConfig,
}

impl EntityTilesPlugin {
    /// Create with custom configuration
    pub fn with_config(mut self, config: EntityTilesConfig) -> Self {
        self.config = config;
        self
    }
}

impl Plugin for EntityTilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EntityTilesAssetsPlugin);
        app.add_plugins(EntityTilesCorePlugin::new(self.config.clone()));

        info!("EntityTilesPlugin initialized ({})", self.config.tileset_path);
    }
}
