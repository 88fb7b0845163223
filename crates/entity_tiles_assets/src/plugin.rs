use bevy::prelude::*;

use crate::assets::tileset::EntityTilesetAsset;
use crate::loaders::tileset::EntityTilesetAssetLoader;

/// Plugin that registers the entity tileset asset type and its loader
///
/// This plugin enables loading `.tsx` entity tilesets as Bevy assets.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use entity_tiles_assets::EntityTilesAssetsPlugin;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(AssetPlugin::default())
///     .add_plugins(EntityTilesAssetsPlugin)
///     .run();
/// ```
///
/// This is a **Layer 1** plugin: parsing and validation only. Keeping the
/// current table available to systems is `entity_tiles_core`'s job.
pub struct EntityTilesAssetsPlugin;

impl Plugin for EntityTilesAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<EntityTilesetAsset>()
            .register_asset_loader(EntityTilesetAssetLoader);
    }
}
