//! # `entity_tiles_core`
//!
//! Runtime access to entity tile metadata for Bevy apps.
//!
//! Sits on top of `entity_tiles_assets` (Layer 1, parsing) and provides:
//!
//! 1. **`TileMetadata` resource**: the current table, looked up by local id or
//!    by raw map GID
//! 2. **Hot reload**: a changed `.tsx` swaps the whole table; snapshots taken
//!    earlier stay valid
//! 3. **Events**: `TileMetadataReady` / `TileMetadataLoadFailed` for observers
//!
//! **This crate does NOT spawn entities or render anything.** What a `boost`
//! or a `portal` does is up to the game.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use entity_tiles_assets::EntityTilesAssetsPlugin;
//! use entity_tiles_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins((MinimalPlugins, AssetPlugin::default()))
//!         .add_plugins(EntityTilesAssetsPlugin)
//!         .add_plugins(EntityTilesCorePlugin::default())
//!         .add_observer(|event: On<TileMetadataReady>| {
//!             info!("{} entity tiles ready", event.tile_count);
//!         })
//!         .run();
//! }
//! ```

pub mod events;
pub mod gid;
pub mod metadata;
pub mod plugin;
pub mod systems;

pub mod prelude {
    //! Common imports for `entity_tiles_core` users.

    pub use crate::events::{TileMetadataLoadFailed, TileMetadataReady};
    pub use crate::gid::TileGid;
    pub use crate::metadata::TileMetadata;
    pub use crate::plugin::{EntityTilesConfig, EntityTilesCorePlugin};
    pub use crate::systems::TileMetadataSource;
}

pub use plugin::{EntityTilesConfig, EntityTilesCorePlugin};
