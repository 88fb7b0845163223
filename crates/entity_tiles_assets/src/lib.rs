//! # `entity_tiles_assets`
//!
//! Parsing and validation of Tiled entity tilesets (`.tsx`).
//!
//! An entity tileset tags atlas cells with gameplay metadata: a category
//! (`name`), an optional `direction`, `parity` and `power`. This crate turns
//! those loosely-typed property lists into a [`TileMetadataTable`] of strongly
//! typed [`TileRecord`]s, rejecting anything it doesn't recognize at load time.
//!
//! ## Architecture
//!
//! - **Pure layer** ([`table`], [`record`], [`properties`]): no ECS, usable
//!   from any engine or tool.
//! - **Bevy layer** ([`assets`], [`loaders`], [`plugin`]): `.tsx` files as
//!   Bevy assets.
//!
//! ```
//! use entity_tiles_assets::prelude::*;
//!
//! let table = TileMetadataTable::load(r#"
//! <tileset name="entityTiles" tilewidth="32" tileheight="32" tilecount="64" columns="8">
//!  <tile id="8">
//!   <properties>
//!    <property name="direction" type="int" value="1"/>
//!    <property name="name" value="player"/>
//!   </properties>
//!  </tile>
//! </tileset>"#).unwrap();
//!
//! let player = table.lookup(8).unwrap();
//! assert_eq!(player.kind, TileKind::Player);
//! assert_eq!(player.direction.map(Direction::get), Some(1));
//! assert!(table.lookup(2).is_none()); // plain tile
//! ```

pub mod assets;
pub mod error;
pub mod loaders;
pub mod plugin;
pub mod properties;
mod raw;
pub mod record;
pub mod table;
mod tiled_import;

pub mod prelude {
    //! Common imports for `entity_tiles_assets` users.

    pub use crate::assets::tileset::EntityTilesetAsset;
    pub use crate::error::MalformedAssetError;
    pub use crate::loaders::tileset::{EntityTilesetAssetLoader, EntityTilesetLoaderError};
    pub use crate::plugin::EntityTilesAssetsPlugin;
    pub use crate::record::{Direction, Parity, TileKind, TileRecord};
    pub use crate::table::{AtlasImage, TileMetadataTable, TilesetInfo};
}

pub use error::MalformedAssetError;
pub use plugin::EntityTilesAssetsPlugin;
pub use record::{Direction, Parity, TileKind, TileRecord};
pub use table::TileMetadataTable;
