//! # entity_tiles
//!
//! Gameplay metadata for Tiled entity tilesets, with Bevy integration.
//!
//! This is a meta-crate that combines the `entity_tiles_*` sub-crates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use entity_tiles::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins((MinimalPlugins, AssetPlugin::default()))
//!         .add_plugins(EntityTilesPlugin::default())
//!         .add_systems(Update, report_boosts)
//!         .run();
//! }
//!
//! fn report_boosts(metadata: Option<Res<TileMetadata>>) {
//!     let Some(metadata) = metadata else { return };
//!     for boost in metadata.table().tiles_of_kind(&TileKind::Boost) {
//!         info!("boost {} power {:?}", boost.id, boost.power);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Layer 1** ([`assets`]): `.tsx` parsing into an immutable
//!   [`TileMetadataTable`](assets::TileMetadataTable), plus the Bevy asset loader
//! - **Layer 2** ([`core`]): the `TileMetadata` resource, GID lookup, hot reload
//!
//! The table itself has no Bevy dependency at runtime and can be used directly:
//!
//! ```rust
//! use entity_tiles::assets::TileMetadataTable;
//!
//! let table = TileMetadataTable::load(
//!     r#"<tileset name="t" tilewidth="8" tileheight="8" tilecount="1" columns="1"/>"#,
//! ).unwrap();
//! assert!(table.lookup(0).is_none());
//! ```

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use entity_tiles_assets as assets;
pub use entity_tiles_core as core;
pub use tiled;

/// Unified prelude for entity_tiles
pub mod prelude {
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    pub use crate::plugin::EntityTilesPlugin;
}
