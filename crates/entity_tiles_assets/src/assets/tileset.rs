use std::sync::Arc;

use bevy::prelude::*;

use crate::table::TileMetadataTable;

/// Bevy asset wrapper for an entity tileset (.tsx file)
///
/// The table sits behind an `Arc` so the runtime layer can hand out snapshots
/// that outlive a hot reload of this asset.
#[derive(TypePath, Asset, Debug)]
pub struct EntityTilesetAsset {
    /// Validated tile metadata
    pub table: Arc<TileMetadataTable>,

    /// Atlas image as an asset-root-relative path
    ///
    /// Resolved against the `.tsx` location. The image itself is not loaded;
    /// rendering is left to the consumer.
    pub atlas_path: Option<String>,
}

impl EntityTilesetAsset {
    /// Wrap a table that was parsed outside the asset server.
    pub fn new(table: TileMetadataTable) -> Self {
        Self {
            table: Arc::new(table),
            atlas_path: None,
        }
    }
}
