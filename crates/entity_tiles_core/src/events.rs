//! Lifecycle events for the tile metadata resource.
//!
//! Both are triggered globally, so listen with an observer:
//!
//! ```ignore
//! app.add_observer(|event: On<TileMetadataReady>| {
//!     info!("entity tiles ready (revision {})", event.revision);
//! });
//! ```

use bevy::prelude::*;

/// Fired when a table is installed or swapped in by a hot reload.
#[derive(Event, Debug, Clone)]
pub struct TileMetadataReady {
    /// Matches `TileMetadata::revision` after the swap
    pub revision: u32,
    /// Tiles carrying metadata in the new table
    pub tile_count: usize,
}

/// Fired once when the tileset asset fails to load.
///
/// Any table installed earlier stays in place.
#[derive(Event, Debug, Clone)]
pub struct TileMetadataLoadFailed {
    /// Asset path that failed
    pub path: String,
    /// Loader error, rendered
    pub error: String,
}
