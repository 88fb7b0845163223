//! The process-wide tile metadata resource.

use std::sync::Arc;

use bevy::prelude::*;
use entity_tiles_assets::prelude::{TileMetadataTable, TileRecord};

use crate::gid::TileGid;

/// Currently installed entity tileset metadata.
///
/// Inserted by `sync_tile_metadata` once the tileset asset is available.
/// Systems read it with `Res<TileMetadata>`; code that must survive a hot
/// reload unchanged (e.g. a level being decoded over several frames) should
/// hold on to [`TileMetadata::table`] instead.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use entity_tiles_core::prelude::*;
/// fn find_players(metadata: Res<TileMetadata>) {
///     for gid in [9u32, 10, 11] {
///         if let Some(record) = metadata.lookup_gid(gid) {
///             info!("gid {gid} is a {}", record.kind);
///         }
///     }
/// }
/// ```
#[derive(Resource, Debug, Clone)]
pub struct TileMetadata {
    table: Arc<TileMetadataTable>,
    first_gid: u32,
    revision: u32,
}

impl TileMetadata {
    pub fn new(table: Arc<TileMetadataTable>, first_gid: u32) -> Self {
        Self {
            table,
            first_gid,
            revision: 1,
        }
    }

    /// Snapshot of the current table.
    pub fn table(&self) -> Arc<TileMetadataTable> {
        Arc::clone(&self.table)
    }

    pub fn first_gid(&self) -> u32 {
        self.first_gid
    }

    /// Bumped on every [`replace`](Self::replace). Starts at 1.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Look up by local tile id. `None` means a plain tile.
    pub fn lookup(&self, id: u32) -> Option<&TileRecord> {
        self.table.lookup(id)
    }

    /// Look up by raw map GID, ignoring flip flags.
    ///
    /// Empty cells and GIDs from other tilesets give `None`.
    pub fn lookup_gid(&self, raw_gid: u32) -> Option<&TileRecord> {
        let local = self.local_id(raw_gid)?;
        self.table.lookup(local)
    }

    /// Local id of `raw_gid` if it falls inside this tileset.
    pub fn local_id(&self, raw_gid: u32) -> Option<u32> {
        let local = TileGid::from_raw(raw_gid).local_id(self.first_gid)?;
        let tile_count = self.table.info().tile_count;
        (tile_count == 0 || local < tile_count).then_some(local)
    }

    /// Swap in a freshly loaded table.
    ///
    /// The old table is never touched; readers holding a snapshot keep seeing
    /// it until they drop their `Arc`.
    pub fn replace(&mut self, table: Arc<TileMetadataTable>) {
        self.table = table;
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_tiles_assets::prelude::TileKind;

    use crate::gid::FLIPPED_HORIZONTALLY;

    fn table(name: &str) -> Arc<TileMetadataTable> {
        let source = format!(
            r#"<tileset name="t" tilewidth="32" tileheight="32" tilecount="8" columns="4">
 <tile id="2"><properties><property name="name" value="{name}"/></properties></tile>
</tileset>"#
        );
        Arc::new(TileMetadataTable::load(&source).unwrap())
    }

    #[test]
    fn test_lookup_gid_offsets_by_first_gid() {
        let metadata = TileMetadata::new(table("exit"), 65);
        assert_eq!(metadata.lookup_gid(67).map(|r| r.id), Some(2));
        assert_eq!(
            metadata.lookup_gid(67 | FLIPPED_HORIZONTALLY).map(|r| r.id),
            Some(2)
        );
        assert!(metadata.lookup_gid(66).is_none());
        assert!(metadata.lookup_gid(0).is_none());
        assert!(metadata.lookup_gid(3).is_none());
    }

    #[test]
    fn test_gid_past_tileset_is_foreign() {
        let metadata = TileMetadata::new(table("exit"), 1);
        assert_eq!(metadata.local_id(8), Some(7));
        assert_eq!(metadata.local_id(9), None);
    }

    #[test]
    fn test_replace_keeps_old_snapshots() {
        let mut metadata = TileMetadata::new(table("exit"), 1);
        let before = metadata.table();
        assert_eq!(metadata.revision(), 1);

        metadata.replace(table("portal"));

        assert_eq!(metadata.revision(), 2);
        assert_eq!(metadata.lookup(2).map(|r| &r.kind), Some(&TileKind::Portal));
        assert_eq!(before.lookup(2).map(|r| &r.kind), Some(&TileKind::Exit));
    }
}
