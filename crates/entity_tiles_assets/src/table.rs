//! The tile metadata table.
//!
//! A [`TileMetadataTable`] is built once from a `.tsx` descriptor and never
//! changes afterwards, so it can be shared behind an `Arc` by any number of
//! readers. Hot reloading replaces the whole table (see
//! `entity_tiles_core::TileMetadata::replace`).

use std::collections::{HashMap, HashSet};

use bevy::log::debug;
use bevy::math::URect;
use serde::Serialize;

use crate::error::MalformedAssetError;
use crate::properties::{TilePropertyValue, TileRecordBuilder};
use crate::raw::{RawImage, RawProperties, RawProperty, RawTile, RawTileset};
use crate::record::{Direction, Parity, TileKind, TileRecord};

/// Header of the tileset descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TilesetInfo {
    pub name: String,
    /// Tile size in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    /// Number of cells in the atlas. Zero when the descriptor omits it.
    pub tile_count: u32,
    /// Atlas columns. Zero for image-collection tilesets.
    pub columns: u32,
    pub spacing: u32,
    pub margin: u32,
    pub image: Option<AtlasImage>,
}

/// The atlas image reference, as written in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    /// Path relative to the `.tsx` file.
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Immutable lookup from local tile id to [`TileRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMetadataTable {
    info: TilesetInfo,
    tiles: HashMap<u32, TileRecord>,
    /// Parity partner of each tile that has exactly one.
    counterparts: HashMap<u32, u32>,
}

impl TileMetadataTable {
    /// Parse a `.tsx` document.
    ///
    /// # Errors
    ///
    /// Any schema violation (unknown property key, out-of-range `direction` or
    /// `parity`, duplicate tile id, ...) fails the whole load.
    ///
    /// # Example
    ///
    /// ```
    /// use entity_tiles_assets::prelude::*;
    ///
    /// let table = TileMetadataTable::load(r#"
    ///     <tileset name="t" tilewidth="32" tileheight="32" tilecount="4" columns="2">
    ///       <tile id="1">
    ///         <properties><property name="name" value="exit"/></properties>
    ///       </tile>
    ///     </tileset>"#).unwrap();
    ///
    /// assert_eq!(table.lookup(1).map(|t| &t.kind), Some(&TileKind::Exit));
    /// assert!(table.lookup(0).is_none());
    /// ```
    pub fn load(source: &str) -> Result<Self, MalformedAssetError> {
        let raw: RawTileset = quick_xml::de::from_str(source)?;
        Self::from_raw(raw)
    }

    /// Parse a `.tsx` document from raw bytes (must be UTF-8).
    pub fn load_bytes(bytes: &[u8]) -> Result<Self, MalformedAssetError> {
        Self::load(std::str::from_utf8(bytes)?)
    }

    fn from_raw(raw: RawTileset) -> Result<Self, MalformedAssetError> {
        let info = TilesetInfo {
            name: raw.name,
            tile_width: raw.tile_width,
            tile_height: raw.tile_height,
            tile_count: raw.tile_count,
            columns: raw.columns,
            spacing: raw.spacing,
            margin: raw.margin,
            image: raw.image.map(|image| AtlasImage {
                source: image.source,
                width: image.width,
                height: image.height,
            }),
        };

        // Plain tiles never reach `from_records`, so duplicates are caught here.
        let mut seen = HashSet::with_capacity(raw.tiles.len());
        let mut records = Vec::new();
        for tile in &raw.tiles {
            if !seen.insert(tile.id) {
                return Err(MalformedAssetError::DuplicateTile { tile: tile.id });
            }

            let mut builder = TileRecordBuilder::new(tile.id);
            for property in tile.properties.iter().flat_map(|p| &p.properties) {
                let value = TilePropertyValue::from_xml(property.kind.as_deref(), &property.value)
                    .map_err(|value| MalformedAssetError::InvalidValue {
                        tile: tile.id,
                        key: property.name.clone(),
                        value: value.to_string(),
                    })?;
                builder.set(&property.name, value)?;
            }
            if let Some(record) = builder.finish()? {
                records.push(record);
            }
        }

        Self::from_records(info, records)
    }

    /// Assemble a table from already-validated records.
    ///
    /// Still rejects duplicate ids and ids outside `info.tile_count`.
    pub fn from_records(
        info: TilesetInfo,
        records: impl IntoIterator<Item = TileRecord>,
    ) -> Result<Self, MalformedAssetError> {
        let mut tiles = HashMap::new();
        for record in records {
            if info.tile_count > 0 && record.id >= info.tile_count {
                return Err(MalformedAssetError::TileOutOfRange {
                    tile: record.id,
                    tile_count: info.tile_count,
                });
            }
            if tiles.contains_key(&record.id) {
                return Err(MalformedAssetError::DuplicateTile { tile: record.id });
            }
            tiles.insert(record.id, record);
        }

        let counterparts = pair_parities(&tiles);
        debug!(
            "Loaded tileset '{}': {} entity tiles, {} parity pairs",
            info.name,
            tiles.len(),
            counterparts.len() / 2
        );

        Ok(Self {
            info,
            tiles,
            counterparts,
        })
    }

    /// Record for `id`, or `None` for a plain tile with no properties.
    ///
    /// Never fails: sparse ids are expected.
    #[inline]
    pub fn lookup(&self, id: u32) -> Option<&TileRecord> {
        self.tiles.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.tiles.contains_key(&id)
    }

    pub fn info(&self) -> &TilesetInfo {
        &self.info
    }

    /// Number of tiles with metadata (not the atlas cell count).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &TileRecord> {
        let mut records: Vec<&TileRecord> = self.tiles.values().collect();
        records.sort_unstable_by_key(|record| record.id);
        records.into_iter()
    }

    /// Records of one kind in ascending id order.
    pub fn tiles_of_kind<'a>(&'a self, kind: &'a TileKind) -> impl Iterator<Item = &'a TileRecord> {
        self.iter().filter(move |record| &record.kind == kind)
    }

    /// The same entity in the opposite parity, if the tileset defines exactly one.
    pub fn counterpart(&self, id: u32) -> Option<&TileRecord> {
        self.counterparts.get(&id).and_then(|other| self.tiles.get(other))
    }

    /// Pixel clip of atlas cell `id`.
    ///
    /// Defined for every cell, including plain tiles. `None` for
    /// image-collection tilesets, ids past `tile_count`, and cells whose
    /// pixel coordinates don't fit in a `u32`.
    pub fn atlas_rect(&self, id: u32) -> Option<URect> {
        let info = &self.info;
        if info.columns == 0 || id >= info.tile_count {
            return None;
        }
        let offset = |index: u32, size: u32| {
            size.checked_add(info.spacing)?
                .checked_mul(index)?
                .checked_add(info.margin)
        };
        let x = offset(id % info.columns, info.tile_width)?;
        let y = offset(id / info.columns, info.tile_height)?;
        Some(URect::new(
            x,
            y,
            x.checked_add(info.tile_width)?,
            y.checked_add(info.tile_height)?,
        ))
    }

    /// Serialize back to the `.tsx` schema.
    ///
    /// Properties are written in Tiled's alphabetical order. Parsing the output
    /// yields a table equal to `self`.
    pub fn to_tsx(&self) -> Result<String, quick_xml::SeError> {
        let raw = RawTileset {
            name: self.info.name.clone(),
            tile_width: self.info.tile_width,
            tile_height: self.info.tile_height,
            spacing: self.info.spacing,
            margin: self.info.margin,
            tile_count: self.info.tile_count,
            columns: self.info.columns,
            image: self.info.image.as_ref().map(|image| RawImage {
                source: image.source.clone(),
                width: image.width,
                height: image.height,
            }),
            tiles: self.iter().map(raw_tile).collect(),
        };

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 1);
        raw.serialize(serializer)?;

        Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}\n"))
    }
}

fn raw_tile(record: &TileRecord) -> RawTile {
    let int = |name: &str, value: u32| RawProperty {
        name: name.to_string(),
        kind: Some("int".to_string()),
        value: value.to_string(),
    };

    let mut properties = Vec::with_capacity(4);
    if let Some(direction) = record.direction {
        properties.push(int("direction", direction.get().into()));
    }
    properties.push(RawProperty {
        name: "name".to_string(),
        kind: None,
        value: record.kind.as_str().to_string(),
    });
    if let Some(parity) = record.parity {
        properties.push(int("parity", parity.get().into()));
    }
    if let Some(power) = record.power {
        properties.push(int("power", power));
    }

    RawTile {
        id: record.id,
        properties: Some(RawProperties { properties }),
    }
}

/// Match each parity-carrying record with its unique opposite-parity partner.
fn pair_parities(tiles: &HashMap<u32, TileRecord>) -> HashMap<u32, u32> {
    type Key<'a> = (&'a TileKind, Option<Direction>, Option<u32>, Parity);

    let mut groups: HashMap<Key<'_>, Vec<u32>> = HashMap::new();
    for record in tiles.values() {
        if let Some(parity) = record.parity {
            groups
                .entry((&record.kind, record.direction, record.power, parity))
                .or_default()
                .push(record.id);
        }
    }

    let mut pairs = HashMap::new();
    for record in tiles.values() {
        let Some(parity) = record.parity else {
            continue;
        };
        let key = (&record.kind, record.direction, record.power, parity.opposite());
        if let Some([partner]) = groups.get(&key).map(Vec::as_slice) {
            pairs.insert(record.id, *partner);
        }
    }
    pairs
}
