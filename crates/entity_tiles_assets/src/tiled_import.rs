//! Build a table from a tileset already parsed by the `tiled` crate.
//!
//! Useful when the entity tileset arrives embedded in a `.tmx` map. `tiled`
//! keys tiles by id, so a duplicate id in the source has already been collapsed
//! by the time we see it; every other rule is enforced the same way as
//! [`TileMetadataTable::load`].

use tiled::PropertyValue;

use crate::error::MalformedAssetError;
use crate::properties::{TilePropertyValue, TileRecordBuilder};
use crate::table::{AtlasImage, TileMetadataTable, TilesetInfo};

impl TileMetadataTable {
    /// Validate a `tiled::Tileset` into a table.
    ///
    /// The atlas `source` keeps whatever path `tiled` resolved, which is
    /// usually joined onto the tileset's directory.
    pub fn from_tiled(tileset: &tiled::Tileset) -> Result<Self, MalformedAssetError> {
        let info = TilesetInfo {
            name: tileset.name.clone(),
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
            tile_count: tileset.tilecount,
            columns: tileset.columns,
            spacing: tileset.spacing,
            margin: tileset.margin,
            image: tileset.image.as_ref().map(|image| AtlasImage {
                source: image.source.to_string_lossy().replace('\\', "/"),
                width: image.width.max(0) as u32,
                height: image.height.max(0) as u32,
            }),
        };

        let mut records = Vec::new();
        for (tile_id, tile) in tileset.tiles() {
            let mut builder = TileRecordBuilder::new(tile_id);
            for (key, value) in tile.properties.iter() {
                builder.set(key, property_value(value))?;
            }
            if let Some(record) = builder.finish()? {
                records.push(record);
            }
        }

        Self::from_records(info, records)
    }
}

fn property_value(value: &PropertyValue) -> TilePropertyValue<'_> {
    match value {
        PropertyValue::IntValue(i) => TilePropertyValue::Int(i64::from(*i)),
        PropertyValue::StringValue(s) => TilePropertyValue::Text(s),
        PropertyValue::BoolValue(_) => TilePropertyValue::Other("bool"),
        PropertyValue::FloatValue(_) => TilePropertyValue::Other("float"),
        PropertyValue::ColorValue(_) => TilePropertyValue::Other("color"),
        PropertyValue::FileValue(_) => TilePropertyValue::Other("file"),
        _ => TilePropertyValue::Other("class"),
    }
}
