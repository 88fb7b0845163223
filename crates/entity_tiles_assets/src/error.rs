//! Parse-time failures for entity tilesets.

use thiserror::Error;

/// A schema violation found while loading a tileset descriptor.
///
/// Every variant is fatal to the load: a malformed descriptor is a packaging
/// defect, so no partial table is ever returned.
#[derive(Debug, Error)]
pub enum MalformedAssetError {
    #[error("Failed to parse tileset XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Tileset is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Tile {tile} is defined more than once")]
    DuplicateTile { tile: u32 },

    #[error("Tile {tile} is outside the tileset (tilecount = {tile_count})")]
    TileOutOfRange { tile: u32, tile_count: u32 },

    #[error("Tile {tile} has unrecognized property '{key}'")]
    UnknownProperty { tile: u32, key: String },

    #[error("Tile {tile} sets property '{key}' more than once")]
    DuplicateProperty { tile: u32, key: String },

    #[error("Tile {tile} property '{key}' has type '{found}', expected '{expected}'")]
    WrongPropertyType {
        tile: u32,
        key: String,
        found: String,
        expected: &'static str,
    },

    #[error("Tile {tile} property '{key}' has invalid value '{value}'")]
    InvalidValue {
        tile: u32,
        key: String,
        value: String,
    },

    #[error("Tile {tile} has properties but no 'name'")]
    MissingName { tile: u32 },

    #[error("Tile {tile} property '{key}' is not allowed on '{kind}' tiles")]
    MisplacedProperty {
        tile: u32,
        key: String,
        kind: String,
    },
}
