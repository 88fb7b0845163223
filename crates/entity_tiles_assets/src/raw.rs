//! Serde mirror of the `.tsx` XML layout.
//!
//! These structs only describe shape. Validation happens in
//! [`crate::table`], which is the only consumer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename = "tileset")]
pub(crate) struct RawTileset {
    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@tilewidth")]
    pub tile_width: u32,

    #[serde(rename = "@tileheight")]
    pub tile_height: u32,

    #[serde(rename = "@spacing", default, skip_serializing_if = "is_zero")]
    pub spacing: u32,

    #[serde(rename = "@margin", default, skip_serializing_if = "is_zero")]
    pub margin: u32,

    #[serde(rename = "@tilecount", default)]
    pub tile_count: u32,

    #[serde(rename = "@columns", default)]
    pub columns: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<RawImage>,

    // Kept as a list so duplicate ids survive until validation sees them.
    #[serde(rename = "tile", default, skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<RawTile>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct RawImage {
    #[serde(rename = "@source")]
    pub source: String,

    #[serde(rename = "@width", default)]
    pub width: u32,

    #[serde(rename = "@height", default)]
    pub height: u32,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct RawTile {
    #[serde(rename = "@id")]
    pub id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RawProperties>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct RawProperties {
    #[serde(rename = "property", default)]
    pub properties: Vec<RawProperty>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct RawProperty {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(rename = "@value", default)]
    pub value: String,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
