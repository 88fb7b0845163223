use std::path::Path;
use std::sync::Arc;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use normalize_path::NormalizePath;
use thiserror::Error;

use crate::assets::tileset::EntityTilesetAsset;
use crate::error::MalformedAssetError;
use crate::table::TileMetadataTable;

/// Asset loader for entity tilesets (.tsx files)
#[derive(Default)]
pub struct EntityTilesetAssetLoader;

#[derive(Debug, Error)]
pub enum EntityTilesetLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tileset: {0}")]
    Malformed(#[from] MalformedAssetError),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl AssetLoader for EntityTilesetAssetLoader {
    type Asset = EntityTilesetAsset;
    type Settings = ();
    type Error = EntityTilesetLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let table = TileMetadataTable::load_bytes(&bytes)?;

            let asset_path = load_context.asset_path().path();
            let atlas_path = table
                .info()
                .image
                .as_ref()
                .map(|image| resolve_relative_path(asset_path, &image.source))
                .transpose()?;

            debug!(
                "Loaded entity tileset {:?}: {} tiles with metadata",
                asset_path,
                table.len()
            );

            Ok(EntityTilesetAsset {
                table: Arc::new(table),
                atlas_path,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}

/// Resolve a path written inside a `.tsx` to a Bevy asset path
///
/// Tiled stores paths relative to the tileset file (`../spritesheets/a.png`);
/// Bevy wants them relative to the asset root with forward slashes.
fn resolve_relative_path(
    tileset_path: &Path,
    relative_path: &str,
) -> Result<String, EntityTilesetLoaderError> {
    if let Some(stripped) = relative_path.strip_prefix("assets/") {
        return Ok(stripped.to_string());
    }

    let parent = tileset_path.parent().ok_or_else(|| {
        EntityTilesetLoaderError::InvalidPath(format!(
            "No parent directory for asset: {:?}",
            tileset_path
        ))
    })?;

    // Path::join does not collapse `..`
    let normalized = parent.join(relative_path).normalize();

    let asset_path = normalized
        .to_str()
        .ok_or_else(|| {
            EntityTilesetLoaderError::InvalidPath(format!("Invalid UTF-8 in path: {:?}", normalized))
        })?
        .replace('\\', "/");

    Ok(asset_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_sibling_directory() {
        let resolved = resolve_relative_path(
            Path::new("maps/entityTiles.tsx"),
            "../spritesheets/entitySpritesheet.png",
        )
        .unwrap();
        assert_eq!(resolved, "spritesheets/entitySpritesheet.png");
    }

    #[test]
    fn test_resolve_same_directory() {
        let resolved =
            resolve_relative_path(Path::new("maps/entityTiles.tsx"), "sheet.png").unwrap();
        assert_eq!(resolved, "maps/sheet.png");
    }

    #[test]
    fn test_resolve_strips_assets_prefix() {
        let resolved =
            resolve_relative_path(Path::new("maps/entityTiles.tsx"), "assets/ui/sheet.png")
                .unwrap();
        assert_eq!(resolved, "ui/sheet.png");
    }

    #[test]
    fn test_loader_extensions() {
        assert_eq!(EntityTilesetAssetLoader.extensions(), &["tsx"]);
    }
}
