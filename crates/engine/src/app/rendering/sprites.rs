use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::debug;

use crate::app::{SpriteHandle, SpriteLoader, Visual};
use crate::motion::Vec2;
use crate::sprite_keys::{SpriteKey, SpriteKeyError};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid sprite key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: SpriteKeyError,
    },
    #[error("failed to open sprite '{key}' at {path}: {source}")]
    Open {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sprite '{key}' at {path}: {source}")]
    Decode {
        key: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub(crate) struct LoadedSprite {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

/// Owns decoded sprite pixels. Handles index into `sprites` and stay valid for
/// the store's lifetime.
pub struct SpriteStore {
    sprites_dir: PathBuf,
    sprites: Vec<LoadedSprite>,
    handles_by_key: HashMap<String, Visual>,
}

impl SpriteStore {
    pub fn new(sprites_dir: PathBuf) -> Self {
        Self {
            sprites_dir,
            sprites: Vec::new(),
            handles_by_key: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub(crate) fn get(&self, handle: SpriteHandle) -> Option<&LoadedSprite> {
        self.sprites.get(handle.0 as usize)
    }

    pub(crate) fn insert(&mut self, key: &str, sprite: LoadedSprite) -> Visual {
        let visual = Visual::new(
            SpriteHandle(self.sprites.len() as u32),
            Vec2::new(sprite.width as f32, sprite.height as f32),
        );
        self.sprites.push(sprite);
        self.handles_by_key.insert(key.to_string(), visual);
        visual
    }
}

impl SpriteLoader for SpriteStore {
    fn load_sprite(&mut self, key: &str) -> Result<Visual, AssetError> {
        if let Some(visual) = self.handles_by_key.get(key) {
            return Ok(*visual);
        }
        let sprite_key = SpriteKey::parse(key).map_err(|source| AssetError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        let path = sprite_key.image_path(&self.sprites_dir);
        let sprite = load_sprite_rgba(key, &path)?;
        debug!(
            sprite_key = key,
            path = %path.display(),
            width = sprite.width,
            height = sprite.height,
            "sprite_loaded"
        );
        Ok(self.insert(key, sprite))
    }
}

fn load_sprite_rgba(key: &str, path: &Path) -> Result<LoadedSprite, AssetError> {
    let reader = ImageReader::open(path).map_err(|source| AssetError::Open {
        key: key.to_string(),
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| AssetError::Decode {
        key: key.to_string(),
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}
