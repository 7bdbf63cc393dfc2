use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not start or end with '/'")]
    DanglingSlash,
    #[error("sprite key must not contain empty path segments")]
    EmptySegment,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// A validated, relative sprite name such as `player` or `fx/laser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SpriteKey<'a>(&'a str);

impl<'a> SpriteKey<'a> {
    pub(crate) fn parse(raw: &'a str) -> Result<Self, SpriteKeyError> {
        if raw.is_empty() {
            return Err(SpriteKeyError::Empty);
        }
        if raw.starts_with('/') || raw.ends_with('/') {
            return Err(SpriteKeyError::DanglingSlash);
        }
        if let Some(character) = raw.chars().find(|ch| !is_key_character(*ch)) {
            return Err(SpriteKeyError::InvalidCharacter { character });
        }
        for segment in raw.split('/') {
            if segment.is_empty() {
                return Err(SpriteKeyError::EmptySegment);
            }
            if segment.contains("..") {
                return Err(SpriteKeyError::ParentTraversal);
            }
            if segment.contains('.') {
                return Err(SpriteKeyError::InvalidCharacter { character: '.' });
            }
        }
        Ok(Self(raw))
    }

    pub(crate) fn image_path(self, sprites_dir: &Path) -> PathBuf {
        let mut path = sprites_dir.to_path_buf();
        for segment in self.0.split('/') {
            path.push(segment);
        }
        path.set_extension("png");
        path
    }
}

fn is_key_character(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-' | '.')
}
