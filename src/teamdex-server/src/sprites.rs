//! Sprite directory access
//!
//! The sprite directory is flat: every sprite is stored under its original
//! upload filename, and scans only ever look at names.

use image::ImageFormat;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use teamdex::SPRITE_EXTENSION;
use thiserror::Error;

/// Maximum sprite upload size: 10MB
pub const MAX_SPRITE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum SpriteError {
    #[error("Only GIF files are allowed")]
    NotGif,

    #[error("Invalid sprite filename: {0:?}")]
    InvalidName(String),

    #[error("File too large: {0} bytes (max {max})", max = MAX_SPRITE_SIZE)]
    TooLarge(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The directory sprites are uploaded to and served from
#[derive(Debug, Clone)]
pub struct SpriteDir {
    root: PathBuf,
}

impl SpriteDir {
    /// Use `root` as the sprite directory, creating it if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SpriteError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sprite filenames in the directory, sorted.
    ///
    /// A missing directory lists as empty.
    pub fn list(&self) -> Result<Vec<String>, SpriteError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(SPRITE_EXTENSION) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Store an uploaded sprite under its original name, replacing any
    /// existing file with that name.
    pub fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, SpriteError> {
        check_filename(filename)?;
        if data.len() > MAX_SPRITE_SIZE {
            return Err(SpriteError::TooLarge(data.len()));
        }
        if image::guess_format(data).ok() != Some(ImageFormat::Gif) {
            return Err(SpriteError::NotGif);
        }

        let path = self.root.join(filename);
        fs::write(&path, data)?;
        Ok(path)
    }
}

/// Accept only bare `.gif` names that cannot escape the sprite directory
pub fn check_filename(filename: &str) -> Result<(), SpriteError> {
    if !filename.ends_with(SPRITE_EXTENSION) {
        return Err(SpriteError::NotGif);
    }

    let stem = &filename[..filename.len() - SPRITE_EXTENSION.len()];
    let bad = stem.is_empty()
        || filename.starts_with('.')
        || filename.contains(['/', '\\', '\0'])
        || filename.contains("..");
    if bad {
        return Err(SpriteError::InvalidName(filename.to_string()));
    }
    Ok(())
}

/// Smallest valid GIF89a: 1x1 transparent pixel
#[cfg(test)]
pub(crate) const TINY_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];
