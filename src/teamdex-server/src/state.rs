use crate::sprites::{SpriteDir, SpriteError};
use std::path::Path;
use teamdex::{
    Catalog, JsonFileStore, ScanGate, ScanReport, Scanner, SkinRepository, StoreError,
    TeamRepository,
};
use thiserror::Error;

/// Everything the server persists through
pub trait Store: SkinRepository + TeamRepository + Send + Sync {}

impl<T: SkinRepository + TeamRepository + Send + Sync> Store for T {}

#[derive(Error, Debug)]
pub enum RescanError {
    #[error("A sprite scan is already in progress")]
    InProgress,

    #[error(transparent)]
    Sprites(#[from] SpriteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Shared application state.
pub struct AppState {
    pub catalog: Catalog,
    pub store: Box<dyn Store>,
    pub sprites: SpriteDir,
    pub scan_gate: ScanGate,
}

impl AppState {
    pub fn new(catalog: Catalog, store: Box<dyn Store>, sprites: SpriteDir) -> Self {
        Self {
            catalog,
            store,
            sprites,
            scan_gate: ScanGate::new(),
        }
    }

    /// State backed by JSON files under `data_dir`
    pub fn open(catalog: Catalog, data_dir: &Path, sprites_dir: &Path) -> anyhow::Result<Self> {
        let store = JsonFileStore::open(data_dir)?;
        let sprites = SpriteDir::open(sprites_dir)?;
        Ok(Self::new(catalog, Box::new(store), sprites))
    }

    /// Rebuild the skin records from the sprite directory.
    ///
    /// Only one rescan runs at a time; a concurrent call fails with
    /// [`RescanError::InProgress`] instead of waiting.
    pub fn rescan(&self) -> Result<ScanReport, RescanError> {
        let _permit = self.scan_gate.try_acquire().ok_or(RescanError::InProgress)?;

        let files = self.sprites.list()?;
        let (records, report) = Scanner::new(&self.catalog).scan_with_report(&files);
        self.store.replace_all(&records)?;

        tracing::info!(
            considered = report.considered,
            accepted = report.accepted,
            skipped = report.skipped,
            records = report.records,
            "Sprite scan complete"
        );
        if report.pattern_conflicts > 0 {
            tracing::warn!(
                conflicts = report.pattern_conflicts,
                "Sprites with mixed naming patterns kept their first pattern"
            );
        }

        Ok(report)
    }
}
