//! # teamdex
//!
//! Creature team roster library for broadcast overlays.
//!
//! This library provides functionality to:
//! - Classify sprite filenames across the four historical naming conventions
//! - Scan a sprite corpus into per-(creature, skin) records
//! - Resolve the sprite filename for a creature, tier and skin
//! - Model six-slot teams and the overlay built from them
//! - Persist scan results and teams through repository traits
//!
//! ## Example
//!
//! ```
//! use teamdex::{resolve, Catalog, Scanner, Tier};
//!
//! let catalog = Catalog::builtin();
//! let records = Scanner::new(&catalog).scan([
//!     "Ucaclaw_A.gif",
//!     "Ucaclaw_Crimsonite_C.gif",
//!     "notes.txt",
//! ]);
//!
//! let record = records.get("Ucaclaw", "Crimsonite");
//! assert_eq!(
//!     resolve(Some("Ucaclaw"), Tier::Perfect, "Crimsonite", record),
//!     "Ucaclaw_Crimsonite_C.gif"
//! );
//! ```

pub mod catalog;
pub mod classify;
pub mod resolve;
pub mod scan;
pub mod store;
pub mod team;
pub mod tier;

#[doc(inline)]
pub use catalog::{Catalog, CatalogError, CreatureLookup, NO_SKIN};
#[doc(inline)]
pub use classify::{ClassifiedName, Classifier, Pattern, SPRITE_EXTENSION};
#[doc(inline)]
pub use resolve::{available_skins, record_for, resolve};
#[doc(inline)]
pub use scan::{ScanGate, ScanPermit, ScanReport, Scanner, SkinKey, SkinRecord, SkinRecords};
#[doc(inline)]
pub use store::{
    validate_profile, JsonFileStore, MemoryStore, SkinRepository, StoreError, StoreResult,
    TeamRepository, DEFAULT_PROFILE,
};
#[doc(inline)]
pub use team::{
    Layout, Overlay, OverlaySlot, SlotUpdate, Team, TeamError, TeamSlot, SPRITE_URL_PREFIX,
    TEAM_SIZE,
};
#[doc(inline)]
pub use tier::{ParseError, Tier};
