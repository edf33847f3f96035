//! teamdex server
//!
//! Serves the team editor API, sprite uploads and the overlay data that
//! broadcast software polls. The binary in `main.rs` wires this up behind a
//! CLI; tests drive [`api::router`] directly.

pub mod api;
pub mod sprites;
pub mod state;

pub use api::{router, ApiDoc};
pub use sprites::{SpriteDir, SpriteError, MAX_SPRITE_SIZE};
pub use state::{AppState, RescanError, Store};
