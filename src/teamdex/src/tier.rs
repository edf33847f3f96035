//! Creature tier definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error parsing a tier code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid tier code: {0} (expected A, B or C)")]
    InvalidTier(String),
}

/// Power level of a creature variant.
///
/// Sprite filenames carry the tier as a single letter code: `A` (Base),
/// `B` (Potent) and `C` (Perfect). The derived ordering is the fallback
/// order used when a requested tier has no sprite.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Tier {
    #[default]
    #[serde(rename = "A")]
    Base,
    #[serde(rename = "B")]
    Potent,
    #[serde(rename = "C")]
    Perfect,
}

impl Tier {
    /// All tiers, lowest first
    pub const ALL: [Tier; 3] = [Tier::Base, Tier::Potent, Tier::Perfect];

    /// Letter code used in sprite filenames
    pub fn code(self) -> &'static str {
        match self {
            Self::Base => "A",
            Self::Potent => "B",
            Self::Perfect => "C",
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Potent => "Potent",
            Self::Perfect => "Perfect",
        }
    }

    /// Parse a letter code. Only the exact uppercase letters are accepted.
    pub fn from_code(code: &str) -> Option<Tier> {
        match code {
            "A" => Some(Self::Base),
            "B" => Some(Self::Potent),
            "C" => Some(Self::Perfect),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Tier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::from_code(s).ok_or_else(|| ParseError::InvalidTier(s.to_string()))
    }
}
