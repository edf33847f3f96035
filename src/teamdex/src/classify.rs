//! Sprite filename classification
//!
//! Sprite files accumulated four naming conventions over time. The
//! classifier maps one filename onto a tentative (creature, skin, tier,
//! pattern) tuple, or rejects it.
//!
//! | Pattern           | Filename                          |
//! |-------------------|-----------------------------------|
//! | `standard`        | `{creature}_{tier}.gif`           |
//! | `skin_tier`       | `{creature}_{skin}_{tier}.gif`    |
//! | `tier_skin_front` | `{creature}_{tier}_{skin}_front.gif` |
//! | `skin_front`      | `{creature}_{skin}_front.gif`     |

use crate::catalog::{CreatureLookup, NO_SKIN};
use crate::tier::Tier;
use std::fmt;

/// Sprite image extension
pub const SPRITE_EXTENSION: &str = ".gif";

const FRONT_SUFFIX: &str = "_front";

/// Filename convention of a sprite
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    Standard,
    SkinTier,
    TierSkinFront,
    SkinFront,
    /// Tag read from storage that this version does not know
    Other(String),
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard => "standard",
            Self::SkinTier => "skin_tier",
            Self::TierSkinFront => "tier_skin_front",
            Self::SkinFront => "skin_front",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Pattern {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "standard" => Self::Standard,
            "skin_tier" | "skin_potent" => Self::SkinTier,
            "tier_skin_front" | "potent_skin_front" => Self::TierSkinFront,
            "skin_front" => Self::SkinFront,
            _ => Self::Other(tag),
        }
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Pattern::from)
    }
}

/// A filename the classifier accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedName {
    pub creature: String,
    pub skin: String,
    /// Absent for `skin_front`, which has no tier axis
    pub tier: Option<Tier>,
    pub pattern: Pattern,
}

/// Classifies sprite filenames against a creature roster
pub struct Classifier<'a> {
    roster: &'a dyn CreatureLookup,
}

impl<'a> Classifier<'a> {
    pub fn new(roster: &'a dyn CreatureLookup) -> Self {
        Self { roster }
    }

    /// Classify a filename, with or without the `.gif` extension.
    ///
    /// Returns `None` when the name matches no known convention.
    pub fn classify(&self, filename: &str) -> Option<ClassifiedName> {
        let stem = filename
            .strip_suffix(SPRITE_EXTENSION)
            .unwrap_or(filename);

        if let Some(rest) = stem.strip_suffix(FRONT_SUFFIX) {
            return classify_front(rest);
        }

        let parts: Vec<&str> = stem.split('_').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        match parts.as_slice() {
            [creature, code] => Tier::from_code(code).map(|tier| ClassifiedName {
                creature: (*creature).to_string(),
                skin: NO_SKIN.to_string(),
                tier: Some(tier),
                pattern: Pattern::Standard,
            }),
            [first, second, code] => {
                let tier = Tier::from_code(code)?;
                // Some skin names lead the filename instead of the creature
                let (creature, skin) =
                    if !self.roster.is_creature(first) && self.roster.is_creature(second) {
                        (second, first)
                    } else {
                        (first, second)
                    };
                Some(ClassifiedName {
                    creature: (*creature).to_string(),
                    skin: (*skin).to_string(),
                    tier: Some(tier),
                    pattern: Pattern::SkinTier,
                })
            }
            _ => None,
        }
    }
}

fn classify_front(rest: &str) -> Option<ClassifiedName> {
    let parts: Vec<&str> = rest.split('_').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    if let [creature, code, skin] = parts.as_slice() {
        if let Some(tier) = Tier::from_code(code) {
            return Some(ClassifiedName {
                creature: (*creature).to_string(),
                skin: (*skin).to_string(),
                tier: Some(tier),
                pattern: Pattern::TierSkinFront,
            });
        }
    }

    match parts.split_first() {
        Some((creature, skin)) if !skin.is_empty() => Some(ClassifiedName {
            creature: (*creature).to_string(),
            skin: skin.join("_"),
            tier: None,
            pattern: Pattern::SkinFront,
        }),
        _ => None,
    }
}
