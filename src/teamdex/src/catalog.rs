//! Creature catalog
//!
//! The catalog is the roster configuration: which creature names exist, which
//! cosmetic skins are known, and which skins each creature ships with when no
//! scan data is available. It is an immutable value handed to the classifier,
//! scanner and team validation rather than global state, so a different roster
//! can be loaded from TOML without touching the core.

mod roster;

pub use roster::{CREATURES, SKINS, SKIN_AVAILABILITY};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use thiserror::Error;

/// Skin name meaning "no cosmetic skin"
pub const NO_SKIN: &str = "None";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Catalog has no creatures")]
    Empty,

    #[error("Duplicate creature name: {0}")]
    DuplicateCreature(String),
}

/// Answers "is this token a known creature name".
pub trait CreatureLookup {
    fn is_creature(&self, name: &str) -> bool;
}

impl CreatureLookup for HashSet<String> {
    fn is_creature(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl CreatureLookup for BTreeSet<String> {
    fn is_creature(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl CreatureLookup for [&str] {
    fn is_creature(&self, name: &str) -> bool {
        self.iter().any(|c| *c == name)
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    creatures: Vec<String>,
    #[serde(default)]
    skins: Vec<String>,
    #[serde(default)]
    availability: BTreeMap<String, Vec<String>>,
}

/// Roster configuration
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    creatures: Vec<String>,
    skins: Vec<String>,
    availability: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    index: HashSet<String>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicated creature lists
    pub fn new(
        creatures: Vec<String>,
        skins: Vec<String>,
        availability: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, CatalogError> {
        if creatures.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashSet::with_capacity(creatures.len());
        for name in &creatures {
            if !index.insert(name.clone()) {
                return Err(CatalogError::DuplicateCreature(name.clone()));
            }
        }

        Ok(Self {
            creatures,
            skins,
            availability,
            index,
        })
    }

    /// The roster shipped with teamdex
    pub fn builtin() -> Self {
        let availability = SKIN_AVAILABILITY
            .iter()
            .map(|(creature, skins)| {
                (
                    (*creature).to_string(),
                    skins.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();

        Self {
            creatures: CREATURES.iter().map(|s| (*s).to_string()).collect(),
            skins: SKINS.iter().map(|s| (*s).to_string()).collect(),
            availability,
            index: CREATURES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Parse a catalog from TOML text
    ///
    /// ```
    /// use teamdex::{Catalog, CreatureLookup};
    ///
    /// let catalog = Catalog::from_toml_str(r#"
    /// creatures = ["Ucaclaw", "Gildwing"]
    /// skins = ["Retro"]
    ///
    /// [availability]
    /// Gildwing = ["Retro"]
    /// "#).unwrap();
    ///
    /// assert!(catalog.is_creature("Gildwing"));
    /// assert_eq!(catalog.static_skins("Gildwing"), vec!["None", "Retro"]);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.creatures, file.skins, file.availability)
    }

    /// Load a catalog from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Creature names in roster order
    pub fn creatures(&self) -> &[String] {
        &self.creatures
    }

    /// Known skin names (without the "None" sentinel)
    pub fn skins(&self) -> &[String] {
        &self.skins
    }

    /// Skins from the static availability table, "None" first
    pub fn static_skins(&self, creature: &str) -> Vec<String> {
        let mut skins = vec![NO_SKIN.to_string()];
        if let Some(extra) = self.availability.get(creature) {
            skins.extend(extra.iter().filter(|s| *s != NO_SKIN).cloned());
        }
        skins
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CreatureLookup for Catalog {
    fn is_creature(&self, name: &str) -> bool {
        self.index.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roster() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.creatures().len(), CREATURES.len());
        assert_eq!(catalog.creatures()[0], "Cubzero");
        assert!(catalog.is_creature("Ucaclaw"));
        assert!(catalog.is_creature("Gildwing"));
        assert!(!catalog.is_creature("Retro"));
        assert!(!catalog.is_creature("ucaclaw"));
    }

    #[test]
    fn test_builtin_has_no_duplicates() {
        let unique: HashSet<&str> = CREATURES.iter().copied().collect();
        assert_eq!(unique.len(), CREATURES.len());
    }

    #[test]
    fn test_availability_refers_to_known_names() {
        let catalog = Catalog::builtin();
        for (creature, skins) in SKIN_AVAILABILITY {
            assert!(catalog.is_creature(creature), "{creature} not in roster");
            for skin in *skins {
                assert!(SKINS.contains(skin), "{skin} not a known skin");
            }
        }
    }

    #[test]
    fn test_static_skins() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.static_skins("Ucaclaw"), vec!["None", "Crimsonite"]);
        assert_eq!(catalog.static_skins("Toruga"), vec!["None"]);
        assert_eq!(catalog.static_skins("Missingno"), vec!["None"]);
    }

    #[test]
    fn test_from_toml_defaults() {
        let catalog = Catalog::from_toml_str("creatures = [\"Alpha\", \"Beta\"]").unwrap();
        assert!(catalog.is_creature("Alpha"));
        assert!(catalog.skins().is_empty());
        assert_eq!(catalog.static_skins("Beta"), vec!["None"]);
    }

    #[test]
    fn test_from_toml_rejects_bad_rosters() {
        assert!(matches!(
            Catalog::from_toml_str("creatures = []"),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_toml_str("creatures = [\"Alpha\", \"Alpha\"]"),
            Err(CatalogError::DuplicateCreature(name)) if name == "Alpha"
        ));
        assert!(matches!(
            Catalog::from_toml_str("skins = [\"Retro\"]"),
            Err(CatalogError::Toml(_))
        ));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "creatures = [\"Alpha\"]\n[availability]\nAlpha = [\"Shiny\"]\n")
            .unwrap();

        let catalog = Catalog::from_toml_file(&path).unwrap();
        assert_eq!(catalog.static_skins("Alpha"), vec!["None", "Shiny"]);
    }

    #[test]
    fn test_slice_lookup() {
        let names: &[&str] = &["Alpha", "Beta"];
        assert!(names.is_creature("Beta"));
        assert!(!names.is_creature("Gamma"));
    }
}
