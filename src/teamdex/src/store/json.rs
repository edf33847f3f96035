//! JSON file backend
//!
//! Layout under the root directory:
//!
//! ```text
//! skins.json            every skin record, as one array
//! teams/{profile}.json  one team snapshot per profile
//! ```

use super::{validate_profile, SkinRepository, StoreResult, TeamRepository};
use crate::scan::{SkinRecord, SkinRecords};
use crate::team::Team;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const SKINS_FILE: &str = "skins.json";
const TEAMS_DIR: &str = "teams";

/// Stores records and teams as pretty-printed JSON files
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    /// Serializes writers; readers rely on rename being atomic
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(TEAMS_DIR))?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn skins_path(&self) -> PathBuf {
        self.root.join(SKINS_FILE)
    }

    fn team_path(&self, profile: &str) -> PathBuf {
        self.root.join(TEAMS_DIR).join(format!("{profile}.json"))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(value)?;
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Read and parse a JSON file, `None` if it does not exist
fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl SkinRepository for JsonFileStore {
    fn replace_all(&self, records: &SkinRecords) -> StoreResult<()> {
        let list: Vec<&SkinRecord> = records.iter().collect();
        self.write_json(&self.skins_path(), &list)
    }

    fn all(&self) -> StoreResult<SkinRecords> {
        let list: Vec<SkinRecord> = read_json(&self.skins_path())?.unwrap_or_default();
        Ok(list.into_iter().collect())
    }
}

impl TeamRepository for JsonFileStore {
    fn load_team(&self, profile: &str) -> StoreResult<Option<Team>> {
        validate_profile(profile)?;
        read_json(&self.team_path(profile))
    }

    fn save_team(&self, profile: &str, team: &Team) -> StoreResult<()> {
        validate_profile(profile)?;
        self.write_json(&self.team_path(profile), team)
    }

    fn list_profiles(&self) -> StoreResult<Vec<String>> {
        let mut profiles = Vec::new();
        for entry in fs::read_dir(self.root.join(TEAMS_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_profile(stem).is_ok() {
                    profiles.push(stem.to_string());
                }
            }
        }
        profiles.sort();
        Ok(profiles)
    }

    fn delete_profile(&self, profile: &str) -> StoreResult<bool> {
        validate_profile(profile)?;
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match fs::remove_file(self.team_path(profile)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
