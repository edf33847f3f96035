//! In-memory backend for tests and throwaway runs

use super::{validate_profile, SkinRepository, StoreResult, TeamRepository};
use crate::scan::SkinRecords;
use crate::team::Team;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    skins: RwLock<SkinRecords>,
    teams: RwLock<BTreeMap<String, Team>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SkinRepository for MemoryStore {
    fn replace_all(&self, records: &SkinRecords) -> StoreResult<()> {
        let mut skins = self.skins.write().unwrap_or_else(|p| p.into_inner());
        *skins = records.clone();
        Ok(())
    }

    fn all(&self) -> StoreResult<SkinRecords> {
        Ok(self.skins.read().unwrap_or_else(|p| p.into_inner()).clone())
    }
}

impl TeamRepository for MemoryStore {
    fn load_team(&self, profile: &str) -> StoreResult<Option<Team>> {
        validate_profile(profile)?;
        let teams = self.teams.read().unwrap_or_else(|p| p.into_inner());
        Ok(teams.get(profile).cloned())
    }

    fn save_team(&self, profile: &str, team: &Team) -> StoreResult<()> {
        validate_profile(profile)?;
        let mut teams = self.teams.write().unwrap_or_else(|p| p.into_inner());
        teams.insert(profile.to_string(), team.clone());
        Ok(())
    }

    fn list_profiles(&self) -> StoreResult<Vec<String>> {
        let teams = self.teams.read().unwrap_or_else(|p| p.into_inner());
        Ok(teams.keys().cloned().collect())
    }

    fn delete_profile(&self, profile: &str) -> StoreResult<bool> {
        validate_profile(profile)?;
        let mut teams = self.teams.write().unwrap_or_else(|p| p.into_inner());
        Ok(teams.remove(profile).is_some())
    }
}
