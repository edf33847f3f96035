//! Repository traits for skin records and team rosters.
//!
//! These traits define the interface every storage backend provides.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::scan::{SkinRecord, SkinRecords};
use crate::team::Team;

/// Profile used when a request names none
pub const DEFAULT_PROFILE: &str = "default";

const MAX_PROFILE_LEN: usize = 64;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid profile id: {0:?}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for scan results
pub trait SkinRepository {
    /// Replace every stored record with the result of a scan
    fn replace_all(&self, records: &SkinRecords) -> StoreResult<()>;

    /// All stored records
    fn all(&self) -> StoreResult<SkinRecords>;

    /// Records for one creature, ordered by skin name
    fn by_creature(&self, creature: &str) -> StoreResult<Vec<SkinRecord>> {
        Ok(self.all()?.by_creature(creature).cloned().collect())
    }
}

/// Storage for team snapshots, keyed by profile id
pub trait TeamRepository {
    /// Load a profile's team, `None` if it was never saved
    fn load_team(&self, profile: &str) -> StoreResult<Option<Team>>;

    /// Store a profile's team, creating the profile if needed
    fn save_team(&self, profile: &str, team: &Team) -> StoreResult<()>;

    /// Ids of every saved profile, sorted
    fn list_profiles(&self) -> StoreResult<Vec<String>>;

    /// Remove a profile. Returns false if it did not exist.
    fn delete_profile(&self, profile: &str) -> StoreResult<bool>;
}

/// Check a profile id: 1-64 characters of ASCII letters, digits, `_` or `-`
pub fn validate_profile(profile: &str) -> StoreResult<()> {
    let valid = !profile.is_empty()
        && profile.len() <= MAX_PROFILE_LEN
        && profile
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidProfile(profile.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_profile() {
        assert!(validate_profile("default").is_ok());
        assert!(validate_profile("stream-2_alt").is_ok());
        assert!(validate_profile(&"a".repeat(64)).is_ok());

        let too_long = "a".repeat(65);
        for bad in ["", "../etc", "a/b", "with space", "ümlaut", too_long.as_str()] {
            assert!(
                matches!(validate_profile(bad), Err(StoreError::InvalidProfile(_))),
                "{bad:?} accepted"
            );
        }
    }

    /// Behavior every backend must share
    pub(crate) fn exercise_backend<S: SkinRepository + TeamRepository>(store: &S) {
        use crate::classify::Pattern;
        use crate::tier::Tier;

        // Empty store
        assert!(store.all().unwrap().is_empty());
        assert!(store.load_team(DEFAULT_PROFILE).unwrap().is_none());
        assert!(store.list_profiles().unwrap().is_empty());

        // Records are replaced wholesale
        let first: SkinRecords = [
            SkinRecord::new("Ucaclaw", "None", Pattern::Standard).with_tiers([Tier::Base]),
            SkinRecord::new("Ucaclaw", "Crimsonite", Pattern::SkinTier).with_tiers([Tier::Perfect]),
        ]
        .into_iter()
        .collect();
        store.replace_all(&first).unwrap();
        assert_eq!(store.all().unwrap(), first);
        assert_eq!(store.by_creature("Ucaclaw").unwrap().len(), 2);

        let second: SkinRecords =
            [SkinRecord::new("Arcta", "Crimsonite", Pattern::SkinFront)]
                .into_iter()
                .collect();
        store.replace_all(&second).unwrap();
        assert_eq!(store.all().unwrap(), second);
        assert!(store.by_creature("Ucaclaw").unwrap().is_empty());

        store.replace_all(&SkinRecords::new()).unwrap();
        assert!(store.all().unwrap().is_empty());

        // Teams per profile
        let mut team = Team::default();
        team.slots[0].creature = Some("Ucaclaw".into());
        store.save_team("alpha", &team).unwrap();
        store.save_team(DEFAULT_PROFILE, &Team::default()).unwrap();

        assert_eq!(store.load_team("alpha").unwrap(), Some(team));
        assert_eq!(
            store.list_profiles().unwrap(),
            vec!["alpha".to_string(), DEFAULT_PROFILE.to_string()]
        );

        assert!(store.delete_profile("alpha").unwrap());
        assert!(!store.delete_profile("alpha").unwrap());
        assert!(store.load_team("alpha").unwrap().is_none());

        // Bad ids never reach the backend
        assert!(matches!(
            store.save_team("../escape", &Team::default()),
            Err(StoreError::InvalidProfile(_))
        ));
        assert!(matches!(
            store.load_team(""),
            Err(StoreError::InvalidProfile(_))
        ));
    }
}
