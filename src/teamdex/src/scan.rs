//! Sprite corpus scanning
//!
//! A scan classifies every sprite filename in the corpus and folds the
//! results into one [`SkinRecord`] per (creature, skin) pair. Scans are full
//! rebuilds: the result is meant to replace whatever was stored before.

use crate::catalog::{CreatureLookup, NO_SKIN};
use crate::classify::{ClassifiedName, Classifier, Pattern, SPRITE_EXTENSION};
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Key of a skin record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkinKey {
    pub creature: String,
    pub skin: String,
}

impl SkinKey {
    pub fn new(creature: impl Into<String>, skin: impl Into<String>) -> Self {
        Self {
            creature: creature.into(),
            skin: skin.into(),
        }
    }
}

/// What a scan learned about one (creature, skin) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SkinRecord {
    pub creature_name: String,
    pub skin_name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "skin_tier"))]
    pub pattern: Pattern,
    /// Tiers with a sprite on disk, lowest first. Empty for `skin_front`.
    #[serde(default)]
    pub tiers_observed: BTreeSet<Tier>,
}

impl SkinRecord {
    pub fn new(creature: impl Into<String>, skin: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            creature_name: creature.into(),
            skin_name: skin.into(),
            pattern,
            tiers_observed: BTreeSet::new(),
        }
    }

    /// Builder-style tier set, mostly for tests and fixtures
    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = Tier>) -> Self {
        self.tiers_observed.extend(tiers);
        self
    }

    pub fn key(&self) -> SkinKey {
        SkinKey::new(&self.creature_name, &self.skin_name)
    }

    /// Lowest observed tier, if any
    pub fn lowest_tier(&self) -> Option<Tier> {
        self.tiers_observed.first().copied()
    }

    /// Sprite filenames this record was built from.
    ///
    /// Scanning the returned names reproduces the record.
    pub fn expected_filenames(&self) -> Vec<String> {
        let c = &self.creature_name;
        let s = &self.skin_name;
        match &self.pattern {
            Pattern::SkinFront => vec![format!("{c}_{s}_front{SPRITE_EXTENSION}")],
            Pattern::TierSkinFront => self
                .tiers_observed
                .iter()
                .map(|t| format!("{c}_{t}_{s}_front{SPRITE_EXTENSION}"))
                .collect(),
            Pattern::Standard => self
                .tiers_observed
                .iter()
                .map(|t| format!("{c}_{t}{SPRITE_EXTENSION}"))
                .collect(),
            Pattern::SkinTier | Pattern::Other(_) => self
                .tiers_observed
                .iter()
                .map(|t| format!("{c}_{s}_{t}{SPRITE_EXTENSION}"))
                .collect(),
        }
    }

    fn observe(&mut self, classified: &ClassifiedName) -> bool {
        if let Some(tier) = classified.tier {
            self.tiers_observed.insert(tier);
        }
        self.pattern == classified.pattern
    }
}

/// Result of a scan, keyed by (creature, skin)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinRecords {
    records: BTreeMap<SkinKey, SkinRecord>,
}

impl SkinRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, creature: &str, skin: &str) -> Option<&SkinRecord> {
        self.records.get(&SkinKey::new(creature, skin))
    }

    /// All records for one creature, ordered by skin name
    pub fn by_creature<'a>(&'a self, creature: &'a str) -> impl Iterator<Item = &'a SkinRecord> {
        self.records
            .values()
            .filter(move |r| r.creature_name == creature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkinRecord> {
        self.records.values()
    }

    /// Insert a record, replacing any record with the same key
    pub fn insert(&mut self, record: SkinRecord) -> Option<SkinRecord> {
        self.records.insert(record.key(), record)
    }

    pub fn into_records(self) -> Vec<SkinRecord> {
        self.records.into_values().collect()
    }
}

impl FromIterator<SkinRecord> for SkinRecords {
    fn from_iter<I: IntoIterator<Item = SkinRecord>>(iter: I) -> Self {
        let mut records = SkinRecords::new();
        for record in iter {
            records.insert(record);
        }
        records
    }
}

/// Counters describing one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScanReport {
    /// Files carrying the sprite extension
    pub considered: usize,
    /// Files the classifier accepted
    pub accepted: usize,
    /// Files the classifier rejected
    pub skipped: usize,
    /// Accepted files whose pattern differs from the first file seen for the same key
    pub pattern_conflicts: usize,
    /// Records produced
    pub records: usize,
}

/// Builds skin records from a list of filenames
pub struct Scanner<'a> {
    classifier: Classifier<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(roster: &'a dyn CreatureLookup) -> Self {
        Self {
            classifier: Classifier::new(roster),
        }
    }

    /// Scan a file list. Non-sprite and unrecognized names are skipped.
    pub fn scan<I, S>(&self, filenames: I) -> SkinRecords
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scan_with_report(filenames).0
    }

    /// Scan a file list and report how many names were used or skipped
    pub fn scan_with_report<I, S>(&self, filenames: I) -> (SkinRecords, ScanReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records: BTreeMap<SkinKey, SkinRecord> = BTreeMap::new();
        let mut report = ScanReport::default();

        for name in filenames {
            let name = name.as_ref();
            if !name.ends_with(SPRITE_EXTENSION) {
                continue;
            }
            report.considered += 1;

            let Some(classified) = self.classifier.classify(name) else {
                report.skipped += 1;
                continue;
            };
            report.accepted += 1;

            let key = SkinKey::new(&classified.creature, &classified.skin);
            // The first file seen for a key decides its pattern
            let record = records.entry(key).or_insert_with(|| {
                SkinRecord::new(
                    &classified.creature,
                    &classified.skin,
                    classified.pattern.clone(),
                )
            });
            if !record.observe(&classified) {
                report.pattern_conflicts += 1;
            }
        }

        report.records = records.len();
        (SkinRecords { records }, report)
    }
}

/// Allows at most one scan at a time.
///
/// A scan clears and rewrites the stored records, so two overlapping scans
/// could interleave their writes.
#[derive(Debug, Default)]
pub struct ScanGate {
    busy: AtomicBool,
}

/// Proof that the holder owns the scan slot; released on drop
#[derive(Debug)]
pub struct ScanPermit<'a> {
    gate: &'a ScanGate,
}

impl ScanGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the scan slot, or `None` if a scan is already running
    pub fn try_acquire(&self) -> Option<ScanPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// True for the "no skin" sentinel
pub fn is_default_skin(skin: &str) -> bool {
    skin == NO_SKIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn scan(files: &[&str]) -> (SkinRecords, ScanReport) {
        let catalog = Catalog::builtin();
        Scanner::new(&catalog).scan_with_report(files.iter().copied())
    }

    #[test]
    fn test_empty_corpus() {
        let (records, report) = scan(&[]);
        assert!(records.is_empty());
        assert_eq!(report, ScanReport::default());
    }

    #[test]
    fn test_non_sprites_ignored() {
        let (records, report) = scan(&["readme.txt", "Ucaclaw_A.png", ".gitkeep"]);
        assert!(records.is_empty());
        assert_eq!(report.considered, 0);
    }

    #[test]
    fn test_unmatched_are_skipped() {
        let (records, report) = scan(&["Ucaclaw.gif", "Ucaclaw_Z.gif", "Ucaclaw_B.gif"]);
        assert_eq!(records.len(), 1);
        assert_eq!(report.considered, 3);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_tiers_merge_per_key() {
        let (records, report) = scan(&[
            "Ucaclaw_A.gif",
            "Ucaclaw_C.gif",
            "Ucaclaw_Crimsonite_B.gif",
            "Ucaclaw_Crimsonite_C.gif",
            "Retro_Gildwing_A.gif",
        ]);
        assert_eq!(report.records, 3);

        let base = records.get("Ucaclaw", "None").unwrap();
        assert_eq!(base.pattern, Pattern::Standard);
        assert_eq!(
            base.tiers_observed,
            BTreeSet::from([Tier::Base, Tier::Perfect])
        );

        let crimson = records.get("Ucaclaw", "Crimsonite").unwrap();
        assert_eq!(crimson.pattern, Pattern::SkinTier);
        assert_eq!(
            crimson.tiers_observed,
            BTreeSet::from([Tier::Potent, Tier::Perfect])
        );

        let retro = records.get("Gildwing", "Retro").unwrap();
        assert_eq!(retro.tiers_observed, BTreeSet::from([Tier::Base]));
    }

    #[test]
    fn test_first_pattern_wins() {
        let (records, report) = scan(&[
            "Ucaclaw_A.gif",
            "Ucaclaw_Crimsonite_C.gif",
            "Ucaclaw_Crimsonite_front.gif",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(report.pattern_conflicts, 1);

        let crimson = records.get("Ucaclaw", "Crimsonite").unwrap();
        assert_eq!(crimson.pattern, Pattern::SkinTier);
        assert_eq!(crimson.tiers_observed, BTreeSet::from([Tier::Perfect]));

        // Reversed order flips the stored pattern
        let (records, _) = scan(&[
            "Ucaclaw_Crimsonite_front.gif",
            "Ucaclaw_Crimsonite_C.gif",
        ]);
        let crimson = records.get("Ucaclaw", "Crimsonite").unwrap();
        assert_eq!(crimson.pattern, Pattern::SkinFront);
        assert_eq!(crimson.tiers_observed, BTreeSet::from([Tier::Perfect]));
    }

    #[test]
    fn test_skin_front_has_no_tiers() {
        let (records, _) = scan(&["Ucaclaw_Crimsonite_front.gif"]);
        let record = records.get("Ucaclaw", "Crimsonite").unwrap();
        assert_eq!(record.pattern, Pattern::SkinFront);
        assert!(record.tiers_observed.is_empty());
    }

    #[test]
    fn test_rescan_of_expected_filenames_round_trips() {
        let fixtures = [
            SkinRecord::new("Ucaclaw", "None", Pattern::Standard)
                .with_tiers([Tier::Base, Tier::Potent]),
            SkinRecord::new("Ucaclaw", "Crimsonite", Pattern::SkinTier)
                .with_tiers([Tier::Perfect]),
            SkinRecord::new("Armado", "Galactic", Pattern::TierSkinFront)
                .with_tiers([Tier::Potent, Tier::Perfect]),
            SkinRecord::new("Gildwing", "Retro", Pattern::SkinFront),
        ];

        let catalog = Catalog::builtin();
        let scanner = Scanner::new(&catalog);
        for record in fixtures {
            let rescanned = scanner.scan(record.expected_filenames());
            assert_eq!(rescanned.len(), 1, "{record:?}");
            assert_eq!(rescanned.get(&record.creature_name, &record.skin_name), Some(&record));
        }
    }

    #[test]
    fn test_by_creature() {
        let (records, _) = scan(&[
            "Ucaclaw_A.gif",
            "Ucaclaw_Crimsonite_A.gif",
            "Arcta_Crimsonite_A.gif",
        ]);
        let skins: Vec<&str> = records
            .by_creature("Ucaclaw")
            .map(|r| r.skin_name.as_str())
            .collect();
        assert_eq!(skins, vec!["Crimsonite", "None"]);
        assert_eq!(records.by_creature("Toruga").count(), 0);
    }

    #[test]
    fn test_record_serde_shape() {
        let record = SkinRecord::new("Armado", "Galactic", Pattern::TierSkinFront)
            .with_tiers([Tier::Perfect, Tier::Potent]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "creature_name": "Armado",
                "skin_name": "Galactic",
                "pattern": "tier_skin_front",
                "tiers_observed": ["B", "C"],
            })
        );
    }

    #[test]
    fn test_scan_gate_is_exclusive() {
        let gate = ScanGate::new();
        let permit = gate.try_acquire();
        assert!(permit.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_default_skin() {
        assert!(is_default_skin("None"));
        assert!(!is_default_skin("none"));
    }
}
