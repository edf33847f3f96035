//! Team roster and broadcast overlay model

use crate::catalog::{CreatureLookup, NO_SKIN};
use crate::resolve::resolve;
use crate::scan::SkinRecord;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Number of slots in a team
pub const TEAM_SIZE: usize = 6;

/// URL prefix sprites are served under
pub const SPRITE_URL_PREFIX: &str = "/sprites/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("Team must have exactly 6 slots, got {0}")]
    WrongSlotCount(usize),

    #[error("Slot index out of range: {0}")]
    NoSuchSlot(u8),

    #[error("Slot {0} appears more than once")]
    DuplicateSlot(u8),

    #[error("Unknown creature in slot {slot}: {name}")]
    UnknownCreature { slot: u8, name: String },

    #[error("Slot {0} has an empty skin name")]
    EmptySkin(u8),
}

fn default_skin() -> String {
    NO_SKIN.to_string()
}

/// One team position
///
/// Missing fields deserialize to an empty slot with index 0, which
/// validation rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct TeamSlot {
    /// Position 1..=6
    pub slot: u8,
    #[serde(alias = "coromon")]
    pub creature: Option<String>,
    #[serde(alias = "potentLevel")]
    pub tier: Tier,
    #[serde(alias = "specialSkin")]
    pub skin: String,
}

impl Default for TeamSlot {
    fn default() -> Self {
        Self::empty(0)
    }
}

impl TeamSlot {
    pub fn empty(slot: u8) -> Self {
        Self {
            slot,
            creature: None,
            tier: Tier::Base,
            skin: default_skin(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.creature.is_none()
    }

    /// Sprite filename for this slot, empty when the slot is empty
    pub fn sprite(&self, record: Option<&SkinRecord>) -> String {
        resolve(self.creature.as_deref(), self.tier, &self.skin, record)
    }
}

/// Partial slot edit. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotUpdate {
    /// `Some(None)` empties the slot
    #[serde(default, with = "double_option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub creature: Option<Option<String>>,
    pub tier: Option<Tier>,
    pub skin: Option<String>,
}

/// Distinguishes a missing field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// A full roster of six slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Team {
    pub slots: Vec<TeamSlot>,
}

impl Default for Team {
    fn default() -> Self {
        Self {
            slots: (1..=TEAM_SIZE as u8).map(TeamSlot::empty).collect(),
        }
    }
}

impl Team {
    /// Check slot structure and creature names
    pub fn validate(&self, roster: &dyn CreatureLookup) -> Result<(), TeamError> {
        if self.slots.len() != TEAM_SIZE {
            return Err(TeamError::WrongSlotCount(self.slots.len()));
        }

        let mut seen = BTreeSet::new();
        for slot in &self.slots {
            if slot.slot == 0 || usize::from(slot.slot) > TEAM_SIZE {
                return Err(TeamError::NoSuchSlot(slot.slot));
            }
            if !seen.insert(slot.slot) {
                return Err(TeamError::DuplicateSlot(slot.slot));
            }
            if let Some(name) = &slot.creature {
                if !roster.is_creature(name) {
                    return Err(TeamError::UnknownCreature {
                        slot: slot.slot,
                        name: name.clone(),
                    });
                }
            }
            if slot.skin.is_empty() {
                return Err(TeamError::EmptySkin(slot.slot));
            }
        }

        Ok(())
    }

    /// Same team with slots ordered by index
    pub fn normalized(mut self) -> Self {
        self.slots.sort_by_key(|s| s.slot);
        self
    }

    pub fn slot(&self, index: u8) -> Option<&TeamSlot> {
        self.slots.iter().find(|s| s.slot == index)
    }

    /// Apply a partial edit to one slot.
    ///
    /// Emptying a slot also resets its tier and skin.
    pub fn apply(&mut self, index: u8, update: SlotUpdate) -> Result<&TeamSlot, TeamError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.slot == index)
            .ok_or(TeamError::NoSuchSlot(index))?;

        if let Some(creature) = update.creature {
            slot.creature = creature;
        }
        if let Some(tier) = update.tier {
            slot.tier = tier;
        }
        if let Some(skin) = update.skin {
            slot.skin = skin;
        }
        if slot.creature.is_none() {
            slot.tier = Tier::Base;
            slot.skin = default_skin();
        }

        Ok(slot)
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        *self = Team::default();
    }

    /// Occupied slots in slot order
    pub fn filled_slots(&self) -> impl Iterator<Item = &TeamSlot> {
        self.slots.iter().filter(|s| !s.is_empty())
    }
}

/// Overlay arrangement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Row,
    #[default]
    Grid,
    Stack,
}

impl Layout {
    /// Parse a layout name; anything unrecognized is a grid
    pub fn parse_or_default(text: Option<&str>) -> Self {
        match text {
            Some("row") => Self::Row,
            Some("stack") => Self::Stack,
            _ => Self::Grid,
        }
    }
}

/// One filled slot as the overlay shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OverlaySlot {
    pub slot: u8,
    pub creature: String,
    pub tier: Tier,
    pub tier_label: &'static str,
    /// `None` when no cosmetic skin is worn
    pub skin: Option<String>,
    pub sprite: String,
    pub sprite_url: String,
}

/// Overlay model for broadcast software
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Overlay {
    pub layout: Layout,
    pub slots: Vec<OverlaySlot>,
}

impl Overlay {
    /// Resolve every filled slot. `lookup` supplies the record for a
    /// (creature, skin) pair.
    pub fn build<F>(team: &Team, layout: Layout, mut lookup: F) -> Self
    where
        F: FnMut(&str, &str) -> Option<SkinRecord>,
    {
        let slots = team
            .filled_slots()
            .filter_map(|slot| {
                let creature = slot.creature.as_deref()?;
                let record = lookup(creature, &slot.skin);
                let sprite = slot.sprite(record.as_ref());
                Some(OverlaySlot {
                    slot: slot.slot,
                    creature: creature.to_string(),
                    tier: slot.tier,
                    tier_label: slot.tier.label(),
                    skin: (slot.skin != NO_SKIN).then(|| slot.skin.clone()),
                    sprite_url: format!("{SPRITE_URL_PREFIX}{sprite}"),
                    sprite,
                })
            })
            .collect();

        Self { layout, slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::classify::Pattern;

    fn team_with(slot: u8, creature: &str, tier: Tier, skin: &str) -> Team {
        let mut team = Team::default();
        team.apply(
            slot,
            SlotUpdate {
                creature: Some(Some(creature.into())),
                tier: Some(tier),
                skin: Some(skin.into()),
            },
        )
        .unwrap();
        team
    }

    #[test]
    fn test_default_team() {
        let team = Team::default();
        assert_eq!(team.slots.len(), 6);
        for (i, slot) in team.slots.iter().enumerate() {
            assert_eq!(usize::from(slot.slot), i + 1);
            assert!(slot.is_empty());
            assert_eq!(slot.tier, Tier::Base);
            assert_eq!(slot.skin, "None");
        }
        assert!(team.validate(&Catalog::builtin()).is_ok());
        assert_eq!(team.filled_slots().count(), 0);
    }

    #[test]
    fn test_validate_structure() {
        let catalog = Catalog::builtin();

        let mut short = Team::default();
        short.slots.pop();
        assert_eq!(short.validate(&catalog), Err(TeamError::WrongSlotCount(5)));

        let mut dup = Team::default();
        dup.slots[5].slot = 1;
        assert_eq!(dup.validate(&catalog), Err(TeamError::DuplicateSlot(1)));

        let mut out_of_range = Team::default();
        out_of_range.slots[0].slot = 7;
        assert_eq!(out_of_range.validate(&catalog), Err(TeamError::NoSuchSlot(7)));

        let mut zero = Team::default();
        zero.slots[0].slot = 0;
        assert_eq!(zero.validate(&catalog), Err(TeamError::NoSuchSlot(0)));
    }

    #[test]
    fn test_validate_contents() {
        let catalog = Catalog::builtin();

        let mut unknown = Team::default();
        unknown.slots[2].creature = Some("Pikachu".into());
        assert!(matches!(
            unknown.validate(&catalog),
            Err(TeamError::UnknownCreature { slot: 3, .. })
        ));

        let mut no_skin = Team::default();
        no_skin.slots[1].skin = String::new();
        assert_eq!(no_skin.validate(&catalog), Err(TeamError::EmptySkin(2)));
    }

    #[test]
    fn test_normalized_orders_slots() {
        let mut team = Team::default();
        team.slots.reverse();
        let team = team.normalized();
        let order: Vec<u8> = team.slots.iter().map(|s| s.slot).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut team = team_with(2, "Ucaclaw", Tier::Potent, "Crimsonite");

        team.apply(
            2,
            SlotUpdate {
                tier: Some(Tier::Perfect),
                ..Default::default()
            },
        )
        .unwrap();
        let slot = team.slot(2).unwrap();
        assert_eq!(slot.creature.as_deref(), Some("Ucaclaw"));
        assert_eq!(slot.tier, Tier::Perfect);
        assert_eq!(slot.skin, "Crimsonite");
    }

    #[test]
    fn test_apply_empty_resets_slot() {
        let mut team = team_with(4, "Ucaclaw", Tier::Perfect, "Crimsonite");
        team.apply(
            4,
            SlotUpdate {
                creature: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(team.slot(4), Some(&TeamSlot::empty(4)));
    }

    #[test]
    fn test_apply_unknown_slot() {
        let mut team = Team::default();
        assert_eq!(
            team.apply(9, SlotUpdate::default()).unwrap_err(),
            TeamError::NoSuchSlot(9)
        );
    }

    #[test]
    fn test_slot_update_json() {
        let update: SlotUpdate = serde_json::from_str(r#"{"tier":"C"}"#).unwrap();
        assert_eq!(update.creature, None);
        assert_eq!(update.tier, Some(Tier::Perfect));

        let update: SlotUpdate = serde_json::from_str(r#"{"creature":null}"#).unwrap();
        assert_eq!(update.creature, Some(None));

        let update: SlotUpdate = serde_json::from_str(r#"{"creature":"Kryo"}"#).unwrap();
        assert_eq!(update.creature, Some(Some("Kryo".into())));
    }

    #[test]
    fn test_clear() {
        let mut team = team_with(1, "Ucaclaw", Tier::Base, "None");
        assert_eq!(team.filled_slots().count(), 1);
        team.clear();
        assert_eq!(team, Team::default());
    }

    #[test]
    fn test_legacy_json_accepted() {
        let json = r#"{"slots":[
            {"slot":1,"coromon":"Ucaclaw","potentLevel":"B","specialSkin":"Crimsonite"},
            {"slot":2,"coromon":null,"potentLevel":"A","specialSkin":"None"},
            {"slot":3,"coromon":null,"potentLevel":"A","specialSkin":"None"},
            {"slot":4,"coromon":null,"potentLevel":"A","specialSkin":"None"},
            {"slot":5,"coromon":null,"potentLevel":"A","specialSkin":"None"},
            {"slot":6}
        ]}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert!(team.validate(&Catalog::builtin()).is_ok());
        let first = team.slot(1).unwrap();
        assert_eq!(first.creature.as_deref(), Some("Ucaclaw"));
        assert_eq!(first.tier, Tier::Potent);
        assert_eq!(first.skin, "Crimsonite");
        assert_eq!(team.slot(6), Some(&TeamSlot::empty(6)));

        let out = serde_json::to_value(first).unwrap();
        assert_eq!(
            out,
            serde_json::json!({"slot":1,"creature":"Ucaclaw","tier":"B","skin":"Crimsonite"})
        );
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!(Layout::parse_or_default(Some("row")), Layout::Row);
        assert_eq!(Layout::parse_or_default(Some("stack")), Layout::Stack);
        assert_eq!(Layout::parse_or_default(Some("grid")), Layout::Grid);
        assert_eq!(Layout::parse_or_default(Some("diagonal")), Layout::Grid);
        assert_eq!(Layout::parse_or_default(None), Layout::Grid);
    }

    #[test]
    fn test_overlay_resolves_filled_slots() {
        let mut team = team_with(3, "Armado", Tier::Base, "Galactic");
        team.apply(
            1,
            SlotUpdate {
                creature: Some(Some("Ucaclaw".into())),
                tier: Some(Tier::Potent),
                skin: None,
            },
        )
        .unwrap();

        let galactic = SkinRecord::new("Armado", "Galactic", Pattern::TierSkinFront)
            .with_tiers([Tier::Perfect]);
        let overlay = Overlay::build(&team, Layout::Row, |creature, skin| {
            (creature == "Armado" && skin == "Galactic").then(|| galactic.clone())
        });

        assert_eq!(overlay.layout, Layout::Row);
        assert_eq!(overlay.slots.len(), 2);

        let first = &overlay.slots[0];
        assert_eq!(first.slot, 1);
        assert_eq!(first.sprite, "Ucaclaw_B.gif");
        assert_eq!(first.sprite_url, "/sprites/Ucaclaw_B.gif");
        assert_eq!(first.tier_label, "Potent");
        assert_eq!(first.skin, None);

        let third = &overlay.slots[1];
        assert_eq!(third.slot, 3);
        assert_eq!(third.sprite, "Armado_C_Galactic_front.gif");
        assert_eq!(third.skin.as_deref(), Some("Galactic"));
    }

    #[test]
    fn test_overlay_of_empty_team() {
        let overlay = Overlay::build(&Team::default(), Layout::Grid, |_, _| None);
        assert!(overlay.slots.is_empty());
    }
}
