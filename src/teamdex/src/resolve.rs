//! Sprite path resolution

use crate::catalog::{Catalog, NO_SKIN};
use crate::classify::{Pattern, SPRITE_EXTENSION};
use crate::scan::{is_default_skin, SkinRecord, SkinRecords};
use crate::tier::Tier;

/// Compute the sprite filename for a creature at a tier wearing a skin.
///
/// Returns an empty string when there is no creature. Without a skin, or
/// without scan data for it, the baseline `{creature}_{tier}.gif` name is
/// used. Otherwise the record's naming convention decides; for
/// `tier_skin_front` a tier with no sprite falls back to the lowest tier
/// that has one.
///
/// ```
/// use teamdex::{resolve, Pattern, SkinRecord, Tier};
///
/// assert_eq!(resolve(Some("Ucaclaw"), Tier::Potent, "None", None), "Ucaclaw_B.gif");
///
/// let record = SkinRecord::new("Armado", "Galactic", Pattern::TierSkinFront)
///     .with_tiers([Tier::Potent, Tier::Perfect]);
/// assert_eq!(
///     resolve(Some("Armado"), Tier::Base, "Galactic", Some(&record)),
///     "Armado_B_Galactic_front.gif"
/// );
/// ```
pub fn resolve(
    creature: Option<&str>,
    tier: Tier,
    skin: &str,
    record: Option<&SkinRecord>,
) -> String {
    let Some(creature) = creature else {
        return String::new();
    };

    let record = match record {
        Some(record) if !is_default_skin(skin) => record,
        _ => return format!("{creature}_{tier}{SPRITE_EXTENSION}"),
    };

    match &record.pattern {
        Pattern::TierSkinFront => {
            let tier = if record.tiers_observed.contains(&tier) {
                tier.code()
            } else {
                record.lowest_tier().map_or("A", Tier::code)
            };
            format!("{creature}_{tier}_{skin}_front{SPRITE_EXTENSION}")
        }
        Pattern::SkinFront => format!("{creature}_{skin}_front{SPRITE_EXTENSION}"),
        Pattern::SkinTier | Pattern::Standard | Pattern::Other(_) => {
            format!("{creature}_{skin}_{tier}{SPRITE_EXTENSION}")
        }
    }
}

/// Pick the record for `skin` out of a creature's records
pub fn record_for<'a, I>(records: I, skin: &str) -> Option<&'a SkinRecord>
where
    I: IntoIterator<Item = &'a SkinRecord>,
{
    records.into_iter().find(|r| r.skin_name == skin)
}

/// Skins a creature can wear, "None" first.
///
/// Scan data wins when the creature has any records; otherwise the catalog's
/// static table is used.
pub fn available_skins(
    creature: Option<&str>,
    records: &SkinRecords,
    catalog: &Catalog,
) -> Vec<String> {
    let Some(creature) = creature else {
        return vec![NO_SKIN.to_string()];
    };

    let mut scanned = records.by_creature(creature).peekable();
    if scanned.peek().is_none() {
        return catalog.static_skins(creature);
    }

    let mut skins = vec![NO_SKIN.to_string()];
    skins.extend(
        scanned
            .filter(|r| !is_default_skin(&r.skin_name))
            .map(|r| r.skin_name.clone()),
    );
    skins
}
