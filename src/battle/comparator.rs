//! Clash comparison.
//!
//! The rule deciding a single clash is a strategy injected into the engine.
//! `TierComparator` is the stock rule.

use serde::{Deserialize, Serialize};

use super::cards::{BattleCard, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashOutcome {
    pub winner: Side,
    pub reason: String,
}

/// Decides the winner of one attacker card against one defender card.
///
/// `attacker_mods` and `defender_mods` are the battle's computed bonuses.
/// Implementations must be deterministic.
pub trait ClashComparator: Send + Sync {
    fn compare(
        &self,
        attacker: BattleCard,
        defender: BattleCard,
        attacker_mods: Modifiers,
        defender_mods: Modifiers,
    ) -> ClashOutcome;
}

/// Tier plus the side's modifier for the relevant regiment; ties go to the
/// defender.
///
/// The attacker's modifier is read for its own regiment. The defender's
/// bonuses are "against" a regiment, so they are read for the attacking
/// card's regiment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TierComparator;

impl ClashComparator for TierComparator {
    fn compare(
        &self,
        attacker: BattleCard,
        defender: BattleCard,
        attacker_mods: Modifiers,
        defender_mods: Modifiers,
    ) -> ClashOutcome {
        let atk = i16::from(attacker.tier) + i16::from(attacker_mods.for_regiment(attacker.regiment));
        let def = i16::from(defender.tier) + i16::from(defender_mods.for_regiment(attacker.regiment));
        let winner = if atk > def { Side::Attacker } else { Side::Defender };
        let verdict = match atk.cmp(&def) {
            std::cmp::Ordering::Greater => "attacker prevails",
            std::cmp::Ordering::Less => "defender prevails",
            std::cmp::Ordering::Equal => "tie holds for the defender",
        };
        ClashOutcome { winner, reason: format!("{} ({}) vs {} ({}): {}", attacker, atk, defender, def, verdict) }
    }
}
