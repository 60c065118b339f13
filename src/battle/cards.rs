//! Battle deck and per-regiment modifiers.
//!
//! The battle deck has 60 cards: three regiments, four tiers, five variants
//! of each. Modifiers are signed per-regiment adjustments applied by the
//! clash comparator.

use std::fmt;
use std::ops::AddAssign;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::board::region::Biome;

pub const TIER_COUNT: u8 = 4;
pub const VARIANT_COUNT: u8 = 5;
pub const BATTLE_DECK_SIZE: usize = 3 * TIER_COUNT as usize * VARIANT_COUNT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regiment {
    Infantry,
    Artillery,
    Air,
}

pub const ALL_REGIMENTS: [Regiment; 3] = [Regiment::Infantry, Regiment::Artillery, Regiment::Air];

/// One battle card. `tier` is 1..=4, `variant` 0..5.
///
/// Deserializing checks both ranges, so a card read off the wire always
/// names one of the 60 deck cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BattleCard {
    pub regiment: Regiment,
    pub tier: u8,
    pub variant: u8,
}

#[derive(Deserialize)]
struct CardFields {
    regiment: Regiment,
    tier: u8,
    variant: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no battle card has tier {tier} and variant {variant}")]
pub struct InvalidCard {
    pub tier: u8,
    pub variant: u8,
}

impl<'de> Deserialize<'de> for BattleCard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let f = CardFields::deserialize(deserializer)?;
        BattleCard::new(f.regiment, f.tier, f.variant)
            .ok_or(InvalidCard { tier: f.tier, variant: f.variant })
            .map_err(de::Error::custom)
    }
}

impl BattleCard {
    /// A deck card, or `None` when `tier` or `variant` is out of range.
    pub fn new(regiment: Regiment, tier: u8, variant: u8) -> Option<BattleCard> {
        ((1..=TIER_COUNT).contains(&tier) && variant < VARIANT_COUNT).then_some(BattleCard { regiment, tier, variant })
    }

    /// Dense id in 0..60, regiment-major. Only meaningful for deck cards.
    pub const fn id(self) -> u8 {
        (self.regiment as u8) * TIER_COUNT * VARIANT_COUNT
            + self.tier.saturating_sub(1) * VARIANT_COUNT
            + self.variant
    }

    pub fn from_id(id: u8) -> Option<BattleCard> {
        if usize::from(id) >= BATTLE_DECK_SIZE {
            return None;
        }
        let per_regiment = TIER_COUNT * VARIANT_COUNT;
        let regiment = ALL_REGIMENTS[usize::from(id / per_regiment)];
        let rest = id % per_regiment;
        Some(BattleCard { regiment, tier: rest / VARIANT_COUNT + 1, variant: rest % VARIANT_COUNT })
    }
}

impl fmt::Display for BattleCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{}{}", self.regiment, self.tier, char::from(b'a'.saturating_add(self.variant)))
    }
}

/// All 60 cards in id order.
pub fn full_deck() -> Vec<BattleCard> {
    (0..BATTLE_DECK_SIZE as u8).filter_map(BattleCard::from_id).collect()
}

/// A freshly shuffled full deck.
pub fn shuffled_deck(rng: &mut impl Rng) -> Vec<BattleCard> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

/// Signed per-regiment adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub infantry: i8,
    pub artillery: i8,
    pub air: i8,
}

impl Modifiers {
    pub const fn for_regiment(self, regiment: Regiment) -> i8 {
        match regiment {
            Regiment::Infantry => self.infantry,
            Regiment::Artillery => self.artillery,
            Regiment::Air => self.air,
        }
    }

    /// Penalty an attacker takes for crossing the sea.
    pub const fn sea_crossing() -> Self {
        Modifiers { infantry: -1, artillery: 1, air: 0 }
    }

    /// Defense bonus of a single biome.
    pub const fn biome(biome: Biome) -> Self {
        match biome {
            Biome::Mountain => Modifiers { infantry: 0, artillery: 1, air: 0 },
            Biome::Jungle => Modifiers { infantry: 0, artillery: 1, air: 1 },
            Biome::Urban => Modifiers { infantry: 0, artillery: 0, air: 1 },
            Biome::Plain => Modifiers { infantry: 1, artillery: 0, air: 0 },
        }
    }

    /// Summed defense bonus of every biome in a region.
    pub fn terrain(biomes: &[Biome]) -> Self {
        let mut total = Modifiers::default();
        for b in biomes {
            total += Modifiers::biome(*b);
        }
        total
    }
}

impl AddAssign for Modifiers {
    fn add_assign(&mut self, rhs: Self) {
        self.infantry += rhs.infantry;
        self.artillery += rhs.artillery;
        self.air += rhs.air;
    }
}
