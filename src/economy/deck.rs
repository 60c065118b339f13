//! The production deck: one territory-bound card per provider region per
//! resource type, assigned once at game setup.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::resources::{
    RawMaterialType, SupplyKind, TechnologyType, ALL_RAW_MATERIALS, ALL_TECHNOLOGIES,
    CIVILIAN_ENERGY_CANDIDATES, WEAPONS_CAPABLE_CANDIDATES,
};
use crate::board::region::Region;

/// Identifier of a production card. Private inventory copies keep the id of
/// the deck card they were copied from.
pub type CardId = u32;

/// What a production card provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Raw(RawMaterialType),
    Tech(TechnologyType),
}

impl CardKind {
    pub const fn category(self) -> SupplyKind {
        match self {
            CardKind::Raw(raw) => raw.category(),
            CardKind::Tech(tech) => tech.product(),
        }
    }
}

/// A raw-material or technology card bound to its provider region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryCard {
    pub id: CardId,
    pub kind: CardKind,
    pub category: SupplyKind,
    pub origin: Region,
    pub used_this_turn: bool,
}

impl TerritoryCard {
    pub fn new(id: CardId, kind: CardKind, origin: Region) -> Self {
        TerritoryCard { id, kind, category: kind.category(), origin, used_this_turn: false }
    }
}

/// The global, contestable pool of production cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionDeck {
    pub cards: Vec<TerritoryCard>,
}

impl ProductionDeck {
    /// Assigns provider regions for every resource type and builds the deck.
    ///
    /// Each type picks up to `max_providers` regions from its shuffled
    /// candidate list. Uranium gets exactly `num_players` providers. Reactor
    /// technology takes `num_players` weapons-capable regions, padded to
    /// `max_providers` from the civilian energy list.
    pub fn assign(num_players: usize, max_providers: usize, rng: &mut impl Rng) -> Self {
        let mut cards = Vec::new();

        for raw in ALL_RAW_MATERIALS {
            let take = if raw.is_fuel() { num_players } else { max_providers };
            for region in pick(raw.candidates(), take, rng) {
                let id = cards.len() as CardId;
                cards.push(TerritoryCard::new(id, CardKind::Raw(raw), region));
            }
        }

        for tech in ALL_TECHNOLOGIES {
            let providers = if tech == TechnologyType::NuclearReactor {
                let mut chosen = pick(WEAPONS_CAPABLE_CANDIDATES, num_players, rng);
                let padding: Vec<Region> = CIVILIAN_ENERGY_CANDIDATES
                    .iter()
                    .copied()
                    .filter(|r| !chosen.contains(r))
                    .collect();
                let missing = max_providers.saturating_sub(chosen.len());
                chosen.extend(pick(&padding, missing, rng));
                chosen
            } else {
                pick(tech.candidates(), max_providers, rng)
            };
            for region in providers {
                let id = cards.len() as CardId;
                cards.push(TerritoryCard::new(id, CardKind::Tech(tech), region));
            }
        }

        ProductionDeck { cards }
    }

    pub fn get(&self, id: CardId) -> Option<&TerritoryCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut TerritoryCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// All cards bound to the given region.
    pub fn bound_to(&self, region: Region) -> impl Iterator<Item = &TerritoryCard> {
        self.cards.iter().filter(move |c| c.origin == region)
    }

    /// Provider regions assigned for a card kind.
    pub fn providers(&self, kind: CardKind) -> Vec<Region> {
        self.cards.iter().filter(|c| c.kind == kind).map(|c| c.origin).collect()
    }
}

/// Shuffles a candidate list and keeps the first `take` entries.
fn pick(candidates: &[Region], take: usize, rng: &mut impl Rng) -> Vec<Region> {
    let mut pool = candidates.to_vec();
    pool.shuffle(rng);
    pool.truncate(take);
    pool
}
