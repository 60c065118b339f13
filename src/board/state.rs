//! World state.
//!
//! Holds the complete snapshot of a game at a given point in time: the
//! ownership map, player records, production deck, calendar, and any
//! battle in progress. Every action is applied to a clone of this value.

use serde::{Deserialize, Serialize};

use super::adjacency::ExtraEdge;
use super::player::{Player, PlayerId};
use super::region::{Region, ALL_REGIONS, REGION_COUNT};
use super::route::has_route;
use crate::battle::orchestrator::BattleState;
use crate::config::RulesConfig;
use crate::economy::deck::ProductionDeck;
use crate::mission::engine::mission_edges;
use crate::protocol::snapshot::SnapshotError;

/// Who holds a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Unclaimed,
    /// Wiped out by a nuclear strike; untraversable and unattackable.
    Destroyed,
    Held(PlayerId),
}

impl Owner {
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Owner::Held(p) => Some(p),
            _ => None,
        }
    }
}

/// Region -> owner, with exactly one entry per region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Owner>", into = "Vec<Owner>")]
pub struct OwnershipMap(Vec<Owner>);

impl OwnershipMap {
    pub fn new() -> Self {
        OwnershipMap(vec![Owner::Unclaimed; REGION_COUNT])
    }

    pub fn get(&self, region: Region) -> Owner {
        self.0[region as usize]
    }

    pub fn set(&mut self, region: Region, owner: Owner) {
        self.0[region as usize] = owner;
    }

    pub fn is_held_by(&self, region: Region, player: PlayerId) -> bool {
        self.get(region) == Owner::Held(player)
    }

    /// All regions held by `player`, in index order.
    pub fn regions_of(&self, player: PlayerId) -> Vec<Region> {
        ALL_REGIONS.iter().copied().filter(|r| self.is_held_by(*r, player)).collect()
    }

    pub fn count_of(&self, player: PlayerId) -> usize {
        self.0.iter().filter(|o| **o == Owner::Held(player)).count()
    }
}

impl Default for OwnershipMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Owner>> for OwnershipMap {
    type Error = SnapshotError;

    fn try_from(owners: Vec<Owner>) -> Result<Self, Self::Error> {
        if owners.len() != REGION_COUNT {
            return Err(SnapshotError::OwnershipLength { expected: REGION_COUNT, found: owners.len() });
        }
        Ok(OwnershipMap(owners))
    }
}

impl From<OwnershipMap> for Vec<Owner> {
    fn from(map: OwnershipMap) -> Self {
        map.0
    }
}

/// In-game calendar and turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    pub year: u16,
    pub month: u8,
    pub turn_order: Vec<PlayerId>,
    pub turn_order_index: usize,
    /// Completed rounds.
    pub round: u32,
}

impl GameClock {
    pub fn current(&self) -> Option<PlayerId> {
        self.turn_order.get(self.turn_order_index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryReason {
    NuclearStrike,
    Domination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Over { winner: PlayerId, reason: VictoryReason },
}

/// A non-aggression clause: `signer` may not attack `counterpart` from the
/// listed regions (any region when empty) until the end of `until_year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treaty {
    pub signer: PlayerId,
    pub counterpart: PlayerId,
    pub forbidden_sources: Vec<Region>,
    pub until_year: u16,
}

impl Treaty {
    pub fn forbids(&self, attacker: PlayerId, defender: PlayerId, source: Region) -> bool {
        self.signer == attacker
            && self.counterpart == defender
            && (self.forbidden_sources.is_empty() || self.forbidden_sources.contains(&source))
    }
}

/// An attack source chosen but not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttack {
    pub attacker: PlayerId,
    pub source: Region,
    pub target: Region,
}

/// The proxy-war country and whoever completed the mission on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyWar {
    pub region: Region,
    pub claimed_by: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub rules: RulesConfig,
    pub ownership: OwnershipMap,
    pub players: Vec<Player>,
    pub deck: ProductionDeck,
    pub clock: GameClock,
    pub battle: Option<BattleState>,
    pub pending_attack: Option<PendingAttack>,
    pub treaties: Vec<Treaty>,
    pub proxy_war: Option<ProxyWar>,
    pub status: GameStatus,
    /// Next id handed out for supply items and special cards.
    pub next_id: u32,
}

impl WorldState {
    /// Creates a state with no regions claimed and an empty deck.
    ///
    /// Secret minerals are placed on the first regions in index order and
    /// the turn order is seat order. Useful for building scenarios by hand;
    /// real games start from `WorldState::setup`.
    pub fn empty(num_players: usize, rules: RulesConfig) -> Self {
        let players: Vec<Player> = (0..num_players)
            .map(|i| Player::new(PlayerId(i as u8), ALL_REGIONS[i % REGION_COUNT]))
            .collect();
        let clock = GameClock {
            year: rules.start_year,
            month: rules.start_month,
            turn_order: players.iter().map(|p| p.id).collect(),
            turn_order_index: 0,
            round: 0,
        };
        WorldState {
            rules,
            ownership: OwnershipMap::new(),
            players,
            deck: ProductionDeck::default(),
            clock,
            battle: None,
            pending_attack: None,
            treaties: Vec::new(),
            proxy_war: None,
            status: GameStatus::InProgress,
            next_id: 0,
        }
    }

    pub fn owner(&self, region: Region) -> Owner {
        self.ownership.get(region)
    }

    pub fn owns(&self, player: PlayerId, region: Region) -> bool {
        self.ownership.is_held_by(region, player)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.clock.current()
    }

    /// A player is still in the game while they hold at least one region.
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.ownership.count_of(player) > 0
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over { .. })
    }

    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Edges granted by the player's active missions.
    pub fn mission_edges(&self, player: PlayerId) -> Vec<ExtraEdge> {
        mission_edges(self, player)
    }

    /// Supply-route query including the player's mission edges.
    pub fn supply_route(&self, start: Region, end: Region, player: PlayerId) -> bool {
        let extra = self.mission_edges(player);
        has_route(start, end, player, &self.ownership, &extra)
    }
}
