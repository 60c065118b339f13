//! Player records.
//!
//! A player owns supply stockpiles, a private inventory of production cards
//! taken as spoils, unique special cards, and the silo bookkeeping used by
//! the nuclear track. Players are never removed mid-game; only their fields
//! are reset.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::region::Region;
use crate::economy::deck::{CardId, TerritoryCard};
use crate::economy::resources::SupplyKind;
use crate::mission::catalog::MissionId;

/// Seat index of a player, stable for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A fungible supply unit produced from one technology + raw material pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyItem {
    pub id: u32,
    pub kind: SupplyKind,
    pub origin: Region,
}

/// The three supply stockpiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub food: Vec<SupplyItem>,
    pub manufacture: Vec<SupplyItem>,
    pub energy: Vec<SupplyItem>,
}

impl Supplies {
    pub fn pool(&self, kind: SupplyKind) -> &[SupplyItem] {
        match kind {
            SupplyKind::Food => &self.food,
            SupplyKind::Manufacture => &self.manufacture,
            SupplyKind::Energy => &self.energy,
        }
    }

    fn pool_mut(&mut self, kind: SupplyKind) -> &mut Vec<SupplyItem> {
        match kind {
            SupplyKind::Food => &mut self.food,
            SupplyKind::Manufacture => &mut self.manufacture,
            SupplyKind::Energy => &mut self.energy,
        }
    }

    pub fn push(&mut self, item: SupplyItem) {
        self.pool_mut(item.kind).push(item);
    }

    /// Looks up a supply item in any pool.
    pub fn find(&self, id: u32) -> Option<SupplyItem> {
        self.food
            .iter()
            .chain(&self.manufacture)
            .chain(&self.energy)
            .find(|s| s.id == id)
            .copied()
    }

    /// Removes and returns a supply item by id.
    pub fn remove(&mut self, id: u32) -> Option<SupplyItem> {
        let item = self.find(id)?;
        let pool = self.pool_mut(item.kind);
        pool.retain(|s| s.id != id);
        Some(item)
    }

    pub fn count(&self, kind: SupplyKind) -> usize {
        self.pool(kind).len()
    }

    pub fn total(&self) -> usize {
        self.food.len() + self.manufacture.len() + self.energy.len()
    }
}

/// What a special card lets its holder do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialCardKind {
    NuclearDesign,
    SecretMineral,
    /// Granted by the Antarctic route mission.
    AntarcticBase,
    /// Granted by the intelligence network mission; spent once per turn.
    EspionageHq,
    /// Intelligence on another player's secret mineral region.
    WarSecret { target: PlayerId, mineral: Region },
    ProxyVictory,
}

/// A unique capability card anchored to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCard {
    pub id: u32,
    pub kind: SpecialCardKind,
    pub origin: Region,
    /// Mission whose effect this card depends on, if any.
    pub mission: Option<MissionId>,
    pub transferable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiloState {
    Construction,
    Active,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiloStatus {
    pub state: SiloState,
    pub turns_remaining: u8,
}

impl SiloStatus {
    /// Advances the silo by one owner turn-start. Construction and cooldown
    /// both finish in the active state.
    pub fn tick(&mut self) {
        if self.state == SiloState::Active {
            return;
        }
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        if self.turns_remaining == 0 {
            self.state = SiloState::Active;
        }
    }
}

/// An activated mission and the base region it is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMission {
    pub mission: MissionId,
    pub base: Region,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Region holding this player's secret mineral.
    pub secret_mineral: Region,
    pub supplies: Supplies,
    /// Production cards taken as spoils of conquest.
    pub inventory: Vec<TerritoryCard>,
    pub special_cards: Vec<SpecialCard>,
    pub silos: Vec<Region>,
    pub silo_status: BTreeMap<Region, SiloStatus>,
    pub silo_fuel_cards: BTreeMap<Region, CardId>,
    pub nuclear_deployment_active: bool,
    /// Silo backing the current deployment.
    pub deployment_silo: Option<Region>,
    pub active_special_missions: Vec<ActiveMission>,
    pub used_espionage_hqs: Vec<u32>,
    pub used_attack_sources: Vec<Region>,
}

impl Player {
    pub fn new(id: PlayerId, secret_mineral: Region) -> Self {
        Player {
            id,
            name: format!("Player {}", id.0 + 1),
            secret_mineral,
            supplies: Supplies::default(),
            inventory: Vec::new(),
            special_cards: Vec::new(),
            silos: Vec::new(),
            silo_status: BTreeMap::new(),
            silo_fuel_cards: BTreeMap::new(),
            nuclear_deployment_active: false,
            deployment_silo: None,
            active_special_missions: Vec::new(),
            used_espionage_hqs: Vec::new(),
            used_attack_sources: Vec::new(),
        }
    }

    pub fn has_special(&self, kind: SpecialCardKind) -> bool {
        self.special_cards.iter().any(|c| c.kind == kind)
    }

    pub fn special_of(&self, kind: SpecialCardKind) -> Option<&SpecialCard> {
        self.special_cards.iter().find(|c| c.kind == kind)
    }

    pub fn has_mission(&self, mission: MissionId) -> bool {
        self.active_special_missions.iter().any(|m| m.mission == mission)
    }

    pub fn silo_state(&self, region: Region) -> Option<SiloState> {
        self.silo_status.get(&region).map(|s| s.state)
    }

    /// Drops every trace of a silo. Returns true if it was backing the
    /// active deployment, which is cancelled.
    pub fn remove_silo(&mut self, region: Region) -> bool {
        self.silos.retain(|r| *r != region);
        self.silo_status.remove(&region);
        self.silo_fuel_cards.remove(&region);
        if self.nuclear_deployment_active && self.deployment_silo == Some(region) {
            self.nuclear_deployment_active = false;
            self.deployment_silo = None;
            return true;
        }
        false
    }

    /// Clears the deployment flag and puts every silo into cooldown.
    pub fn stand_down(&mut self, cooldown_turns: u8) {
        self.nuclear_deployment_active = false;
        self.deployment_silo = None;
        for region in &self.silos {
            self.silo_status.insert(
                *region,
                SiloStatus { state: SiloState::Cooldown, turns_remaining: cooldown_turns },
            );
        }
    }
}
