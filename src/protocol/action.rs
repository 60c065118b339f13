//! Inbound player actions.
//!
//! Actions arrive as JSON objects tagged by `type`, with the acting player
//! alongside, e.g. `{"player":0,"type":"end_turn"}`.

use serde::{Deserialize, Serialize};

use crate::battle::cards::BattleCard;
use crate::board::player::PlayerId;
use crate::board::region::Region;
use crate::economy::deck::CardId;
use crate::mission::catalog::MissionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SelectAttackSource { source: Region, target: Region },
    ConfirmAttack,
    CancelAttack,
    SubmitClashCard { card: BattleCard },
    /// Spend supply items (by id) during a battle for extra hand cards.
    RequestResupply { supplies: Vec<u32> },
    /// Craft a supply item from a technology card and a raw-material card.
    ProduceSupply { tech: CardId, raw: CardId },
    ActivateMission {
        mission: MissionId,
        base: Region,
        #[serde(default)]
        cards: Vec<CardId>,
    },
    GenerateNuclearDesign { region: Region, cards: Vec<CardId> },
    ExtractMineral { cards: Vec<CardId> },
    ConstructSilo { region: Region, cards: Vec<CardId> },
    AssignSiloFuel { silo: Region, card: CardId },
    InitiateDeployment { silo: Region },
    SignTreaty {
        with: PlayerId,
        #[serde(default)]
        forbidden_sources: Vec<Region>,
        until_year: u16,
    },
    Espionage { hq: u32, target: PlayerId },
    EndTurn,
}

impl Action {
    /// Actions a player may take while a battle they fight is running.
    pub const fn is_battle_action(&self) -> bool {
        matches!(self, Action::SubmitClashCard { .. } | Action::RequestResupply { .. })
    }
}

/// An action attributed to the player performing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub player: PlayerId,
    #[serde(flatten)]
    pub action: Action,
}

impl PlayerAction {
    pub fn new(player: PlayerId, action: Action) -> Self {
        PlayerAction { player, action }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
