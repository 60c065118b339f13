//! The single entry point for player actions.
//!
//! `apply_action` is a pure function of the current world and the action:
//! it works on a clone of the state and of the random source, and hands
//! both back only if the action succeeds. A rejected action leaves the
//! caller's state and RNG untouched.

use rand::Rng;
use tracing::debug;

use super::conquest::resolve_battle;
use super::diplomacy::sign_treaty;
use super::turn::end_turn;
use crate::battle::cards::BattleCard;
use crate::battle::comparator::ClashComparator;
use crate::battle::orchestrator::{
    cancel_attack, confirm_attack, request_resupply, select_attack_source, submit_clash_card,
};
use crate::board::player::PlayerId;
use crate::board::region::Region;
use crate::board::state::WorldState;
use crate::economy::deck::{CardId, CardKind};
use crate::economy::production::produce_supply;
use crate::economy::resources::{RawMaterialType, TechnologyType};
use crate::mission::catalog::MissionId;
use crate::mission::engine::activate_mission;
use crate::mission::espionage::run_espionage;
use crate::nuclear::stages::{
    assign_silo_fuel, construct_silo, extract_mineral, generate_nuclear_design, initiate_deployment,
};
use crate::protocol::action::{Action, PlayerAction};
use crate::protocol::event::Event;

/// Why an action was rejected. Every variant is a normal, recoverable
/// outcome; the world is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("a battle is in progress")]
    BattleInProgress,
    #[error("no battle is in progress")]
    NoBattle,
    #[error("{0} is not part of the battle")]
    NotInBattle(PlayerId),
    #[error("not this side's turn to act in the battle")]
    OutOfPhase,
    #[error("no attack source has been selected")]
    NoPendingAttack,
    #[error("{0:?} is already held by the attacker")]
    OwnTerritory(Region),
    #[error("{0:?} has been destroyed")]
    UnattackableRegion(Region),
    #[error("no legal attack source for {0:?}")]
    NoAttackSources(Region),
    #[error("{from:?} cannot attack {target:?}")]
    IllegalAttackSource { from: Region, target: Region },
    #[error("battle card {0} is not in hand")]
    CardNotInHand(BattleCard),
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("card {0} is not available to this player")]
    CardUnavailable(CardId),
    #[error("card {0} was already used this turn")]
    CardAlreadyUsed(CardId),
    #[error("card {0} listed twice")]
    DuplicateCard(CardId),
    #[error("card {0} is the wrong kind for this action")]
    WrongCardKind(CardId),
    #[error("{tech:?} cannot be paired with {raw:?}")]
    TechnologyMismatch { tech: TechnologyType, raw: RawMaterialType },
    #[error("cards {offered:?} do not match required {required:?}")]
    CardRequirement { required: Vec<CardKind>, offered: Vec<CardKind> },
    #[error("unknown supply item {0}")]
    UnknownSupply(u32),
    #[error("no supply items selected")]
    EmptyResupply,
    #[error("no supply route from {from:?} to {to:?}")]
    NoSupplyRoute { from: Region, to: Region },
    #[error("{0:?} is not held by the player")]
    RegionNotHeld(Region),
    #[error("{0:?} is not nuclear capable")]
    NotNuclearCapable(Region),
    #[error("the {0} stage has not been completed")]
    StageLocked(&'static str),
    #[error("the {0} stage is already complete")]
    StageComplete(&'static str),
    #[error("{0:?} already has a silo")]
    SiloExists(Region),
    #[error("no silo in {0:?}")]
    NoSilo(Region),
    #[error("the silo in {0:?} is not active")]
    SiloNotActive(Region),
    #[error("the silo in {0:?} has no fuel assigned")]
    NoFuel(Region),
    #[error("a deployment is already active")]
    DeploymentActive,
    #[error("mission {0:?} is not available")]
    MissionUnavailable(MissionId),
    #[error("mission {0:?} is already active")]
    MissionAlreadyActive(MissionId),
    #[error("{base:?} is not a valid base for {mission:?}")]
    InvalidMissionBase { mission: MissionId, base: Region },
    #[error("unknown special card {0}")]
    UnknownSpecialCard(u32),
    #[error("espionage HQ {0} was already used this turn")]
    EspionageUsed(u32),
    #[error("{0} is not a valid target")]
    InvalidTarget(PlayerId),
    #[error("treaty would expire in {0}, before the current year")]
    TreatyExpired(u16),
}

impl ActionError {
    /// Stable reason code for the wire protocol.
    pub const fn code(&self) -> &'static str {
        match self {
            ActionError::GameOver => "game_over",
            ActionError::UnknownPlayer(_) => "unknown_player",
            ActionError::NotYourTurn(_) => "not_your_turn",
            ActionError::BattleInProgress => "battle_in_progress",
            ActionError::NoBattle => "no_battle",
            ActionError::NotInBattle(_) => "not_in_battle",
            ActionError::OutOfPhase => "out_of_phase",
            ActionError::NoPendingAttack => "no_pending_attack",
            ActionError::OwnTerritory(_) => "own_territory",
            ActionError::UnattackableRegion(_) => "unattackable_region",
            ActionError::NoAttackSources(_) => "no_attack_sources",
            ActionError::IllegalAttackSource { .. } => "illegal_attack_source",
            ActionError::CardNotInHand(_) => "card_not_in_hand",
            ActionError::UnknownCard(_) => "unknown_card",
            ActionError::CardUnavailable(_) => "card_unavailable",
            ActionError::CardAlreadyUsed(_) => "card_already_used",
            ActionError::DuplicateCard(_) => "duplicate_card",
            ActionError::WrongCardKind(_) => "wrong_card_kind",
            ActionError::TechnologyMismatch { .. } => "technology_mismatch",
            ActionError::CardRequirement { .. } => "card_requirement",
            ActionError::UnknownSupply(_) => "unknown_supply",
            ActionError::EmptyResupply => "empty_resupply",
            ActionError::NoSupplyRoute { .. } => "no_supply_route",
            ActionError::RegionNotHeld(_) => "region_not_held",
            ActionError::NotNuclearCapable(_) => "not_nuclear_capable",
            ActionError::StageLocked(_) => "stage_locked",
            ActionError::StageComplete(_) => "stage_complete",
            ActionError::SiloExists(_) => "silo_exists",
            ActionError::NoSilo(_) => "no_silo",
            ActionError::SiloNotActive(_) => "silo_not_active",
            ActionError::NoFuel(_) => "no_fuel",
            ActionError::DeploymentActive => "deployment_active",
            ActionError::MissionUnavailable(_) => "mission_unavailable",
            ActionError::MissionAlreadyActive(_) => "mission_already_active",
            ActionError::InvalidMissionBase { .. } => "invalid_mission_base",
            ActionError::UnknownSpecialCard(_) => "unknown_special_card",
            ActionError::EspionageUsed(_) => "espionage_used",
            ActionError::InvalidTarget(_) => "invalid_target",
            ActionError::TreatyExpired(_) => "treaty_expired",
        }
    }
}

/// The result of a successful action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorldState,
    pub events: Vec<Event>,
}

/// Applies one action to a copy of `state`.
///
/// On success the advanced RNG is written back to `rng`; on failure neither
/// `state` nor `rng` changes.
pub fn apply_action<R: Rng + Clone>(
    state: &WorldState,
    action: &PlayerAction,
    rng: &mut R,
    comparator: &dyn ClashComparator,
) -> Result<Transition, ActionError> {
    let mut next = state.clone();
    let mut local_rng = rng.clone();
    match apply_in_place(&mut next, action, &mut local_rng, comparator) {
        Ok(events) => {
            *rng = local_rng;
            Ok(Transition { state: next, events })
        }
        Err(e) => {
            debug!(player = %action.player, code = e.code(), "action rejected: {}", e);
            Err(e)
        }
    }
}

fn check_turn(state: &WorldState, player: PlayerId) -> Result<(), ActionError> {
    if state.current_player() != Some(player) {
        return Err(ActionError::NotYourTurn(player));
    }
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }
    Ok(())
}

fn apply_in_place<R: Rng>(
    state: &mut WorldState,
    action: &PlayerAction,
    rng: &mut R,
    comparator: &dyn ClashComparator,
) -> Result<Vec<Event>, ActionError> {
    if state.is_over() {
        return Err(ActionError::GameOver);
    }
    let player = action.player;
    if state.player(player).is_none() {
        return Err(ActionError::UnknownPlayer(player));
    }

    // Battle actions may come from the defender, out of turn.
    if !action.action.is_battle_action() {
        check_turn(state, player)?;
    }
    match &action.action {
        Action::SubmitClashCard { card } => match submit_clash_card(state, player, *card, comparator)? {
            Some(outcome) => Ok(resolve_battle(state, outcome)),
            None => Ok(Vec::new()),
        },
        Action::RequestResupply { supplies } => {
            request_resupply(state, player, supplies)?;
            Ok(Vec::new())
        }
        other => apply_turn_action(state, player, other, rng),
    }
}

fn apply_turn_action<R: Rng>(
    state: &mut WorldState,
    player: PlayerId,
    action: &Action,
    rng: &mut R,
) -> Result<Vec<Event>, ActionError> {
    let events = match action {
        Action::SelectAttackSource { source, target } => {
            select_attack_source(state, player, *source, *target)?;
            Vec::new()
        }
        Action::ConfirmAttack => {
            confirm_attack(state, player, rng)?;
            Vec::new()
        }
        Action::CancelAttack => {
            cancel_attack(state, player)?;
            Vec::new()
        }
        Action::ProduceSupply { tech, raw } => {
            produce_supply(state, player, *tech, *raw)?;
            Vec::new()
        }
        Action::ActivateMission { mission, base, cards } => {
            activate_mission(state, player, *mission, *base, cards)?;
            Vec::new()
        }
        Action::GenerateNuclearDesign { region, cards } => {
            generate_nuclear_design(state, player, *region, cards)?;
            Vec::new()
        }
        Action::ExtractMineral { cards } => {
            extract_mineral(state, player, cards)?;
            Vec::new()
        }
        Action::ConstructSilo { region, cards } => {
            construct_silo(state, player, *region, cards)?;
            Vec::new()
        }
        Action::AssignSiloFuel { silo, card } => {
            assign_silo_fuel(state, player, *silo, *card)?;
            Vec::new()
        }
        Action::InitiateDeployment { silo } => vec![initiate_deployment(state, player, *silo)?],
        Action::SignTreaty { with, forbidden_sources, until_year } => {
            sign_treaty(state, player, *with, forbidden_sources, *until_year)?;
            Vec::new()
        }
        Action::Espionage { hq, target } => vec![run_espionage(state, player, *hq, *target)?],
        Action::EndTurn => end_turn(state, player, rng)?,
        Action::SubmitClashCard { .. } | Action::RequestResupply { .. } => {
            return Err(ActionError::NoBattle);
        }
    };
    Ok(events)
}
