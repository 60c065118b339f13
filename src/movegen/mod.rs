//! Legal action generation.
//!
//! Enumerates candidate actions for a player and keeps those the rules
//! engine accepts. Treaties are left out: their clause space is open-ended
//! and they never change whether other actions are legal this turn.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::battle::comparator::{ClashComparator, TierComparator};
use crate::battle::orchestrator::legal_attack_sources;
use crate::board::player::{PlayerId, SiloState, SpecialCardKind};
use crate::board::region::{Region, ALL_REGIONS};
use crate::board::state::{Owner, WorldState};
use crate::economy::deck::{CardId, CardKind};
use crate::economy::production::check_card;
use crate::mission::engine::visible_missions;
use crate::nuclear::stages::{DESIGN_CARDS, MINERAL_CARDS, SILO_CARDS};
use crate::protocol::action::{Action, PlayerAction};
use crate::resolve::apply_action;

/// Every legal action for `player` in `state`.
pub fn legal_actions(state: &WorldState, player: PlayerId) -> Vec<Action> {
    legal_actions_with(state, player, &TierComparator)
}

/// `legal_actions` against a specific clash comparator.
pub fn legal_actions_with(state: &WorldState, player: PlayerId, comparator: &dyn ClashComparator) -> Vec<Action> {
    // The dry run only needs some RNG; rejection never depends on it.
    let rng = SmallRng::seed_from_u64(0);
    candidates(state, player)
        .into_iter()
        .filter(|action| {
            let candidate = PlayerAction::new(player, action.clone());
            apply_action(state, &candidate, &mut rng.clone(), comparator).is_ok()
        })
        .collect()
}

/// Picks a random legal action for `player`.
///
/// `EndTurn` is taken only one time in five while anything else is legal,
/// so random games actually fight and build.
pub fn random_action(state: &WorldState, player: PlayerId, rng: &mut impl Rng) -> Option<Action> {
    let legal = legal_actions(state, player);
    let (ends, others): (Vec<Action>, Vec<Action>) = legal.into_iter().partition(|a| *a == Action::EndTurn);
    if !others.is_empty() && (ends.is_empty() || rng.gen_bool(0.8)) {
        return others.choose(rng).cloned();
    }
    ends.into_iter().next()
}

/// The player who can act right now: the battle side to move, else the
/// current turn holder.
pub fn acting_player(state: &WorldState) -> Option<PlayerId> {
    if state.is_over() {
        return None;
    }
    match &state.battle {
        Some(battle) => battle.to_act(),
        None => state.current_player(),
    }
}

fn candidates(state: &WorldState, player: PlayerId) -> Vec<Action> {
    let mut out = Vec::new();
    let Some(p) = state.player(player) else {
        return out;
    };

    if let Some(battle) = &state.battle {
        if let Some(side) = battle.side_of(player) {
            for card in battle.hand(side) {
                out.push(Action::SubmitClashCard { card: *card });
            }
            let supplies: Vec<u32> =
                [&p.supplies.food, &p.supplies.manufacture, &p.supplies.energy].into_iter().flatten().map(|s| s.id).collect();
            if !supplies.is_empty() {
                out.push(Action::RequestResupply { supplies });
            }
        }
        return out;
    }
    if state.current_player() != Some(player) {
        return out;
    }

    if state.pending_attack.is_some() {
        out.push(Action::ConfirmAttack);
        out.push(Action::CancelAttack);
    } else {
        for target in ALL_REGIONS {
            if matches!(state.owner(target), Owner::Held(o) if o == player) {
                continue;
            }
            for source in legal_attack_sources(state, player, target) {
                out.push(Action::SelectAttackSource { source, target });
            }
        }
    }

    let spendable: Vec<(CardId, CardKind)> = all_card_ids(state, player)
        .into_iter()
        .filter_map(|id| check_card(state, player, id, None).ok().map(|c| (c.id, c.kind)))
        .collect();
    for (tech, tk) in &spendable {
        for (raw, rk) in &spendable {
            if let (CardKind::Tech(t), CardKind::Raw(r)) = (tk, rk) {
                if t.required_raw() == *r {
                    out.push(Action::ProduceSupply { tech: *tech, raw: *raw });
                }
            }
        }
    }

    for mission in visible_missions(state, player) {
        let template = mission.template();
        for base in template.bases {
            if let Some(cards) = pick_cards(state, player, template.cards, *base) {
                out.push(Action::ActivateMission { mission, base: *base, cards });
            }
        }
    }

    let held = state.ownership.regions_of(player);
    for region in held.iter().filter(|r| r.is_nuclear_capable()) {
        if let Some(cards) = pick_cards(state, player, &DESIGN_CARDS, *region) {
            out.push(Action::GenerateNuclearDesign { region: *region, cards });
        }
    }
    if let Some(cards) = pick_cards(state, player, &MINERAL_CARDS, p.secret_mineral) {
        out.push(Action::ExtractMineral { cards });
    }
    for region in &held {
        if let Some(cards) = pick_cards(state, player, &SILO_CARDS, *region) {
            out.push(Action::ConstructSilo { region: *region, cards });
        }
    }
    for silo in &p.silos {
        if p.silo_state(*silo) != Some(SiloState::Active) {
            continue;
        }
        for (id, kind) in &spendable {
            if matches!(kind, CardKind::Raw(r) if r.is_fuel()) && p.silo_fuel_cards.get(silo) != Some(id) {
                out.push(Action::AssignSiloFuel { silo: *silo, card: *id });
            }
        }
        out.push(Action::InitiateDeployment { silo: *silo });
    }

    for hq in p.special_cards.iter().filter(|c| c.kind == SpecialCardKind::EspionageHq) {
        for target in &state.players {
            if target.id != player {
                out.push(Action::Espionage { hq: hq.id, target: target.id });
            }
        }
    }

    out.push(Action::EndTurn);
    out
}

fn all_card_ids(state: &WorldState, player: PlayerId) -> Vec<CardId> {
    let mut ids: Vec<CardId> = state.deck.cards.iter().map(|c| c.id).collect();
    if let Some(p) = state.player(player) {
        ids.extend(p.inventory.iter().map(|c| c.id));
    }
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Greedily chooses one distinct spendable card per required kind, all
/// usable at `anchor`.
fn pick_cards(state: &WorldState, player: PlayerId, required: &[CardKind], anchor: Region) -> Option<Vec<CardId>> {
    let usable: Vec<(CardId, CardKind)> = all_card_ids(state, player)
        .into_iter()
        .filter_map(|id| check_card(state, player, id, Some(anchor)).ok().map(|c| (c.id, c.kind)))
        .collect();
    let mut chosen = Vec::with_capacity(required.len());
    for kind in required {
        let (id, _) = usable.iter().find(|(id, k)| k == kind && !chosen.contains(id))?;
        chosen.push(*id);
    }
    Some(chosen)
}
