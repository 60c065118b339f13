//! Battle resolution and conquest.
//!
//! Conquest transfers the target region, settles the defender's anchored
//! cards and silo, hands the conqueror spoils, and runs the mission
//! invalidation pass before anything else can query routes.

use tracing::info;

use crate::battle::orchestrator::BattleOutcome;
use crate::board::player::{PlayerId, SpecialCard, SpecialCardKind};
use crate::board::region::Region;
use crate::board::state::{GameStatus, Owner, VictoryReason, WorldState};
use crate::mission::engine::invalidate_missions;
use crate::protocol::event::{Event, EventKind};

/// Ends the current battle and applies its outcome.
pub fn resolve_battle(state: &mut WorldState, outcome: BattleOutcome) -> Vec<Event> {
    let Some(battle) = state.battle.take() else {
        return Vec::new();
    };
    match outcome {
        BattleOutcome::Victory => conquer(state, battle.attacker, battle.target),
        BattleOutcome::Defeat => {
            let defender = battle.defender.player().and_then(|d| state.player(d));
            let name = defender.map_or_else(|| "Neutral forces".to_string(), |p| p.name.clone());
            info!(attacker = %battle.attacker, target = ?battle.target, "attack repelled");
            let mut events = vec![Event::new(
                EventKind::Defense,
                defender,
                format!("{} holds", battle.target.name()),
                format!(
                    "{} repelled the attack on {} ({}-{})",
                    name,
                    battle.target.name(),
                    battle.defender_wins,
                    battle.attacker_wins
                ),
            )];
            events.extend(invalidate_missions(state));
            events
        }
    }
}

/// Transfers `target` to `attacker` and settles everything anchored there.
pub fn conquer(state: &mut WorldState, attacker: PlayerId, target: Region) -> Vec<Event> {
    let mut events = Vec::new();
    let previous = state.owner(target);
    state.ownership.set(target, Owner::Held(attacker));

    if let Some(defender) = previous.player() {
        events.extend(strip_defender(state, defender, attacker, target));
    }

    // Spoils: private copies of every production card bound to the region.
    let spoils: Vec<_> = state.deck.bound_to(target).copied().collect();
    if let Some(p) = state.player_mut(attacker) {
        for card in spoils {
            if !p.inventory.iter().any(|c| c.id == card.id) {
                p.inventory.push(card);
            }
        }
    }

    let Some(conqueror) = state.player(attacker) else {
        return events;
    };
    let conqueror_name = conqueror.name.clone();
    info!(%attacker, ?target, ?previous, "region conquered");
    events.push(Event::new(
        EventKind::Conquest,
        Some(conqueror),
        format!("{} falls", target.name()),
        format!("{} conquered {}", conqueror_name, target.name()),
    ));

    events.extend(claim_proxy_war(state, attacker, target));
    events.extend(invalidate_missions(state));
    events.extend(check_domination(state));
    events
}

/// Removes the defender's hold on `target`: anchored special cards either
/// stay (non-transferable), vanish (mission-tied) or pass to the attacker;
/// a silo there is lost.
fn strip_defender(state: &mut WorldState, defender: PlayerId, attacker: PlayerId, target: Region) -> Vec<Event> {
    let mut events = Vec::new();
    let Some(d) = state.player_mut(defender) else {
        return events;
    };

    let mut moved: Vec<SpecialCard> = Vec::new();
    d.special_cards.retain(|c| {
        if c.origin != target || !c.transferable {
            return true;
        }
        if c.mission.is_none() {
            moved.push(*c);
        }
        false
    });

    if d.silos.contains(&target) {
        let cancelled = d.remove_silo(target);
        info!(player = %defender, ?target, cancelled, "silo lost");
        if cancelled {
            let d = &*d;
            events.push(Event::new(
                EventKind::Neutralized,
                Some(d),
                "Deployment cancelled",
                format!("{} lost the armed silo in {}", d.name, target.name()),
            ));
        }
    }

    if let Some(a) = state.player_mut(attacker) {
        a.special_cards.extend(moved);
    }
    events
}

fn claim_proxy_war(state: &mut WorldState, attacker: PlayerId, target: Region) -> Vec<Event> {
    match state.proxy_war.as_mut() {
        Some(war) if war.region == target && war.claimed_by.is_none() => {
            war.claimed_by = Some(attacker);
        }
        _ => return Vec::new(),
    }
    let id = state.alloc_id();
    let Some(p) = state.player_mut(attacker) else {
        return Vec::new();
    };
    p.special_cards.push(SpecialCard {
        id,
        kind: SpecialCardKind::ProxyVictory,
        origin: target,
        mission: None,
        transferable: true,
    });
    info!(%attacker, ?target, "proxy war won");
    let p = &*p;
    vec![Event::new(
        EventKind::SecondaryMission,
        Some(p),
        "Proxy war won",
        format!("{} secured the proxy war in {}", p.name, target.name()),
    )]
}

/// Ends the game when a single player is left holding regions.
pub fn check_domination(state: &mut WorldState) -> Vec<Event> {
    if state.is_over() {
        return Vec::new();
    }
    let alive: Vec<PlayerId> = state.players.iter().map(|p| p.id).filter(|id| state.is_alive(*id)).collect();
    let [winner] = alive.as_slice() else {
        return Vec::new();
    };
    state.status = GameStatus::Over { winner: *winner, reason: VictoryReason::Domination };
    info!(winner = %winner, "domination victory");
    let p = state.player(*winner);
    let name = p.map(|p| p.name.clone()).unwrap_or_default();
    vec![Event::new(EventKind::GameOver, p, "Game over", format!("{} dominates the world", name))]
}
