//! Round-end nuclear resolution and silo timers.

use tracing::info;

use crate::board::player::PlayerId;
use crate::board::state::{GameStatus, Owner, VictoryReason, WorldState};
use crate::mission::engine::invalidate_missions;
use crate::protocol::event::{Event, EventKind};

/// Resolves deployments when a round wraps.
///
/// A sole deployer wins: every other player's silo region is destroyed and
/// the game ends. Two or more deployers cancel each other out; their flags
/// clear and all their silos cool down. Nobody deploying is a no-op.
pub fn resolve_round_end(state: &mut WorldState) -> Vec<Event> {
    let deployers: Vec<PlayerId> =
        state.players.iter().filter(|p| p.nuclear_deployment_active).map(|p| p.id).collect();

    match deployers.as_slice() {
        [] => Vec::new(),
        [winner] => nuclear_strike(state, *winner),
        _ => {
            let cooldown = state.rules.silo_cooldown_turns;
            let mut events = Vec::new();
            for id in &deployers {
                if let Some(p) = state.player_mut(*id) {
                    p.stand_down(cooldown);
                    let p = &*p;
                    events.push(Event::new(
                        EventKind::Neutralized,
                        Some(p),
                        "Mutual deterrence",
                        format!("{} stands down; silos enter cooldown", p.name),
                    ));
                }
            }
            info!(deployers = deployers.len(), "mutual deterrence");
            events
        }
    }
}

fn nuclear_strike(state: &mut WorldState, winner: PlayerId) -> Vec<Event> {
    let mut struck = Vec::new();
    for p in state.players.iter_mut().filter(|p| p.id != winner) {
        for region in p.silos.clone() {
            p.remove_silo(region);
            struck.push(region);
        }
    }
    for region in &struck {
        state.ownership.set(*region, Owner::Destroyed);
    }
    let mut events = invalidate_missions(state);

    state.status = GameStatus::Over { winner, reason: VictoryReason::NuclearStrike };
    info!(%winner, destroyed = struck.len(), "nuclear strike ends the game");
    let p = state.player(winner);
    let name = p.map(|p| p.name.clone()).unwrap_or_default();
    events.push(Event::new(
        EventKind::GameOver,
        p,
        "Game over",
        format!("{} wins by nuclear strike; {} regions destroyed", name, struck.len()),
    ));
    events
}

/// Advances every silo timer of `player` by one turn-start.
pub fn tick_silos(state: &mut WorldState, player: PlayerId) {
    if let Some(p) = state.player_mut(player) {
        for status in p.silo_status.values_mut() {
            status.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::player::{SiloState, SiloStatus};
    use crate::board::region::Region;
    use crate::config::RulesConfig;

    fn armed(s: &mut WorldState, idx: usize, silo: Region) {
        let p = &mut s.players[idx];
        s.ownership.set(silo, Owner::Held(p.id));
        p.silos.push(silo);
        p.silo_status.insert(silo, SiloStatus { state: SiloState::Active, turns_remaining: 0 });
    }

    #[test]
    fn no_deployers_is_a_no_op() {
        let mut s = WorldState::empty(2, RulesConfig::default());
        let before = s.clone();
        assert!(resolve_round_end(&mut s).is_empty());
        assert_eq!(s, before);
    }

    #[test]
    fn sole_deployer_wins() {
        let mut s = WorldState::empty(3, RulesConfig::default());
        armed(&mut s, 0, Region::Russia);
        armed(&mut s, 1, Region::China);
        armed(&mut s, 2, Region::India);
        s.players[0].nuclear_deployment_active = true;

        let events = resolve_round_end(&mut s);
        assert_eq!(s.status, GameStatus::Over { winner: PlayerId(0), reason: VictoryReason::NuclearStrike });
        assert_eq!(events.last().unwrap().kind, EventKind::GameOver);
        assert_eq!(s.owner(Region::China), Owner::Destroyed);
        assert_eq!(s.owner(Region::India), Owner::Destroyed);
        assert_eq!(s.owner(Region::Russia), Owner::Held(PlayerId(0)));
        assert!(s.players[1].silos.is_empty());
    }

    #[test]
    fn two_deployers_deter_each_other() {
        let mut s = WorldState::empty(3, RulesConfig::default());
        armed(&mut s, 0, Region::Russia);
        armed(&mut s, 1, Region::China);
        armed(&mut s, 2, Region::India);
        s.players[0].nuclear_deployment_active = true;
        s.players[1].nuclear_deployment_active = true;

        let events = resolve_round_end(&mut s);
        assert_eq!(events.len(), 2);
        assert_eq!(s.status, GameStatus::InProgress);
        for idx in [0, 1] {
            assert!(!s.players[idx].nuclear_deployment_active);
            let silo = s.players[idx].silos[0];
            assert_eq!(
                s.players[idx].silo_status[&silo],
                SiloStatus { state: SiloState::Cooldown, turns_remaining: 2 }
            );
        }
        assert_eq!(s.players[2].silo_state(Region::India), Some(SiloState::Active));
    }

    #[test]
    fn tick_moves_construction_to_active() {
        let mut s = WorldState::empty(2, RulesConfig::default());
        s.players[0].silos.push(Region::Russia);
        s.players[0]
            .silo_status
            .insert(Region::Russia, SiloStatus { state: SiloState::Construction, turns_remaining: 1 });
        tick_silos(&mut s, PlayerId(0));
        assert_eq!(s.players[0].silo_state(Region::Russia), Some(SiloState::Active));
    }
}
