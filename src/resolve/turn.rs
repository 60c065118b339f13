//! Turn scheduling.
//!
//! Turns pass along `clock.turn_order`, skipping players with no regions.
//! When the order wraps the round ends: nuclear deployments are resolved,
//! the calendar advances by a random number of months, and on a new year
//! the turn order is reshuffled and expired treaties are dropped.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::board::player::PlayerId;
use crate::board::state::WorldState;
use crate::economy::production::{reset_turn_usage, UsageScope};
use crate::nuclear::deterrence::{resolve_round_end, tick_silos};
use crate::protocol::event::Event;
use crate::resolve::ActionError;

/// Ends `player`'s turn and starts the next living player's.
pub fn end_turn(state: &mut WorldState, player: PlayerId, rng: &mut impl Rng) -> Result<Vec<Event>, ActionError> {
    if state.current_player() != Some(player) {
        return Err(ActionError::NotYourTurn(player));
    }
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }
    state.pending_attack = None;

    let mut events = Vec::new();
    let seats = state.clock.turn_order.len();
    for _ in 0..=seats {
        state.clock.turn_order_index += 1;
        if state.clock.turn_order_index >= seats {
            events.extend(end_round(state, rng));
            if state.is_over() {
                return Ok(events);
            }
        }
        if let Some(next) = state.current_player() {
            if state.is_alive(next) {
                begin_turn(state, next);
                return Ok(events);
            }
        }
    }
    Ok(events)
}

/// Round wrap: nuclear resolution, then the calendar.
fn end_round(state: &mut WorldState, rng: &mut impl Rng) -> Vec<Event> {
    state.clock.turn_order_index = 0;
    state.clock.round += 1;
    let events = resolve_round_end(state);
    if state.is_over() {
        return events;
    }

    let rules = &state.rules;
    let months = rng.gen_range(rules.month_advance_min..=rules.month_advance_max);
    let mut month = u16::from(state.clock.month) + u16::from(months);
    let mut new_year = false;
    while month > 12 {
        month -= 12;
        state.clock.year = state.clock.year.saturating_add(1);
        new_year = true;
    }
    state.clock.month = u8::try_from(month).unwrap_or(12);

    if new_year {
        state.clock.turn_order.shuffle(rng);
        let year = state.clock.year;
        state.treaties.retain(|t| t.until_year >= year);
        debug!(year, order = ?state.clock.turn_order, "new year");
    }
    events
}

/// Turn-start bookkeeping for the incoming player: card usage resets, silo
/// timers tick, and attack sources and espionage HQs become usable again.
pub fn begin_turn(state: &mut WorldState, player: PlayerId) {
    reset_turn_usage(state, UsageScope::Player(player));
    tick_silos(state, player);
    if let Some(p) = state.player_mut(player) {
        p.used_attack_sources.clear();
        p.used_espionage_hqs.clear();
    }
    debug!(%player, year = state.clock.year, month = state.clock.month, "turn begins");
}
