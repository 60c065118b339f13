//! Espionage through the intelligence network.
//!
//! Each Espionage HQ card can be used once per turn to uncover another
//! player's secret mineral region. The result is a War Secret card that
//! never changes hands on conquest.

use tracing::info;

use crate::board::player::{PlayerId, SpecialCard, SpecialCardKind};
use crate::board::state::WorldState;
use crate::protocol::event::{Event, EventKind};
use crate::resolve::ActionError;

pub fn run_espionage(state: &mut WorldState, player: PlayerId, hq: u32, target: PlayerId) -> Result<Event, ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    let card = p
        .special_cards
        .iter()
        .find(|c| c.id == hq && c.kind == SpecialCardKind::EspionageHq)
        .ok_or(ActionError::UnknownSpecialCard(hq))?;
    let origin = card.origin;
    if p.used_espionage_hqs.contains(&hq) {
        return Err(ActionError::EspionageUsed(hq));
    }
    if target == player {
        return Err(ActionError::InvalidTarget(target));
    }
    let mineral = state.player(target).ok_or(ActionError::InvalidTarget(target))?.secret_mineral;

    let id = state.alloc_id();
    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    p.used_espionage_hqs.push(hq);
    p.special_cards.push(SpecialCard {
        id,
        kind: SpecialCardKind::WarSecret { target, mineral },
        origin,
        mission: None,
        transferable: false,
    });
    info!(%player, %target, "espionage succeeded");
    Ok(Event::new(
        EventKind::Intelligence,
        Some(&*p),
        "War secret uncovered",
        format!("{}'s secret mineral lies in {}", target, mineral.name()),
    )
    .to(player))
}
