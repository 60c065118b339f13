//! Card availability, crafting, and the per-turn usage cycle.
//!
//! A production card can come from two pools. Deck cards are usable only by
//! the holder of their origin region, and only while that origin is
//! route-connected to whatever the card is being spent on. Inventory copies
//! (spoils of conquest) are usable anywhere. Either way, a card spent this
//! turn stays spent until the owner's next turn-start reset.

use tracing::debug;

use super::deck::{CardId, CardKind};
use crate::board::player::{PlayerId, SupplyItem};
use crate::board::region::Region;
use crate::board::state::WorldState;
use crate::resolve::ActionError;

/// Which pool a resolved card lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSource {
    Inventory,
    Deck,
}

/// A card the player is allowed to spend right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRef {
    pub id: CardId,
    pub kind: CardKind,
    pub origin: Region,
    pub source: CardSource,
}

/// Resolves `id` to a card `player` may spend.
///
/// The private inventory is searched first. A deck card additionally needs
/// its origin held by the player and, when `anchor` is given, a supply route
/// from the origin to the anchor.
pub fn check_card(
    state: &WorldState,
    player: PlayerId,
    id: CardId,
    anchor: Option<Region>,
) -> Result<CardRef, ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;

    if let Some(card) = p.inventory.iter().find(|c| c.id == id) {
        if card.used_this_turn {
            return Err(ActionError::CardAlreadyUsed(id));
        }
        return Ok(CardRef { id, kind: card.kind, origin: card.origin, source: CardSource::Inventory });
    }

    let card = state.deck.get(id).ok_or(ActionError::UnknownCard(id))?;
    if !state.owns(player, card.origin) {
        return Err(ActionError::CardUnavailable(id));
    }
    if card.used_this_turn {
        return Err(ActionError::CardAlreadyUsed(id));
    }
    if let Some(anchor) = anchor {
        if !state.supply_route(card.origin, anchor, player) {
            return Err(ActionError::NoSupplyRoute { from: card.origin, to: anchor });
        }
    }
    Ok(CardRef { id, kind: card.kind, origin: card.origin, source: CardSource::Deck })
}

/// Flags a resolved card as spent in whichever pool holds it.
pub fn mark_used(state: &mut WorldState, player: PlayerId, card: &CardRef) {
    match card.source {
        CardSource::Inventory => {
            if let Some(p) = state.player_mut(player) {
                if let Some(c) = p.inventory.iter_mut().find(|c| c.id == card.id) {
                    c.used_this_turn = true;
                }
            }
        }
        CardSource::Deck => {
            if let Some(c) = state.deck.get_mut(card.id) {
                c.used_this_turn = true;
            }
        }
    }
}

/// Resolves a set of cards that must match `required` exactly, as a
/// multiset of kinds. Nothing is marked used.
pub fn find_cards(
    state: &WorldState,
    player: PlayerId,
    ids: &[CardId],
    required: &[CardKind],
    anchor: Option<Region>,
) -> Result<Vec<CardRef>, ActionError> {
    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            return Err(ActionError::DuplicateCard(*id));
        }
    }
    let cards = ids
        .iter()
        .map(|id| check_card(state, player, *id, anchor))
        .collect::<Result<Vec<_>, _>>()?;

    let mut have: Vec<CardKind> = cards.iter().map(|c| c.kind).collect();
    let mut want = required.to_vec();
    have.sort();
    want.sort();
    if have != want {
        return Err(ActionError::CardRequirement { required: want, offered: have });
    }
    Ok(cards)
}

/// `find_cards` followed by marking every card used.
pub fn consume_cards(
    state: &mut WorldState,
    player: PlayerId,
    ids: &[CardId],
    required: &[CardKind],
    anchor: Option<Region>,
) -> Result<Vec<CardRef>, ActionError> {
    let cards = find_cards(state, player, ids, required, anchor)?;
    for card in &cards {
        mark_used(state, player, card);
    }
    Ok(cards)
}

/// Matches a technology card with its required raw material and adds one
/// supply unit to the player's stockpile.
///
/// Two deck cards must be route-connected to each other. The new unit takes
/// the raw material's origin.
pub fn produce_supply(
    state: &mut WorldState,
    player: PlayerId,
    tech_id: CardId,
    raw_id: CardId,
) -> Result<SupplyItem, ActionError> {
    if tech_id == raw_id {
        return Err(ActionError::DuplicateCard(tech_id));
    }
    let raw = check_card(state, player, raw_id, None)?;
    let raw_type = match raw.kind {
        CardKind::Raw(r) => r,
        CardKind::Tech(_) => return Err(ActionError::WrongCardKind(raw_id)),
    };
    // Tech is anchored to the raw card's origin only when both sit in the deck.
    let anchor = (raw.source == CardSource::Deck).then_some(raw.origin);
    let mut tech = check_card(state, player, tech_id, None)?;
    if tech.source == CardSource::Deck {
        tech = check_card(state, player, tech_id, anchor)?;
    }
    let tech_type = match tech.kind {
        CardKind::Tech(t) => t,
        CardKind::Raw(_) => return Err(ActionError::WrongCardKind(tech_id)),
    };
    if tech_type.required_raw() != raw_type {
        return Err(ActionError::TechnologyMismatch { tech: tech_type, raw: raw_type });
    }

    mark_used(state, player, &tech);
    mark_used(state, player, &raw);
    let item = SupplyItem { id: state.alloc_id(), kind: tech_type.product(), origin: raw.origin };
    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    p.supplies.push(item);
    debug!(%player, ?tech_type, ?raw_type, "produced supply");
    Ok(item)
}

/// Which cards a usage reset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageScope {
    /// The player's inventory and every deck card whose origin they hold.
    Player(PlayerId),
    Global,
}

pub fn reset_turn_usage(state: &mut WorldState, scope: UsageScope) {
    match scope {
        UsageScope::Player(player) => {
            let held: Vec<bool> = state
                .deck
                .cards
                .iter()
                .map(|c| state.ownership.is_held_by(c.origin, player))
                .collect();
            for (card, held) in state.deck.cards.iter_mut().zip(held) {
                if held {
                    card.used_this_turn = false;
                }
            }
            if let Some(p) = state.player_mut(player) {
                p.inventory.iter_mut().for_each(|c| c.used_this_turn = false);
            }
        }
        UsageScope::Global => {
            state.deck.cards.iter_mut().for_each(|c| c.used_this_turn = false);
            for p in &mut state.players {
                p.inventory.iter_mut().for_each(|c| c.used_this_turn = false);
            }
        }
    }
}

/// Cards drawn for a supply exchange: each complete food, manufacture and
/// energy trio is worth `trio_draw` cards, every leftover unit one card.
pub fn resupply_draw_count(manufacture: usize, food: usize, energy: usize, trio_draw: usize) -> usize {
    let sets = manufacture.min(food).min(energy);
    let remainder = (manufacture - sets) + (food - sets) + (energy - sets);
    trio_draw * sets + remainder
}
