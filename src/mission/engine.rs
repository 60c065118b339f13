//! Mission eligibility, activation, derived rule modifiers, and the
//! invalidation pass that runs on every conquest.

use tracing::info;

use super::catalog::{MissionId, ALL_MISSIONS};
use crate::battle::cards::Modifiers;
use crate::board::adjacency::ExtraEdge;
use crate::board::player::{ActiveMission, PlayerId, SpecialCard};
use crate::board::region::Region;
use crate::board::state::WorldState;
use crate::economy::deck::CardId;
use crate::economy::production::consume_cards;
use crate::protocol::event::{Event, EventKind};
use crate::resolve::ActionError;

/// A mission is visible if the player holds any of its `visible_for`
/// regions, or if it is global.
pub fn is_visible(state: &WorldState, player: PlayerId, id: MissionId) -> bool {
    let m = id.template();
    m.global || m.visible_for.iter().any(|r| state.owns(player, *r))
}

/// A mission is activatable only while every control region is held.
pub fn controls_all(state: &WorldState, player: PlayerId, id: MissionId) -> bool {
    id.template().control.iter().all(|r| state.owns(player, *r))
}

pub fn visible_missions(state: &WorldState, player: PlayerId) -> Vec<MissionId> {
    ALL_MISSIONS.into_iter().filter(|id| is_visible(state, player, *id)).collect()
}

/// Activates a mission, spending its cards and granting any special card.
///
/// Cards drawn from the deck must be route-connected to the chosen base.
pub fn activate_mission(
    state: &mut WorldState,
    player: PlayerId,
    id: MissionId,
    base: Region,
    cards: &[CardId],
) -> Result<Option<SpecialCard>, ActionError> {
    let m = id.template();
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    if p.has_mission(id) {
        return Err(ActionError::MissionAlreadyActive(id));
    }
    if !is_visible(state, player, id) || !controls_all(state, player, id) {
        return Err(ActionError::MissionUnavailable(id));
    }
    if !m.bases.contains(&base) || !state.owns(player, base) {
        return Err(ActionError::InvalidMissionBase { mission: id, base });
    }
    consume_cards(state, player, cards, m.cards, Some(base))?;

    let granted = match m.grants {
        Some(kind) => Some(SpecialCard {
            id: state.alloc_id(),
            kind,
            origin: base,
            mission: Some(id),
            transferable: true,
        }),
        None => None,
    };
    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    p.active_special_missions.push(ActiveMission { mission: id, base });
    if let Some(card) = granted {
        p.special_cards.push(card);
    }
    info!(%player, mission = m.name, ?base, "mission activated");
    Ok(granted)
}

/// Extra edges granted by the player's active missions.
pub fn mission_edges(state: &WorldState, player: PlayerId) -> Vec<ExtraEdge> {
    let Some(p) = state.player(player) else {
        return Vec::new();
    };
    let mut edges: Vec<ExtraEdge> = Vec::new();
    for active in &p.active_special_missions {
        for e in active.mission.template().edges {
            if !edges.contains(e) {
                edges.push(*e);
            }
        }
    }
    edges
}

/// Attack modifiers the attacker's missions grant for this source/target
/// pair, and the missions that contributed.
pub fn attack_modifiers(
    state: &WorldState,
    attacker: PlayerId,
    source: Region,
    target: Region,
) -> (Modifiers, Vec<MissionId>) {
    let mut total = Modifiers::default();
    let mut applied = Vec::new();
    let Some(p) = state.player(attacker) else {
        return (total, applied);
    };
    for active in &p.active_special_missions {
        if let Some(bonus) = active.mission.template().attack {
            if bonus.sources.contains(&source) && bonus.targets.contains(&target) {
                total += bonus.modifiers;
                applied.push(active.mission);
            }
        }
    }
    (total, applied)
}

/// Defense modifiers the defender's missions grant on `target`.
pub fn defense_modifiers(state: &WorldState, defender: PlayerId, target: Region) -> Modifiers {
    let mut total = Modifiers::default();
    if let Some(p) = state.player(defender) {
        for active in &p.active_special_missions {
            if let Some(bonus) = active.mission.template().defense {
                if bonus.regions.contains(&target) {
                    total += bonus.modifiers;
                }
            }
        }
    }
    total
}

/// Drops every active mission whose base is no longer held by its owner,
/// together with the special cards tied to it.
pub fn invalidate_missions(state: &mut WorldState) -> Vec<Event> {
    let mut events = Vec::new();
    for idx in 0..state.players.len() {
        let pid = state.players[idx].id;
        let lost: Vec<ActiveMission> = state.players[idx]
            .active_special_missions
            .iter()
            .copied()
            .filter(|m| !state.ownership.is_held_by(m.base, pid))
            .collect();
        if lost.is_empty() {
            continue;
        }
        let p = &mut state.players[idx];
        for m in &lost {
            p.active_special_missions.retain(|a| a.mission != m.mission);
            p.special_cards.retain(|c| c.mission != Some(m.mission));
            let name = m.mission.template().name;
            info!(player = %pid, mission = name, base = ?m.base, "mission neutralized");
            events.push(Event::new(
                EventKind::Neutralized,
                Some(&*p),
                format!("{} neutralized", name),
                format!("{} lost {}, the base of {}", p.name, m.base.name(), name),
            ));
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::player::SpecialCardKind;
    use crate::board::state::Owner;
    use crate::config::RulesConfig;
    use crate::economy::deck::{CardKind, TerritoryCard};
    use crate::economy::resources::{RawMaterialType, TechnologyType};
    use Region::*;

    const P: PlayerId = PlayerId(0);
    const Q: PlayerId = PlayerId(1);

    fn world(held: &[Region]) -> WorldState {
        let mut s = WorldState::empty(2, RulesConfig::default());
        for r in held {
            s.ownership.set(*r, Owner::Held(P));
        }
        s
    }

    #[test]
    fn visibility_and_control() {
        let s = world(&[Chile]);
        assert!(is_visible(&s, P, MissionId::AndesCrossing));
        assert!(!controls_all(&s, P, MissionId::AndesCrossing));
        assert!(is_visible(&s, Q, MissionId::IntelligenceNetwork));
        assert!(!is_visible(&s, Q, MissionId::AndesCrossing));
        assert!(visible_missions(&s, P).contains(&MissionId::AntarcticRoute));
    }

    #[test]
    fn activation_requires_every_control_region() {
        let mut s = world(&[Greece]);
        assert_eq!(
            activate_mission(&mut s, P, MissionId::AlejandroMagno, Greece, &[]),
            Err(ActionError::MissionUnavailable(MissionId::AlejandroMagno))
        );
        s.ownership.set(Balkans, Owner::Held(P));
        assert!(activate_mission(&mut s, P, MissionId::AlejandroMagno, Greece, &[]).is_ok());
        assert_eq!(
            activate_mission(&mut s, P, MissionId::AlejandroMagno, Greece, &[]),
            Err(ActionError::MissionAlreadyActive(MissionId::AlejandroMagno))
        );
        assert_eq!(mission_edges(&s, P), vec![ExtraEdge::new(Greece, Turkey)]);
        assert!(mission_edges(&s, Q).is_empty());
    }

    #[test]
    fn activation_rejects_foreign_base() {
        let mut s = world(&[Argentina, Chile]);
        assert_eq!(
            activate_mission(&mut s, P, MissionId::AndesCrossing, Chile, &[]),
            Err(ActionError::InvalidMissionBase { mission: MissionId::AndesCrossing, base: Chile })
        );
    }

    #[test]
    fn card_missions_consume_cards_and_grant() {
        let mut s = world(&[Argentina, Chile]);
        s.ownership.set(SaudiArabia, Owner::Held(P));
        s.deck.cards = vec![
            TerritoryCard::new(0, CardKind::Tech(TechnologyType::Refining), Chile),
            TerritoryCard::new(1, CardKind::Raw(RawMaterialType::Oil), Argentina),
            TerritoryCard::new(2, CardKind::Raw(RawMaterialType::Oil), SaudiArabia),
        ];
        // Saudi oil has no route to the Argentine base.
        assert!(matches!(
            activate_mission(&mut s, P, MissionId::AntarcticRoute, Argentina, &[0, 2]),
            Err(ActionError::NoSupplyRoute { .. })
        ));
        let card = activate_mission(&mut s, P, MissionId::AntarcticRoute, Argentina, &[0, 1])
            .unwrap()
            .unwrap();
        assert_eq!(card.kind, SpecialCardKind::AntarcticBase);
        assert_eq!(card.mission, Some(MissionId::AntarcticRoute));
        assert!(s.deck.get(0).unwrap().used_this_turn);
        assert!(s.deck.get(1).unwrap().used_this_turn);
        assert_eq!(mission_edges(&s, P).len(), 4);
    }

    #[test]
    fn attack_bonus_matches_pair_only() {
        let mut s = world(&[Argentina]);
        activate_mission(&mut s, P, MissionId::AndesCrossing, Argentina, &[]).unwrap();
        let (m, applied) = attack_modifiers(&s, P, Argentina, Chile);
        assert_eq!(m, Modifiers { infantry: 1, artillery: 1, air: 0 });
        assert_eq!(applied, vec![MissionId::AndesCrossing]);
        let (m, applied) = attack_modifiers(&s, P, Argentina, Brazil);
        assert_eq!(m, Modifiers::default());
        assert!(applied.is_empty());
    }

    #[test]
    fn invalidation_drops_mission_and_tied_cards() {
        let mut s = world(&[UnitedKingdom]);
        s.deck.cards = vec![TerritoryCard::new(0, CardKind::Tech(TechnologyType::Electronics), UnitedKingdom)];
        activate_mission(&mut s, P, MissionId::IntelligenceNetwork, UnitedKingdom, &[0]).unwrap();
        assert!(s.players[0].has_special(SpecialCardKind::EspionageHq));

        assert!(invalidate_missions(&mut s).is_empty());

        s.ownership.set(UnitedKingdom, Owner::Held(Q));
        let events = invalidate_missions(&mut s);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Neutralized);
        assert!(s.players[0].active_special_missions.is_empty());
        assert!(!s.players[0].has_special(SpecialCardKind::EspionageHq));
    }
}
