//! The nuclear unlock chain: design, mineral extraction, silo construction,
//! fuel assignment, and deployment.
//!
//! Each stage requires the previous ones. Deck cards spent on a stage must be
//! route-connected to the stage's anchor region.

use tracing::info;

use crate::board::player::{PlayerId, SiloState, SiloStatus, SpecialCard, SpecialCardKind};
use crate::board::region::Region;
use crate::board::state::WorldState;
use crate::economy::deck::{CardId, CardKind};
use crate::economy::production::{check_card, consume_cards, mark_used};
use crate::economy::resources::{RawMaterialType, TechnologyType};
use crate::protocol::event::{Event, EventKind};
use crate::resolve::ActionError;

pub const DESIGN_CARDS: [CardKind; 2] =
    [CardKind::Tech(TechnologyType::Electronics), CardKind::Raw(RawMaterialType::Semiconductor)];

pub const MINERAL_CARDS: [CardKind; 3] = [
    CardKind::Tech(TechnologyType::Mining),
    CardKind::Raw(RawMaterialType::Iron),
    CardKind::Raw(RawMaterialType::Water),
];

pub const SILO_CARDS: [CardKind; 6] = [
    CardKind::Tech(TechnologyType::LightIndustry),
    CardKind::Tech(TechnologyType::HeavyIndustry),
    CardKind::Tech(TechnologyType::Electronics),
    CardKind::Raw(RawMaterialType::Iron),
    CardKind::Raw(RawMaterialType::Aluminum),
    CardKind::Raw(RawMaterialType::Semiconductor),
];

fn grant(state: &mut WorldState, player: PlayerId, kind: SpecialCardKind, origin: Region) -> Result<SpecialCard, ActionError> {
    let card = SpecialCard { id: state.alloc_id(), kind, origin, mission: None, transferable: true };
    state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?.special_cards.push(card);
    Ok(card)
}

/// Stage 1: a design anchored to a held, nuclear-capable region.
pub fn generate_nuclear_design(
    state: &mut WorldState,
    player: PlayerId,
    region: Region,
    cards: &[CardId],
) -> Result<SpecialCard, ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    if p.has_special(SpecialCardKind::NuclearDesign) {
        return Err(ActionError::StageComplete("design"));
    }
    if !state.owns(player, region) {
        return Err(ActionError::RegionNotHeld(region));
    }
    if !region.is_nuclear_capable() {
        return Err(ActionError::NotNuclearCapable(region));
    }
    consume_cards(state, player, cards, &DESIGN_CARDS, Some(region))?;
    let card = grant(state, player, SpecialCardKind::NuclearDesign, region)?;
    info!(%player, ?region, "nuclear design generated");
    Ok(card)
}

/// Stage 2: extraction at the player's secret mineral region.
pub fn extract_mineral(state: &mut WorldState, player: PlayerId, cards: &[CardId]) -> Result<SpecialCard, ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    if !p.has_special(SpecialCardKind::NuclearDesign) {
        return Err(ActionError::StageLocked("design"));
    }
    if p.has_special(SpecialCardKind::SecretMineral) {
        return Err(ActionError::StageComplete("mineral"));
    }
    let region = p.secret_mineral;
    if !state.owns(player, region) {
        return Err(ActionError::RegionNotHeld(region));
    }
    consume_cards(state, player, cards, &MINERAL_CARDS, Some(region))?;
    let card = grant(state, player, SpecialCardKind::SecretMineral, region)?;
    info!(%player, ?region, "secret mineral extracted");
    Ok(card)
}

/// Stage 3: a silo, starting under construction.
pub fn construct_silo(
    state: &mut WorldState,
    player: PlayerId,
    region: Region,
    cards: &[CardId],
) -> Result<(), ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    if !p.has_special(SpecialCardKind::NuclearDesign) {
        return Err(ActionError::StageLocked("design"));
    }
    if !p.has_special(SpecialCardKind::SecretMineral) {
        return Err(ActionError::StageLocked("mineral"));
    }
    if p.silos.contains(&region) {
        return Err(ActionError::SiloExists(region));
    }
    if !state.owns(player, region) {
        return Err(ActionError::RegionNotHeld(region));
    }
    consume_cards(state, player, cards, &SILO_CARDS, Some(region))?;

    let turns = state.rules.silo_build_turns;
    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    p.silos.push(region);
    p.silo_status.insert(region, SiloStatus { state: SiloState::Construction, turns_remaining: turns });
    info!(%player, ?region, "silo under construction");
    Ok(())
}

/// Stage 4: binds a fuel card to an active silo, replacing any previous
/// binding. The card is not spent until deployment.
pub fn assign_silo_fuel(state: &mut WorldState, player: PlayerId, silo: Region, card: CardId) -> Result<(), ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    match p.silo_state(silo) {
        None => return Err(ActionError::NoSilo(silo)),
        Some(SiloState::Active) => {}
        Some(_) => return Err(ActionError::SiloNotActive(silo)),
    }
    let fuel = check_card(state, player, card, Some(silo))?;
    if !matches!(fuel.kind, CardKind::Raw(raw) if raw.is_fuel()) {
        return Err(ActionError::WrongCardKind(card));
    }
    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    p.silo_fuel_cards.insert(silo, card);
    Ok(())
}

/// Stage 5: arms a fuelled, active silo connected to the mineral region.
/// Spends the fuel and returns the global alert.
pub fn initiate_deployment(state: &mut WorldState, player: PlayerId, silo: Region) -> Result<Event, ActionError> {
    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    if p.nuclear_deployment_active {
        return Err(ActionError::DeploymentActive);
    }
    if !p.has_special(SpecialCardKind::NuclearDesign) {
        return Err(ActionError::StageLocked("design"));
    }
    let mineral = p.special_of(SpecialCardKind::SecretMineral).ok_or(ActionError::StageLocked("mineral"))?;
    let mineral_region = mineral.origin;
    match p.silo_state(silo) {
        None => return Err(ActionError::NoSilo(silo)),
        Some(SiloState::Active) => {}
        Some(_) => return Err(ActionError::SiloNotActive(silo)),
    }
    let fuel_id = *p.silo_fuel_cards.get(&silo).ok_or(ActionError::NoFuel(silo))?;
    let fuel = check_card(state, player, fuel_id, Some(silo))?;
    if !state.supply_route(mineral_region, silo, player) {
        return Err(ActionError::NoSupplyRoute { from: mineral_region, to: silo });
    }

    mark_used(state, player, &fuel);
    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    p.silo_fuel_cards.remove(&silo);
    p.nuclear_deployment_active = true;
    p.deployment_silo = Some(silo);
    info!(%player, ?silo, "nuclear deployment initiated");
    let p = &*p;
    Ok(Event::new(
        EventKind::NuclearAlert,
        Some(p),
        "Nuclear alert",
        format!("{} has armed the silo in {}", p.name, silo.name()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::Owner;
    use crate::config::RulesConfig;
    use crate::economy::deck::TerritoryCard;
    use Region::*;

    const P: PlayerId = PlayerId(0);

    /// P holds a connected block around Russia with every card it needs.
    fn world() -> WorldState {
        let mut s = WorldState::empty(2, RulesConfig::default());
        for r in [Russia, Kazakhstan, Siberia, Mongolia, China] {
            s.ownership.set(r, Owner::Held(P));
        }
        s.players[0].secret_mineral = Mongolia;
        let kinds = [
            (CardKind::Tech(TechnologyType::Electronics), China),
            (CardKind::Raw(RawMaterialType::Semiconductor), China),
            (CardKind::Tech(TechnologyType::Mining), Mongolia),
            (CardKind::Raw(RawMaterialType::Iron), Russia),
            (CardKind::Raw(RawMaterialType::Water), Russia),
            (CardKind::Tech(TechnologyType::LightIndustry), China),
            (CardKind::Tech(TechnologyType::HeavyIndustry), Russia),
            (CardKind::Tech(TechnologyType::Electronics), China),
            (CardKind::Raw(RawMaterialType::Iron), Russia),
            (CardKind::Raw(RawMaterialType::Aluminum), Kazakhstan),
            (CardKind::Raw(RawMaterialType::Semiconductor), China),
            (CardKind::Raw(RawMaterialType::Uranium), Kazakhstan),
        ];
        s.deck.cards = kinds.iter().enumerate().map(|(i, (k, r))| TerritoryCard::new(i as u32, *k, *r)).collect();
        s
    }

    fn activate(s: &mut WorldState, silo: Region) {
        s.players[0].silo_status.get_mut(&silo).unwrap().tick();
    }

    #[test]
    fn full_chain() {
        let mut s = world();
        let design = generate_nuclear_design(&mut s, P, Russia, &[0, 1]).unwrap();
        assert_eq!(design.origin, Russia);
        let mineral = extract_mineral(&mut s, P, &[2, 3, 4]).unwrap();
        assert_eq!(mineral.origin, Mongolia);
        construct_silo(&mut s, P, Siberia, &[5, 6, 7, 8, 9, 10]).unwrap();
        assert_eq!(
            s.players[0].silo_status[&Siberia],
            SiloStatus { state: SiloState::Construction, turns_remaining: 1 }
        );
        assert_eq!(assign_silo_fuel(&mut s, P, Siberia, 11), Err(ActionError::SiloNotActive(Siberia)));
        activate(&mut s, Siberia);
        assign_silo_fuel(&mut s, P, Siberia, 11).unwrap();
        let alert = initiate_deployment(&mut s, P, Siberia).unwrap();
        assert_eq!(alert.kind, EventKind::NuclearAlert);
        assert!(s.players[0].nuclear_deployment_active);
        assert!(s.deck.get(11).unwrap().used_this_turn);
        assert!(s.players[0].silo_fuel_cards.is_empty());
        assert_eq!(initiate_deployment(&mut s, P, Siberia), Err(ActionError::DeploymentActive));
    }

    #[test]
    fn stages_are_ordered() {
        let mut s = world();
        assert_eq!(extract_mineral(&mut s, P, &[2, 3, 4]), Err(ActionError::StageLocked("design")));
        assert_eq!(
            construct_silo(&mut s, P, Siberia, &[5, 6, 7, 8, 9, 10]),
            Err(ActionError::StageLocked("design"))
        );
        generate_nuclear_design(&mut s, P, Russia, &[0, 1]).unwrap();
        assert_eq!(
            generate_nuclear_design(&mut s, P, China, &[7, 10]),
            Err(ActionError::StageComplete("design"))
        );
        assert_eq!(
            construct_silo(&mut s, P, Siberia, &[5, 6, 7, 8, 9, 10]),
            Err(ActionError::StageLocked("mineral"))
        );
    }

    #[test]
    fn design_needs_nuclear_capable_region() {
        let mut s = world();
        assert_eq!(
            generate_nuclear_design(&mut s, P, Mongolia, &[0, 1]),
            Err(ActionError::NotNuclearCapable(Mongolia))
        );
        assert_eq!(generate_nuclear_design(&mut s, P, India, &[0, 1]), Err(ActionError::RegionNotHeld(India)));
        // Rejected actions spend nothing.
        assert!(s.deck.cards.iter().all(|c| !c.used_this_turn));
    }

    #[test]
    fn mineral_region_must_be_held() {
        let mut s = world();
        generate_nuclear_design(&mut s, P, Russia, &[0, 1]).unwrap();
        s.players[0].secret_mineral = Peru;
        assert_eq!(extract_mineral(&mut s, P, &[2, 3, 4]), Err(ActionError::RegionNotHeld(Peru)));
    }

    #[test]
    fn fuel_must_be_uranium() {
        let mut s = world();
        generate_nuclear_design(&mut s, P, Russia, &[0, 1]).unwrap();
        extract_mineral(&mut s, P, &[2, 3, 4]).unwrap();
        construct_silo(&mut s, P, Siberia, &[5, 6, 7, 8, 9, 10]).unwrap();
        activate(&mut s, Siberia);
        assert_eq!(assign_silo_fuel(&mut s, P, Siberia, 9), Err(ActionError::WrongCardKind(9)));
        assert_eq!(assign_silo_fuel(&mut s, P, China, 11), Err(ActionError::NoSilo(China)));
        assert_eq!(initiate_deployment(&mut s, P, Siberia), Err(ActionError::NoFuel(Siberia)));
    }

    #[test]
    fn deployment_needs_mineral_route() {
        let mut s = world();
        s.ownership.set(Japan, Owner::Held(P));
        s.deck.cards[11].origin = Japan;
        generate_nuclear_design(&mut s, P, Russia, &[0, 1]).unwrap();
        extract_mineral(&mut s, P, &[2, 3, 4]).unwrap();
        construct_silo(&mut s, P, Japan, &[5, 6, 7, 8, 9, 10]).unwrap_err();
        s.players[0].silos.push(Japan);
        s.players[0]
            .silo_status
            .insert(Japan, SiloStatus { state: SiloState::Active, turns_remaining: 0 });
        assign_silo_fuel(&mut s, P, Japan, 11).unwrap();
        assert_eq!(
            initiate_deployment(&mut s, P, Japan),
            Err(ActionError::NoSupplyRoute { from: Mongolia, to: Japan })
        );
        assert!(!s.players[0].nuclear_deployment_active);
    }
}
