//! Battle orchestration.
//!
//! An attack goes through source selection, confirmation (hands are dealt
//! and bonuses computed), and then up to `max_rounds` clashes. In each round
//! the attacker commits a card, then the defender; the injected comparator
//! resolves the pair immediately. A neutral defender plays its first card
//! automatically.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cards::{shuffled_deck, BattleCard, Modifiers};
use super::comparator::{ClashComparator, ClashOutcome, Side};
use crate::board::adjacency::{edge_between_with, neighbors, EdgeKind};
use crate::board::player::PlayerId;
use crate::board::region::Region;
use crate::board::state::{Owner, PendingAttack, WorldState};
use crate::economy::production::resupply_draw_count;
use crate::economy::resources::SupplyKind;
use crate::mission::catalog::MissionId;
use crate::mission::engine::{attack_modifiers, defense_modifiers};
use crate::resolve::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    AttackerSelection,
    DefenderSelection,
}

/// One resolved clash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashRecord {
    pub attacker_card: BattleCard,
    pub defender_card: BattleCard,
    pub outcome: ClashOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub attacker: PlayerId,
    /// `Owner::Unclaimed` for a neutral region.
    pub defender: Owner,
    pub source: Region,
    pub target: Region,
    pub edge: EdgeKind,
    pub attacker_hand: Vec<BattleCard>,
    pub defender_hand: Vec<BattleCard>,
    pub attacker_bonus: Modifiers,
    pub defender_bonus: Modifiers,
    /// Missions whose attack bonus applies to this battle.
    pub missions: Vec<MissionId>,
    /// Undealt cards, drawn from the back.
    pub deck: Vec<BattleCard>,
    pub phase: BattlePhase,
    pub attacker_card: Option<BattleCard>,
    pub defender_card: Option<BattleCard>,
    pub last_result: Option<ClashRecord>,
    pub round_count: u8,
    pub attacker_wins: u8,
    pub defender_wins: u8,
}

impl BattleState {
    pub fn defender_player(&self) -> Option<PlayerId> {
        self.defender.player()
    }

    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if player == self.attacker {
            Some(Side::Attacker)
        } else if self.defender == Owner::Held(player) {
            Some(Side::Defender)
        } else {
            None
        }
    }

    /// The player expected to act next.
    pub fn to_act(&self) -> Option<PlayerId> {
        match self.phase {
            BattlePhase::AttackerSelection => Some(self.attacker),
            BattlePhase::DefenderSelection => self.defender_player(),
        }
    }

    pub fn hand(&self, side: Side) -> &[BattleCard] {
        match side {
            Side::Attacker => &self.attacker_hand,
            Side::Defender => &self.defender_hand,
        }
    }

    fn hand_mut(&mut self, side: Side) -> &mut Vec<BattleCard> {
        match side {
            Side::Attacker => &mut self.attacker_hand,
            Side::Defender => &mut self.defender_hand,
        }
    }

    fn draw(&mut self, n: usize) -> Vec<BattleCard> {
        let keep = self.deck.len().saturating_sub(n);
        self.deck.split_off(keep)
    }

    /// Returns the finished outcome, if any.
    fn outcome(&self, wins_needed: u8, max_rounds: u8) -> Option<BattleOutcome> {
        if self.attacker_wins >= wins_needed {
            return Some(BattleOutcome::Victory);
        }
        let remaining = max_rounds.saturating_sub(self.round_count);
        let out_of_cards = self.attacker_hand.is_empty() || self.defender_hand.is_empty();
        if self.attacker_wins + remaining < wins_needed || remaining == 0 || out_of_cards {
            return Some(BattleOutcome::Defeat);
        }
        None
    }
}

/// Regions `attacker` may launch an attack on `target` from.
///
/// A source must neighbour the target (static or mission edge), be held by
/// the attacker, not have attacked yet this turn, and not be covered by a
/// treaty the attacker signed with the defender.
pub fn legal_attack_sources(state: &WorldState, attacker: PlayerId, target: Region) -> Vec<Region> {
    let Some(player) = state.player(attacker) else {
        return Vec::new();
    };
    let defender = state.owner(target);
    if matches!(defender, Owner::Destroyed) || defender == Owner::Held(attacker) {
        return Vec::new();
    }
    let extra = state.mission_edges(attacker);
    let mut sources: Vec<Region> = neighbors(target, &extra)
        .into_iter()
        .filter(|s| state.owns(attacker, *s))
        .filter(|s| !player.used_attack_sources.contains(s))
        .filter(|s| match defender.player() {
            Some(d) => !state.treaties.iter().any(|t| t.forbids(attacker, d, *s)),
            None => true,
        })
        .collect();
    sources.sort();
    sources
}

fn check_attack(state: &WorldState, attacker: PlayerId, source: Region, target: Region) -> Result<(), ActionError> {
    match state.owner(target) {
        Owner::Destroyed => return Err(ActionError::UnattackableRegion(target)),
        Owner::Held(p) if p == attacker => return Err(ActionError::OwnTerritory(target)),
        _ => {}
    }
    let sources = legal_attack_sources(state, attacker, target);
    if sources.is_empty() {
        return Err(ActionError::NoAttackSources(target));
    }
    if !sources.contains(&source) {
        return Err(ActionError::IllegalAttackSource { from: source, target });
    }
    Ok(())
}

/// Records a pending attack after validating the source.
pub fn select_attack_source(
    state: &mut WorldState,
    attacker: PlayerId,
    source: Region,
    target: Region,
) -> Result<(), ActionError> {
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }
    check_attack(state, attacker, source, target)?;
    state.pending_attack = Some(PendingAttack { attacker, source, target });
    Ok(())
}

pub fn cancel_attack(state: &mut WorldState, attacker: PlayerId) -> Result<(), ActionError> {
    match state.pending_attack {
        Some(p) if p.attacker == attacker => {
            state.pending_attack = None;
            Ok(())
        }
        _ => Err(ActionError::NoPendingAttack),
    }
}

/// Starts the battle for the pending attack: deals both hands from a
/// freshly shuffled deck and computes both sides' bonuses.
pub fn confirm_attack(state: &mut WorldState, attacker: PlayerId, rng: &mut impl Rng) -> Result<(), ActionError> {
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }
    let pending = match state.pending_attack {
        Some(p) if p.attacker == attacker => p,
        _ => return Err(ActionError::NoPendingAttack),
    };
    let PendingAttack { source, target, .. } = pending;
    check_attack(state, attacker, source, target)?;

    let extra = state.mission_edges(attacker);
    let edge = edge_between_with(source, target, &extra)
        .ok_or(ActionError::IllegalAttackSource { from: source, target })?;

    let mut attacker_bonus = Modifiers::default();
    if edge.is_sea_crossing() {
        attacker_bonus += Modifiers::sea_crossing();
    }
    let (mission_bonus, missions) = attack_modifiers(state, attacker, source, target);
    attacker_bonus += mission_bonus;

    let defender = state.owner(target);
    let mut defender_bonus = Modifiers::terrain(target.biomes());
    if let Some(d) = defender.player() {
        defender_bonus += defense_modifiers(state, d, target);
    }

    let hand_size = state.rules.hand_size;
    let mut deck = shuffled_deck(rng);
    let attacker_hand = deck.split_off(deck.len() - hand_size);
    let defender_hand = deck.split_off(deck.len() - hand_size);

    let p = state.player_mut(attacker).ok_or(ActionError::UnknownPlayer(attacker))?;
    p.used_attack_sources.push(source);

    debug!(%attacker, ?source, ?target, ?edge, "battle started");
    state.pending_attack = None;
    state.battle = Some(BattleState {
        attacker,
        defender,
        source,
        target,
        edge,
        attacker_hand,
        defender_hand,
        attacker_bonus,
        defender_bonus,
        missions,
        deck,
        phase: BattlePhase::AttackerSelection,
        attacker_card: None,
        defender_card: None,
        last_result: None,
        round_count: 0,
        attacker_wins: 0,
        defender_wins: 0,
    });
    Ok(())
}

/// Commits one card for the side whose turn it is in the current round.
///
/// Returns the battle's outcome once it is decided; the battle state is
/// left in place for the caller to resolve.
pub fn submit_clash_card(
    state: &mut WorldState,
    player: PlayerId,
    card: BattleCard,
    comparator: &dyn ClashComparator,
) -> Result<Option<BattleOutcome>, ActionError> {
    let (wins_needed, max_rounds) = (state.rules.wins_needed, state.rules.max_rounds);
    let battle = state.battle.as_mut().ok_or(ActionError::NoBattle)?;
    let side = battle.side_of(player).ok_or(ActionError::NotInBattle(player))?;
    let expected = match battle.phase {
        BattlePhase::AttackerSelection => Side::Attacker,
        BattlePhase::DefenderSelection => Side::Defender,
    };
    if side != expected {
        return Err(ActionError::OutOfPhase);
    }

    let hand = battle.hand_mut(side);
    let pos = hand.iter().position(|c| *c == card).ok_or(ActionError::CardNotInHand(card))?;
    let card = hand.remove(pos);

    match side {
        Side::Attacker => {
            battle.attacker_card = Some(card);
            battle.phase = BattlePhase::DefenderSelection;
            if battle.defender_player().is_some() {
                return Ok(None);
            }
            // Neutral territory answers with its first card.
            let reply = battle.defender_hand.remove(0);
            battle.defender_card = Some(reply);
        }
        Side::Defender => battle.defender_card = Some(card),
    }

    let (Some(atk), Some(def)) = (battle.attacker_card.take(), battle.defender_card.take()) else {
        return Err(ActionError::OutOfPhase);
    };
    let outcome = comparator.compare(atk, def, battle.attacker_bonus, battle.defender_bonus);
    match outcome.winner {
        Side::Attacker => battle.attacker_wins += 1,
        Side::Defender => battle.defender_wins += 1,
    }
    battle.round_count += 1;
    debug!(round = battle.round_count, reason = %outcome.reason, "clash resolved");
    battle.last_result = Some(ClashRecord { attacker_card: atk, defender_card: def, outcome });
    battle.phase = BattlePhase::AttackerSelection;
    Ok(battle.outcome(wins_needed, max_rounds))
}

/// Trades supply items for extra battle cards.
///
/// Only the side currently selecting may resupply. Every item must have a
/// supply route to the side's battle region: the source for the attacker,
/// the target for the defender. Returns the number of cards drawn.
pub fn request_resupply(state: &mut WorldState, player: PlayerId, supply_ids: &[u32]) -> Result<usize, ActionError> {
    if supply_ids.is_empty() {
        return Err(ActionError::EmptyResupply);
    }
    let battle = state.battle.as_ref().ok_or(ActionError::NoBattle)?;
    let side = battle.side_of(player).ok_or(ActionError::NotInBattle(player))?;
    if battle.to_act() != Some(player) {
        return Err(ActionError::OutOfPhase);
    }
    let anchor = match side {
        Side::Attacker => battle.source,
        Side::Defender => battle.target,
    };

    let p = state.player(player).ok_or(ActionError::UnknownPlayer(player))?;
    let mut counts = [0usize; 3];
    for (i, id) in supply_ids.iter().enumerate() {
        if supply_ids[..i].contains(id) {
            return Err(ActionError::UnknownSupply(*id));
        }
        let item = p.supplies.find(*id).ok_or(ActionError::UnknownSupply(*id))?;
        if !state.supply_route(item.origin, anchor, player) {
            return Err(ActionError::NoSupplyRoute { from: item.origin, to: anchor });
        }
        counts[match item.kind {
            SupplyKind::Manufacture => 0,
            SupplyKind::Food => 1,
            SupplyKind::Energy => 2,
        }] += 1;
    }
    let n = resupply_draw_count(counts[0], counts[1], counts[2], state.rules.trio_draw);

    let p = state.player_mut(player).ok_or(ActionError::UnknownPlayer(player))?;
    for id in supply_ids {
        p.supplies.remove(*id);
    }
    let battle = state.battle.as_mut().ok_or(ActionError::NoBattle)?;
    let drawn = battle.draw(n);
    let got = drawn.len();
    battle.hand_mut(side).extend(drawn);
    debug!(%player, requested = n, drawn = got, "resupply");
    Ok(got)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::cards::Regiment;
    use crate::battle::comparator::TierComparator;
    use crate::board::player::{ActiveMission, SupplyItem};
    use crate::board::state::Treaty;
    use crate::config::RulesConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use Region::*;

    const A: PlayerId = PlayerId(0);
    const B: PlayerId = PlayerId(1);
    const C: PlayerId = PlayerId(2);

    fn world() -> WorldState {
        let mut s = WorldState::empty(3, RulesConfig::default());
        for r in [Argentina, Chile] {
            s.ownership.set(r, Owner::Held(A));
        }
        for r in [Bolivia, Brazil] {
            s.ownership.set(r, Owner::Held(C));
        }
        s.ownership.set(Peru, Owner::Held(B));
        s
    }

    fn start(s: &mut WorldState, source: Region, target: Region) {
        let mut rng = SmallRng::seed_from_u64(1);
        select_attack_source(s, A, source, target).unwrap();
        confirm_attack(s, A, &mut rng).unwrap();
    }

    fn card(tier: u8) -> BattleCard {
        BattleCard { regiment: Regiment::Infantry, tier, variant: 0 }
    }

    /// Replaces the dealt hands so clash results are known.
    fn rig(s: &mut WorldState, atk: &[u8], def: &[u8]) {
        let b = s.battle.as_mut().unwrap();
        b.attacker_hand = atk.iter().map(|t| card(*t)).collect();
        b.defender_hand = def.iter().map(|t| BattleCard { regiment: Regiment::Air, tier: *t, variant: 1 }).collect();
        b.attacker_bonus = Modifiers::default();
        b.defender_bonus = Modifiers::default();
    }

    #[test]
    fn sources_for_foreign_target() {
        let s = world();
        assert_eq!(legal_attack_sources(&s, A, Bolivia), vec![Chile, Argentina]);
        assert_eq!(legal_attack_sources(&s, A, Brazil), vec![Argentina]);
        assert!(legal_attack_sources(&s, A, Chile).is_empty());
    }

    #[test]
    fn attacking_own_region_is_rejected() {
        let mut s = world();
        assert_eq!(select_attack_source(&mut s, A, Argentina, Chile), Err(ActionError::OwnTerritory(Chile)));
        assert!(s.pending_attack.is_none());
    }

    #[test]
    fn no_sources_aborts() {
        let mut s = world();
        assert_eq!(select_attack_source(&mut s, A, Argentina, Japan), Err(ActionError::NoAttackSources(Japan)));
        s.ownership.set(Cuba, Owner::Destroyed);
        assert_eq!(select_attack_source(&mut s, A, Argentina, Cuba), Err(ActionError::UnattackableRegion(Cuba)));
    }

    #[test]
    fn confirm_deals_two_hands() {
        let mut s = world();
        start(&mut s, Argentina, Brazil);
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.attacker_hand.len(), 5);
        assert_eq!(b.defender_hand.len(), 5);
        assert_eq!(b.deck.len(), 50);
        assert_eq!(b.round_count, 0);
        assert_eq!(b.phase, BattlePhase::AttackerSelection);
        assert_eq!(b.edge, EdgeKind::Land);
        // Brazil is jungle.
        assert_eq!(b.defender_bonus, Modifiers { infantry: 0, artillery: 1, air: 1 });
        assert!(s.pending_attack.is_none());
        assert_eq!(s.players[0].used_attack_sources, vec![Argentina]);
    }

    #[test]
    fn source_used_once_per_turn() {
        let mut s = world();
        start(&mut s, Argentina, Brazil);
        s.battle = None;
        assert_eq!(
            select_attack_source(&mut s, A, Argentina, Bolivia),
            Err(ActionError::IllegalAttackSource { from: Argentina, target: Bolivia })
        );
        assert!(select_attack_source(&mut s, A, Chile, Bolivia).is_ok());
    }

    #[test]
    fn treaty_restricts_sources() {
        let mut s = world();
        s.treaties.push(Treaty { signer: A, counterpart: C, forbidden_sources: vec![Chile], until_year: 1962 });
        assert_eq!(legal_attack_sources(&s, A, Bolivia), vec![Argentina]);
        s.treaties[0].forbidden_sources.clear();
        assert!(legal_attack_sources(&s, A, Bolivia).is_empty());
    }

    #[test]
    fn sea_crossing_penalty() {
        let mut s = world();
        s.ownership.set(Australia, Owner::Held(B));
        start(&mut s, Chile, Australia);
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.edge, EdgeKind::Wraparound);
        assert_eq!(b.attacker_bonus, Modifiers::sea_crossing());
    }

    #[test]
    fn attacker_wins_best_of_three() {
        let mut s = world();
        start(&mut s, Argentina, Bolivia);
        rig(&mut s, &[4, 4, 1, 1, 1], &[1, 1, 1, 1, 1]);
        assert_eq!(submit_clash_card(&mut s, A, card(4), &TierComparator), Ok(None));
        assert_eq!(s.battle.as_ref().unwrap().phase, BattlePhase::DefenderSelection);
        let reply = s.battle.as_ref().unwrap().defender_hand[0];
        assert_eq!(submit_clash_card(&mut s, C, reply, &TierComparator), Ok(None));
        let b = s.battle.as_ref().unwrap();
        assert_eq!((b.round_count, b.attacker_wins), (1, 1));
        assert_eq!(b.last_result.as_ref().unwrap().outcome.winner, Side::Attacker);

        submit_clash_card(&mut s, A, card(4), &TierComparator).unwrap();
        let reply = s.battle.as_ref().unwrap().defender_hand[0];
        assert_eq!(submit_clash_card(&mut s, C, reply, &TierComparator), Ok(Some(BattleOutcome::Victory)));
    }

    #[test]
    fn defender_wins_two_ends_battle() {
        let mut s = world();
        start(&mut s, Argentina, Bolivia);
        rig(&mut s, &[1, 1, 1, 1, 1], &[4, 4, 4, 4, 4]);
        for round in 0..2 {
            submit_clash_card(&mut s, A, card(1), &TierComparator).unwrap();
            let reply = s.battle.as_ref().unwrap().defender_hand[0];
            let out = submit_clash_card(&mut s, C, reply, &TierComparator).unwrap();
            if round == 1 {
                assert_eq!(out, Some(BattleOutcome::Defeat));
            } else {
                assert_eq!(out, None);
            }
        }
    }

    #[test]
    fn wrong_side_or_card_is_rejected() {
        let mut s = world();
        start(&mut s, Argentina, Bolivia);
        rig(&mut s, &[2, 2, 2, 2, 2], &[3, 3, 3, 3, 3]);
        assert_eq!(submit_clash_card(&mut s, C, card(3), &TierComparator), Err(ActionError::OutOfPhase));
        assert_eq!(submit_clash_card(&mut s, B, card(2), &TierComparator), Err(ActionError::NotInBattle(B)));
        assert_eq!(
            submit_clash_card(&mut s, A, card(4), &TierComparator),
            Err(ActionError::CardNotInHand(card(4)))
        );
    }

    #[test]
    fn neutral_defender_answers_automatically() {
        let mut s = world();
        s.ownership.set(Bolivia, Owner::Unclaimed);
        start(&mut s, Argentina, Bolivia);
        rig(&mut s, &[4, 4, 4, 4, 4], &[1, 1, 1, 1, 1]);
        assert_eq!(submit_clash_card(&mut s, A, card(4), &TierComparator), Ok(None));
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.round_count, 1);
        assert_eq!(b.phase, BattlePhase::AttackerSelection);
        assert_eq!(b.defender_hand.len(), 4);
        assert_eq!(
            submit_clash_card(&mut s, A, card(4), &TierComparator),
            Ok(Some(BattleOutcome::Victory))
        );
    }

    #[test]
    fn resupply_draws_by_formula() {
        let mut s = world();
        start(&mut s, Argentina, Bolivia);
        let kinds = [SupplyKind::Manufacture, SupplyKind::Food, SupplyKind::Energy, SupplyKind::Food];
        for (i, kind) in kinds.into_iter().enumerate() {
            s.players[0].supplies.push(SupplyItem { id: 100 + i as u32, kind, origin: Chile });
        }
        let drawn = request_resupply(&mut s, A, &[100, 101, 102, 103]).unwrap();
        assert_eq!(drawn, 5);
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.attacker_hand.len(), 10);
        assert_eq!(b.deck.len(), 45);
        assert_eq!(s.players[0].supplies.total(), 0);
    }

    #[test]
    fn resupply_is_route_gated_and_phase_bound() {
        let mut s = world();
        start(&mut s, Argentina, Bolivia);
        s.players[0].supplies.push(SupplyItem { id: 7, kind: SupplyKind::Food, origin: Japan });
        s.players[2].supplies.push(SupplyItem { id: 8, kind: SupplyKind::Food, origin: Brazil });
        assert_eq!(
            request_resupply(&mut s, A, &[7]),
            Err(ActionError::NoSupplyRoute { from: Japan, to: Argentina })
        );
        assert_eq!(request_resupply(&mut s, C, &[8]), Err(ActionError::OutOfPhase));
        assert_eq!(request_resupply(&mut s, A, &[]), Err(ActionError::EmptyResupply));
    }

    fn with_mission(s: &mut WorldState, player: PlayerId, mission: MissionId, base: Region) {
        s.players[player.index()].active_special_missions.push(ActiveMission { mission, base });
    }

    #[test]
    fn mission_edge_opens_an_attack_source() {
        let mut s = world();
        s.ownership.set(Greece, Owner::Held(A));
        s.ownership.set(Turkey, Owner::Held(B));
        assert!(legal_attack_sources(&s, A, Turkey).is_empty());

        with_mission(&mut s, A, MissionId::AlejandroMagno, Greece);
        assert_eq!(legal_attack_sources(&s, A, Turkey), vec![Greece]);

        start(&mut s, Greece, Turkey);
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.edge, EdgeKind::Mission);
        assert_eq!(b.missions, vec![MissionId::AlejandroMagno]);
        // Sea-crossing penalty plus the mission's infantry bonus.
        assert_eq!(b.attacker_bonus, Modifiers { infantry: 0, artillery: 1, air: 0 });
    }

    #[test]
    fn mission_attack_bonus_is_dealt_into_the_battle() {
        let mut s = world();
        s.ownership.set(Chile, Owner::Held(B));
        with_mission(&mut s, A, MissionId::AndesCrossing, Argentina);
        start(&mut s, Argentina, Chile);
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.edge, EdgeKind::Land);
        assert_eq!(b.missions, vec![MissionId::AndesCrossing]);
        assert_eq!(b.attacker_bonus, Modifiers { infantry: 1, artillery: 1, air: 0 });
        assert_eq!(b.defender_bonus, Modifiers::terrain(Chile.biomes()));

        // Normandy Landing rides on top of the channel crossing.
        let mut s = world();
        s.ownership.set(UnitedKingdom, Owner::Held(A));
        s.ownership.set(France, Owner::Held(B));
        with_mission(&mut s, A, MissionId::NormandyLanding, UnitedKingdom);
        start(&mut s, UnitedKingdom, France);
        let b = s.battle.as_ref().unwrap();
        assert_eq!(b.missions, vec![MissionId::NormandyLanding]);
        assert_eq!(b.attacker_bonus, Modifiers { infantry: 1, artillery: 1, air: 1 });
    }

    #[test]
    fn mission_bonus_needs_the_matching_pair() {
        let mut s = world();
        with_mission(&mut s, A, MissionId::AndesCrossing, Argentina);
        start(&mut s, Argentina, Bolivia);
        let b = s.battle.as_ref().unwrap();
        assert!(b.missions.is_empty());
        assert_eq!(b.attacker_bonus, Modifiers::default());
    }

    #[test]
    fn golden_dome_shields_the_defender() {
        let mut s = world();
        s.ownership.set(Canada, Owner::Held(A));
        s.ownership.set(UnitedStates, Owner::Held(B));
        assert_eq!(defense_modifiers(&s, B, UnitedStates), Modifiers::default());

        with_mission(&mut s, B, MissionId::GoldenDome, UnitedStates);
        assert_eq!(defense_modifiers(&s, B, UnitedStates), Modifiers { infantry: 0, artillery: 0, air: 1 });
        assert_eq!(defense_modifiers(&s, B, Canada), Modifiers::default());

        start(&mut s, Canada, UnitedStates);
        let b = s.battle.as_ref().unwrap();
        // Urban and plain terrain, plus the dome's air cover.
        assert_eq!(b.defender_bonus, Modifiers { infantry: 1, artillery: 0, air: 2 });
    }
}
