//! New-game setup.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use tracing::info;

use super::turn::begin_turn;
use crate::board::player::{Player, PlayerId};
use crate::board::region::{Region, ALL_REGIONS};
use crate::board::state::{GameClock, GameStatus, Owner, OwnershipMap, ProxyWar, WorldState};
use crate::config::{ConfigError, RulesConfig};
use crate::economy::deck::ProductionDeck;

impl WorldState {
    /// Deals a fresh game.
    ///
    /// Starting regions are dealt round-robin from a shuffled map, each
    /// player gets a distinct secret mineral region, a proxy-war country is
    /// drawn, provider regions are assigned, and the turn order is shuffled.
    pub fn setup(num_players: usize, rules: RulesConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        rules.validate()?;
        rules.check_players(num_players)?;

        let mut regions = ALL_REGIONS.to_vec();
        regions.shuffle(rng);
        let mut ownership = OwnershipMap::new();
        for (i, region) in regions.iter().take(num_players * rules.starting_regions).enumerate() {
            ownership.set(*region, Owner::Held(PlayerId((i % num_players) as u8)));
        }

        let minerals: Vec<Region> = ALL_REGIONS.iter().copied().choose_multiple(rng, num_players);
        let players: Vec<Player> = minerals
            .iter()
            .enumerate()
            .map(|(i, mineral)| Player::new(PlayerId(i as u8), *mineral))
            .collect();

        let proxy = ALL_REGIONS.choose(rng).copied().unwrap_or(Region::Cuba);
        let deck = ProductionDeck::assign(num_players, rules.max_providers, rng);

        let mut turn_order: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        turn_order.shuffle(rng);

        let clock = GameClock {
            year: rules.start_year,
            month: rules.start_month,
            turn_order,
            turn_order_index: 0,
            round: 0,
        };
        let mut state = WorldState {
            rules,
            ownership,
            players,
            deck,
            clock,
            battle: None,
            pending_attack: None,
            treaties: Vec::new(),
            proxy_war: Some(ProxyWar { region: proxy, claimed_by: None }),
            status: GameStatus::InProgress,
            next_id: 0,
        };
        if let Some(first) = state.current_player() {
            begin_turn(&mut state, first);
        }
        info!(players = num_players, proxy = ?proxy, "new game");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn game(n: usize, seed: u64) -> WorldState {
        let mut rng = SmallRng::seed_from_u64(seed);
        WorldState::setup(n, RulesConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn regions_are_dealt_evenly() {
        for n in 2..=6 {
            let s = game(n, n as u64);
            for p in &s.players {
                assert_eq!(s.ownership.count_of(p.id), 7);
            }
            let neutral = ALL_REGIONS.iter().filter(|r| s.owner(**r) == Owner::Unclaimed).count();
            assert_eq!(neutral, 60 - 7 * n);
        }
    }

    #[test]
    fn minerals_are_distinct() {
        let s = game(6, 11);
        let mut minerals: Vec<Region> = s.players.iter().map(|p| p.secret_mineral).collect();
        minerals.sort();
        minerals.dedup();
        assert_eq!(minerals.len(), 6);
    }

    #[test]
    fn turn_order_is_a_permutation() {
        let s = game(4, 3);
        let mut order = s.clock.turn_order.clone();
        order.sort();
        assert_eq!(order, (0..4).map(PlayerId).collect::<Vec<_>>());
        assert!(s.proxy_war.is_some());
        assert!(!s.deck.cards.is_empty());
    }

    #[test]
    fn same_seed_same_game() {
        assert_eq!(game(3, 77), game(3, 77));
    }

    #[test]
    fn bad_player_count_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            WorldState::setup(7, RulesConfig::default(), &mut rng),
            Err(ConfigError::PlayerCount(7, 2, 6))
        ));
    }
}
