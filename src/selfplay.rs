//! Random self-play for soak-testing the rules.
//!
//! Plays whole games by asking `movegen` for a random legal action for
//! whoever acts next and applying it. Every applied action must succeed; a
//! rejection here means move generation and the rules disagree.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::battle::comparator::TierComparator;
use crate::board::player::PlayerId;
use crate::board::state::{GameStatus, VictoryReason, WorldState};
use crate::config::{ConfigError, RulesConfig};
use crate::movegen::{acting_player, random_action};
use crate::protocol::action::PlayerAction;
use crate::resolve::apply_action;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub players: usize,
    /// Rounds after which an undecided game is abandoned.
    pub max_rounds: u32,
    /// Hard cap on applied actions per game.
    pub max_actions: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Keep the full action log in each record.
    pub record_actions: bool,
    pub rules: RulesConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 4,
            max_rounds: 40,
            max_actions: 5000,
            threads: 4,
            seed: 0,
            record_actions: false,
            rules: RulesConfig::default(),
        }
    }
}

/// Outcome of one self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub winner: Option<PlayerId>,
    pub reason: Option<VictoryReason>,
    pub rounds: u32,
    pub final_year: u16,
    pub final_month: u8,
    pub actions_applied: usize,
    pub battles: usize,
    pub events: usize,
    /// Regions held per player at the end, by seat.
    pub regions: Vec<usize>,
    /// Actions the rules rejected; non-zero means a move generation bug.
    pub rejected: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PlayerAction>,
}

/// Plays one game to completion or to the configured limits.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> Result<GameRecord, ConfigError> {
    let mut state = WorldState::setup(config.players, config.rules.clone(), rng)?;
    let mut record = GameRecord {
        game_id,
        winner: None,
        reason: None,
        rounds: 0,
        final_year: state.clock.year,
        final_month: state.clock.month,
        actions_applied: 0,
        battles: 0,
        events: 0,
        regions: Vec::new(),
        rejected: 0,
        actions: Vec::new(),
    };

    while record.actions_applied < config.max_actions && state.clock.round < config.max_rounds {
        let Some(player) = acting_player(&state) else {
            break;
        };
        let Some(action) = random_action(&state, player, rng) else {
            break;
        };
        let action = PlayerAction::new(player, action);
        match apply_action(&state, &action, rng, &TierComparator) {
            Ok(t) => {
                if state.battle.is_none() && t.state.battle.is_some() {
                    record.battles += 1;
                }
                record.events += t.events.len();
                record.actions_applied += 1;
                state = t.state;
                if config.record_actions {
                    record.actions.push(action);
                }
            }
            Err(e) => {
                warn!(game_id, code = e.code(), ?action, "generated action rejected");
                record.rejected += 1;
                break;
            }
        }
    }

    if let GameStatus::Over { winner, reason } = state.status {
        record.winner = Some(winner);
        record.reason = Some(reason);
    }
    record.rounds = state.clock.round;
    record.final_year = state.clock.year;
    record.final_month = state.clock.month;
    record.regions = state.players.iter().map(|p| state.ownership.count_of(p.id)).collect();
    Ok(record)
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs self-play and collects every record, ordered by game id.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play, calling `on_game` with each completed record as it
/// finishes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), ConfigError>
where
    F: FnMut(GameRecord) + Send,
{
    config.rules.validate()?;
    config.rules.check_players(config.players)?;
    if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
            Ok(pool) => return run_self_play_parallel(config, &pool, on_game),
            Err(e) => warn!("falling back to one thread: {}", e),
        }
    }
    run_self_play_sequential(config, on_game)
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), ConfigError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let start = Instant::now();
        let game = play_game(config, i, &mut game_rng(config.seed, i))?;
        info!(game = i + 1, total = config.num_games, winner = ?game.winner, secs = start.elapsed().as_secs_f64(), "game finished");
        on_game(game);
    }
    Ok(())
}

/// Plays games on the rayon pool and hands records back to the calling
/// thread through a channel.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, pool: &rayon::ThreadPool, mut on_game: F) -> Result<(), ConfigError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<Result<GameRecord, ConfigError>>();

    std::thread::scope(|scope| -> Result<(), ConfigError> {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                    let start = Instant::now();
                    let game = play_game(config, i, &mut game_rng(config.seed, i));
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    info!(game = n, total = config.num_games, secs = start.elapsed().as_secs_f64(), "game finished");
                    let _ = tx.send(game);
                });
            });
        });

        for game in rx {
            on_game(game?);
        }
        Ok(())
    })
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate statistics over a batch of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub nuclear_wins: usize,
    pub domination_wins: usize,
    pub undecided: usize,
    pub avg_rounds: f64,
    pub avg_actions: f64,
    pub avg_battles: f64,
    pub rejected: usize,
}

impl Summary {
    pub fn of(games: &[GameRecord]) -> Self {
        let n = games.len().max(1) as f64;
        let count = |reason| games.iter().filter(|g| g.reason == Some(reason)).count();
        Summary {
            games: games.len(),
            nuclear_wins: count(VictoryReason::NuclearStrike),
            domination_wins: count(VictoryReason::Domination),
            undecided: games.iter().filter(|g| g.winner.is_none()).count(),
            avg_rounds: games.iter().map(|g| f64::from(g.rounds)).sum::<f64>() / n,
            avg_actions: games.iter().map(|g| g.actions_applied as f64).sum::<f64>() / n,
            avg_battles: games.iter().map(|g| g.battles as f64).sum::<f64>() / n,
            rejected: games.iter().map(|g| g.rejected).sum(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Nuclear victories: {}", self.nuclear_wins)?;
        writeln!(f, "Domination victories: {}", self.domination_wins)?;
        writeln!(f, "Undecided: {}", self.undecided)?;
        writeln!(f, "Avg rounds/game: {:.1}", self.avg_rounds)?;
        writeln!(f, "Avg actions/game: {:.1}", self.avg_actions)?;
        writeln!(f, "Avg battles/game: {:.1}", self.avg_battles)?;
        write!(f, "Rejected generated actions: {}", self.rejected)
    }
}
