//! Engine state management.
//!
//! Holds the current world, the engine options and the random source, and
//! answers protocol commands. Replies are single lines:
//!
//! ```text
//! readyok
//! ok
//! event <json>
//! rejected <code> <message>
//! snapshot <json>
//! legal <json>
//! ```

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::battle::comparator::{ClashComparator, TierComparator};
use crate::board::player::PlayerId;
use crate::board::state::WorldState;
use crate::config::RulesConfig;
use crate::movegen::{acting_player, legal_actions_with};
use crate::protocol::action::{Action, PlayerAction};
use crate::protocol::snapshot::{encode_snapshot, parse_snapshot};

pub use crate::resolve::apply::{apply_action, ActionError, Transition};

/// Player count used when the `Players` option is unset or invalid.
pub const DEFAULT_PLAYERS: usize = 4;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub state: Option<WorldState>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
    comparator: Box<dyn ClashComparator>,
}

#[derive(Serialize)]
struct LegalReply<'a> {
    player: Option<PlayerId>,
    actions: &'a [Action],
}

impl Engine {
    /// Creates an engine with no game loaded.
    pub fn new() -> Self {
        Self::with_comparator(Box::new(TierComparator))
    }

    /// Creates an engine that settles clashes with `comparator`.
    pub fn with_comparator(comparator: Box<dyn ClashComparator>) -> Self {
        Engine { state: None, options: HashMap::new(), rng: SmallRng::from_entropy(), comparator }
    }

    /// Sets an engine option. `Seed` reseeds the random source at once.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(seed)) => self.rng = SmallRng::seed_from_u64(seed),
                _ => warn!(?value, "ignoring invalid Seed"),
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    fn players(&self) -> usize {
        self.options.get("Players").and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PLAYERS)
    }

    /// Deals a fresh game with the configured player count.
    pub fn new_game<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match WorldState::setup(self.players(), RulesConfig::default(), &mut self.rng) {
            Ok(state) => {
                self.state = Some(state);
                writeln!(out, "ok")?;
            }
            Err(e) => writeln!(out, "rejected config {}", e)?,
        }
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Applies a JSON-encoded action, printing its events then `ok`, or a
    /// single rejection line.
    pub fn handle_action<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            writeln!(out, "rejected no_game no game in progress")?;
            return out.flush();
        };
        let action = match PlayerAction::from_json(json) {
            Ok(a) => a,
            Err(e) => {
                writeln!(out, "rejected malformed {}", e)?;
                return out.flush();
            }
        };
        match apply_action(state, &action, &mut self.rng, self.comparator.as_ref()) {
            Ok(Transition { state, events }) => {
                for event in &events {
                    writeln!(out, "event {}", serde_json::to_string(event).map_err(io::Error::other)?)?;
                }
                if state.is_over() {
                    info!(status = ?state.status, "game finished");
                }
                self.state = Some(state);
                writeln!(out, "ok")?;
            }
            Err(e) => writeln!(out, "rejected {} {}", e.code(), e)?,
        }
        out.flush()
    }

    /// Prints the current world as a snapshot line.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.state {
            Some(state) => match encode_snapshot(state) {
                Ok(json) => writeln!(out, "snapshot {}", json)?,
                Err(e) => writeln!(out, "rejected snapshot {}", e)?,
            },
            None => writeln!(out, "rejected no_game no game in progress")?,
        }
        out.flush()
    }

    /// Replaces the current world with a snapshot.
    pub fn handle_load<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        match parse_snapshot(json) {
            Ok(state) => {
                self.state = Some(state);
                writeln!(out, "ok")?;
            }
            Err(e) => writeln!(out, "rejected snapshot {}", e)?,
        }
        out.flush()
    }

    /// Lists the legal actions of whoever acts next.
    pub fn handle_legal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            writeln!(out, "rejected no_game no game in progress")?;
            return out.flush();
        };
        let player = acting_player(state);
        let actions = match player {
            Some(p) => legal_actions_with(state, p, self.comparator.as_ref()),
            None => Vec::new(),
        };
        let reply = LegalReply { player, actions: &actions };
        writeln!(out, "legal {}", serde_json::to_string(&reply).map_err(io::Error::other)?)?;
        out.flush()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
