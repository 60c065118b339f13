//! World snapshots for external storage and sync.
//!
//! A snapshot is the JSON form of `WorldState`. Loading one checks the
//! structural invariants the engine relies on, so a corrupt snapshot is
//! rejected at the boundary instead of surfacing later as a panic.

use crate::board::player::PlayerId;
use crate::board::state::WorldState;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("ownership map has {found} entries, expected {expected}")]
    OwnershipLength { expected: usize, found: usize },

    #[error("player at seat {seat} carries id {found}")]
    PlayerSeat { seat: usize, found: PlayerId },

    #[error("turn order references unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("turn order index {index} out of range for {len} seats")]
    TurnIndex { index: usize, len: usize },

    #[error("calendar month {0} outside 1..=12")]
    Month(u8),

    #[error("invalid rules: {0}")]
    Rules(#[from] ConfigError),
}

/// Serializes a world to compact JSON.
pub fn encode_snapshot(state: &WorldState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// Parses and checks a snapshot.
pub fn parse_snapshot(json: &str) -> Result<WorldState, SnapshotError> {
    let state: WorldState = serde_json::from_str(json)?;
    validate(&state)?;
    Ok(state)
}

fn validate(state: &WorldState) -> Result<(), SnapshotError> {
    state.rules.validate()?;
    for (seat, p) in state.players.iter().enumerate() {
        if p.id.index() != seat {
            return Err(SnapshotError::PlayerSeat { seat, found: p.id });
        }
    }
    if let Some(bad) = state.clock.turn_order.iter().find(|id| state.player(**id).is_none()) {
        return Err(SnapshotError::UnknownPlayer(*bad));
    }
    let len = state.clock.turn_order.len();
    if state.clock.turn_order_index >= len {
        return Err(SnapshotError::TurnIndex { index: state.clock.turn_order_index, len });
    }
    if !(1..=12).contains(&state.clock.month) {
        return Err(SnapshotError::Month(state.clock.month));
    }
    Ok(())
}
