//! Protocol surface.
//!
//! Inbound actions and commands, outbound events, and world snapshots for
//! the line protocol spoken on stdin/stdout.

pub mod action;
pub mod event;
pub mod parser;
pub mod snapshot;

pub use action::{Action, PlayerAction};
pub use event::{Event, EventKind};
pub use parser::{parse_command, Command};
pub use snapshot::{encode_snapshot, parse_snapshot, SnapshotError};
