//! Action resolution.
//!
//! Turns a validated player action into a new world state plus the events
//! it produced, and runs the turn and round schedule.

pub mod apply;
pub mod conquest;
pub mod diplomacy;
pub mod setup;
pub mod turn;

pub use apply::{apply_action, ActionError, Transition};
pub use conquest::{check_domination, conquer, resolve_battle};
pub use diplomacy::sign_treaty;
pub use turn::{begin_turn, end_turn};
