//! Brinkmanship rules engine library.
//!
//! Exposes the world model, the economy, missions, battles, the nuclear
//! track and action resolution for use by integration tests and the binary
//! entry points.

pub mod battle;
pub mod board;
pub mod config;
pub mod economy;
pub mod engine;
pub mod mission;
pub mod movegen;
pub mod nuclear;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
