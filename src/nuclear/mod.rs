//! Nuclear escalation: the per-player unlock chain and round-end
//! resolution.

pub mod deterrence;
pub mod stages;

pub use deterrence::{resolve_round_end, tick_silos};
pub use stages::{assign_silo_fuel, construct_silo, extract_mineral, generate_nuclear_design, initiate_deployment};
