//! Special missions: templates plus the engine that evaluates them against
//! the ownership map.

pub mod catalog;
pub mod engine;
pub mod espionage;

pub use catalog::{Mission, MissionId, ALL_MISSIONS, MISSIONS};
pub use engine::{
    activate_mission, attack_modifiers, controls_all, defense_modifiers, invalidate_missions, is_visible,
    mission_edges, visible_missions,
};
pub use espionage::run_espionage;
