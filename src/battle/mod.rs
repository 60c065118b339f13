//! Card battles: the battle deck, the clash comparator seam, and the
//! orchestrator state machine.

pub mod cards;
pub mod comparator;
pub mod orchestrator;

pub use cards::{BattleCard, Modifiers, Regiment};
pub use comparator::{ClashComparator, ClashOutcome, Side, TierComparator};
pub use orchestrator::{
    cancel_attack, confirm_attack, legal_attack_sources, request_resupply, select_attack_source,
    submit_clash_card, BattleOutcome, BattlePhase, BattleState,
};
