//! Production economy: the resource catalog, the provider deck, and
//! crafting supplies from technology + raw material pairs.

pub mod deck;
pub mod production;
pub mod resources;

pub use deck::{CardId, CardKind, ProductionDeck, TerritoryCard};
pub use production::{produce_supply, reset_turn_usage, resupply_draw_count, UsageScope};
pub use resources::{RawMaterialType, SupplyKind, TechnologyType, TECHNOLOGY_REQUIREMENTS};
