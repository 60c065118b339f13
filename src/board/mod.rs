//! Board representation and world-state types.
//!
//! Contains the static region graph, the ownership map, player records,
//! and the supply-route resolver.

pub mod adjacency;
pub mod player;
pub mod region;
pub mod route;
pub mod state;

pub use adjacency::{adj_from, edge_between, edge_between_with, is_adjacent, neighbors, EdgeKind, ExtraEdge};
pub use player::{
    ActiveMission, Player, PlayerId, SiloState, SiloStatus, SpecialCard, SpecialCardKind,
    Supplies, SupplyItem,
};
pub use region::{Biome, Continent, Region, ALL_REGIONS, REGION_COUNT};
pub use route::{connected_component, has_route};
pub use state::{
    GameClock, GameStatus, Owner, OwnershipMap, PendingAttack, ProxyWar, Treaty, VictoryReason, WorldState,
};
