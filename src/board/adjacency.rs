//! Adjacency graph for the world map.
//!
//! The static graph is made of three undirected edge lists: land borders,
//! fixed maritime routes, and the two wraparound edges that close the map
//! (Alaska-Kamchatka and Chile-Australia). Mission-granted edges are not part
//! of the static graph; they are supplied per query as `ExtraEdge`s.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::region::{Region, REGION_COUNT};

/// How two regions are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Land,
    Maritime,
    Wraparound,
    /// Granted by an active mission; never stored in the static tables.
    Mission,
}

impl EdgeKind {
    /// Returns true if crossing this edge counts as a sea crossing in battle.
    pub const fn is_sea_crossing(self) -> bool {
        !matches!(self, EdgeKind::Land)
    }
}

/// A single directed adjacency between two regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyEntry {
    pub from: Region,
    pub to: Region,
    pub kind: EdgeKind,
}

/// An undirected edge supplied by the caller on top of the static graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraEdge {
    pub a: Region,
    pub b: Region,
}

impl ExtraEdge {
    pub const fn new(a: Region, b: Region) -> Self {
        ExtraEdge { a, b }
    }

    /// Returns the opposite endpoint if `r` is one of this edge's ends.
    pub fn other(&self, r: Region) -> Option<Region> {
        if self.a == r {
            Some(self.b)
        } else if self.b == r {
            Some(self.a)
        } else {
            None
        }
    }
}

use Region::*;

/// Land borders (undirected).
pub static LAND_EDGES: [(Region, Region); 73] = [
    // North America
    (Alaska, Canada),
    (Canada, UnitedStates),
    (UnitedStates, Mexico),
    (Mexico, CentralAmerica),
    (CentralAmerica, Colombia),
    // South America
    (Colombia, Venezuela),
    (Colombia, Peru),
    (Colombia, Brazil),
    (Venezuela, Brazil),
    (Peru, Brazil),
    (Peru, Bolivia),
    (Peru, Chile),
    (Bolivia, Brazil),
    (Bolivia, Chile),
    (Bolivia, Argentina),
    (Argentina, Chile),
    (Argentina, Brazil),
    // Europe
    (Spain, France),
    (France, Germany),
    (France, Italy),
    (Germany, Italy),
    (Germany, Poland),
    (Germany, Scandinavia),
    (Scandinavia, Russia),
    (Poland, Ukraine),
    (Poland, Russia),
    (Ukraine, Russia),
    (Ukraine, Balkans),
    (Germany, Balkans),
    (Italy, Balkans),
    (Balkans, Greece),
    (Balkans, Turkey),
    // Asia
    (Russia, Kazakhstan),
    (Russia, Siberia),
    (Siberia, Kamchatka),
    (Siberia, Kazakhstan),
    (Siberia, Mongolia),
    (Siberia, China),
    (Kazakhstan, China),
    (Kazakhstan, Afghanistan),
    (Mongolia, China),
    (China, NorthKorea),
    (NorthKorea, SouthKorea),
    (China, Vietnam),
    (China, India),
    (China, Pakistan),
    (China, Afghanistan),
    (Afghanistan, Pakistan),
    (Afghanistan, Iran),
    (Pakistan, India),
    (India, Vietnam),
    (Iran, Iraq),
    (Iran, Turkey),
    (Iraq, Turkey),
    (Iraq, SaudiArabia),
    (Israel, SaudiArabia),
    // Africa
    (Israel, Egypt),
    (Egypt, Libya),
    (Egypt, Sudan),
    (Libya, Algeria),
    (Libya, Sudan),
    (Libya, Nigeria),
    (Algeria, Morocco),
    (Algeria, Nigeria),
    (Nigeria, Congo),
    (Sudan, Ethiopia),
    (Sudan, Congo),
    (Ethiopia, Kenya),
    (Kenya, Congo),
    (Congo, Angola),
    (Congo, SouthAfrica),
    (Angola, SouthAfrica),
    // Oceania
    (Indonesia, PapuaNewGuinea),
];

/// Fixed maritime routes (undirected).
pub static MARITIME_EDGES: [(Region, Region); 28] = [
    (Greenland, Canada),
    (Greenland, Scandinavia),
    (Cuba, UnitedStates),
    (Cuba, Mexico),
    (Cuba, CentralAmerica),
    (Cuba, Venezuela),
    (UnitedStates, UnitedKingdom),
    (Japan, UnitedStates),
    (Brazil, Nigeria),
    (UnitedKingdom, France),
    (UnitedKingdom, Scandinavia),
    (Spain, Morocco),
    (Italy, Libya),
    (Greece, Egypt),
    (SaudiArabia, Egypt),
    (Iran, SaudiArabia),
    (Japan, SouthKorea),
    (Japan, Kamchatka),
    (Japan, Taiwan),
    (Taiwan, China),
    (Taiwan, Philippines),
    (Philippines, Vietnam),
    (Vietnam, Indonesia),
    (Indonesia, Australia),
    (Australia, PapuaNewGuinea),
    (Australia, NewZealand),
    (Kenya, Madagascar),
    (SouthAfrica, Madagascar),
];

/// The two edges that wrap around the map borders.
pub static WRAPAROUND_EDGES: [(Region, Region); 2] = [(Alaska, Kamchatka), (Chile, Australia)];

/// Pre-computed per-region adjacency index.
///
/// Built on first access from the three undirected tables; each pair is
/// stored in both directions, sorted by `from`, with `(start, end)` offsets
/// per region.
struct AdjIndex {
    entries: Vec<AdjacencyEntry>,
    offsets: [(u16, u16); REGION_COUNT],
}

static ADJ_INDEX: LazyLock<AdjIndex> = LazyLock::new(|| {
    let tables: [(&[(Region, Region)], EdgeKind); 3] = [
        (&LAND_EDGES, EdgeKind::Land),
        (&MARITIME_EDGES, EdgeKind::Maritime),
        (&WRAPAROUND_EDGES, EdgeKind::Wraparound),
    ];

    let mut entries = Vec::new();
    for (table, kind) in tables {
        for &(a, b) in table {
            entries.push(AdjacencyEntry { from: a, to: b, kind });
            entries.push(AdjacencyEntry { from: b, to: a, kind });
        }
    }
    entries.sort_by_key(|e| e.from as u8);

    let mut offsets = [(0u16, 0u16); REGION_COUNT];
    let mut i = 0;
    for (r, slot) in offsets.iter_mut().enumerate() {
        let start = i;
        while i < entries.len() && entries[i].from as usize == r {
            i += 1;
        }
        *slot = (start as u16, i as u16);
    }

    AdjIndex { entries, offsets }
});

/// Returns all static adjacency entries leaving the given region.
pub fn adj_from(region: Region) -> &'static [AdjacencyEntry] {
    let index = &*ADJ_INDEX;
    let (start, end) = index.offsets[region as usize];
    &index.entries[start as usize..end as usize]
}

/// Returns how `a` connects to `b` through the static graph, if at all.
///
/// A land border takes precedence over any other connection between the
/// same pair.
pub fn edge_between(a: Region, b: Region) -> Option<EdgeKind> {
    let mut found = None;
    for adj in adj_from(a) {
        if adj.to == b {
            if adj.kind == EdgeKind::Land {
                return Some(EdgeKind::Land);
            }
            found = Some(adj.kind);
        }
    }
    found
}

/// Returns how `a` connects to `b` considering both the static graph and
/// caller-supplied extra edges.
pub fn edge_between_with(a: Region, b: Region, extra: &[ExtraEdge]) -> Option<EdgeKind> {
    edge_between(a, b).or_else(|| {
        extra
            .iter()
            .any(|e| e.other(a) == Some(b))
            .then_some(EdgeKind::Mission)
    })
}

/// Returns true if `a` and `b` are adjacent in the static graph.
pub fn is_adjacent(a: Region, b: Region) -> bool {
    edge_between(a, b).is_some()
}

/// Returns every neighbour of `region`, static and extra, deduplicated.
pub fn neighbors(region: Region, extra: &[ExtraEdge]) -> Vec<Region> {
    let mut result: Vec<Region> = Vec::new();
    for adj in adj_from(region) {
        if !result.contains(&adj.to) {
            result.push(adj.to);
        }
    }
    for e in extra {
        if let Some(other) = e.other(region) {
            if !result.contains(&other) {
                result.push(other);
            }
        }
    }
    result
}
