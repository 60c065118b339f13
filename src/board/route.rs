//! Supply-route resolver.
//!
//! A supply route is a path of regions all held by one player, connected by
//! land, maritime, wraparound or mission-granted edges.

use std::collections::VecDeque;

use super::adjacency::{adj_from, ExtraEdge};
use super::player::PlayerId;
use super::region::{Region, REGION_COUNT};
use super::state::OwnershipMap;

/// Returns true if `start` and `end` are joined by regions held by `player`.
///
/// Both endpoints must be held by `player`; a region always reaches itself
/// if held. Never fails: disconnected queries simply return false.
pub fn has_route(
    start: Region,
    end: Region,
    player: PlayerId,
    ownership: &OwnershipMap,
    extra: &[ExtraEdge],
) -> bool {
    if !ownership.is_held_by(start, player) || !ownership.is_held_by(end, player) {
        return false;
    }
    if start == end {
        return true;
    }

    let mut seen = [false; REGION_COUNT];
    let mut queue = VecDeque::with_capacity(16);
    seen[start as usize] = true;
    queue.push_back(start);

    while let Some(r) = queue.pop_front() {
        let statics = adj_from(r).iter().map(|a| a.to);
        let overlay = extra.iter().filter_map(|e| e.other(r));
        for next in statics.chain(overlay) {
            if seen[next as usize] || !ownership.is_held_by(next, player) {
                continue;
            }
            if next == end {
                return true;
            }
            seen[next as usize] = true;
            queue.push_back(next);
        }
    }
    false
}

/// Every region reachable from `start` through `player`'s territory,
/// including `start` itself. Empty if `start` is not held by `player`.
pub fn connected_component(
    start: Region,
    player: PlayerId,
    ownership: &OwnershipMap,
    extra: &[ExtraEdge],
) -> Vec<Region> {
    if !ownership.is_held_by(start, player) {
        return Vec::new();
    }
    let mut seen = [false; REGION_COUNT];
    let mut out = vec![start];
    seen[start as usize] = true;
    let mut i = 0;
    while i < out.len() {
        let r = out[i];
        i += 1;
        let statics = adj_from(r).iter().map(|a| a.to);
        let overlay = extra.iter().filter_map(|e| e.other(r));
        for next in statics.chain(overlay) {
            if !seen[next as usize] && ownership.is_held_by(next, player) {
                seen[next as usize] = true;
                out.push(next);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::Owner;
    use Region::*;

    const P: PlayerId = PlayerId(0);
    const Q: PlayerId = PlayerId(1);

    fn map(held: &[(Region, PlayerId)]) -> OwnershipMap {
        let mut m = OwnershipMap::new();
        for &(r, p) in held {
            m.set(r, Owner::Held(p));
        }
        m
    }

    #[test]
    fn same_region_requires_ownership() {
        let m = map(&[(Argentina, P)]);
        assert!(has_route(Argentina, Argentina, P, &m, &[]));
        assert!(!has_route(Chile, Chile, P, &m, &[]));
    }

    #[test]
    fn land_chain() {
        let m = map(&[(Argentina, P), (Bolivia, P), (Peru, P), (Colombia, P)]);
        assert!(has_route(Argentina, Colombia, P, &m, &[]));
        assert!(has_route(Colombia, Argentina, P, &m, &[]));
    }

    #[test]
    fn foreign_region_breaks_chain() {
        let m = map(&[(Argentina, P), (Bolivia, Q), (Peru, P)]);
        assert!(!has_route(Argentina, Peru, P, &m, &[]));
    }

    #[test]
    fn destroyed_region_blocks_route() {
        let mut m = map(&[(Argentina, P), (Peru, P)]);
        m.set(Bolivia, Owner::Destroyed);
        assert!(!has_route(Argentina, Peru, P, &m, &[]));
    }

    #[test]
    fn maritime_and_wraparound_edges_count() {
        let m = map(&[(UnitedKingdom, P), (France, P)]);
        assert!(has_route(UnitedKingdom, France, P, &m, &[]));
        let m = map(&[(Chile, P), (Australia, P)]);
        assert!(has_route(Chile, Australia, P, &m, &[]));
    }

    #[test]
    fn mission_edge_joins_components() {
        let m = map(&[(Greece, P), (Turkey, P)]);
        assert!(!has_route(Greece, Turkey, P, &m, &[]));
        let extra = [ExtraEdge::new(Greece, Turkey)];
        assert!(has_route(Greece, Turkey, P, &m, &extra));
    }

    #[test]
    fn unowned_endpoint_has_no_route() {
        let m = map(&[(Argentina, P), (Chile, Q)]);
        assert!(!has_route(Argentina, Chile, P, &m, &[]));
        assert!(!has_route(Chile, Argentina, P, &m, &[]));
    }

    #[test]
    fn component_collects_connected_regions() {
        let m = map(&[(Argentina, P), (Chile, P), (Australia, P), (Japan, P)]);
        let mut comp = connected_component(Argentina, P, &m, &[]);
        comp.sort();
        assert_eq!(comp, vec![Chile, Argentina, Australia]);
        assert!(connected_component(Peru, P, &m, &[]).is_empty());
    }
}
