//! Bipartite maximum-cardinality matching (Hopcroft–Karp).
//!
//! Rust port of `MaxMatching` from `IndexSetAnalysis.cpp`. Edges go from
//! A-side nodes to B-side nodes; a node's "side" is tracked explicitly via
//! [`Node`] rather than relying on disjoint integer ranges, since the same
//! [`SearchMask`](crate::mask::SearchMask) value legitimately appears on
//! both sides of the bipartition (a pattern can be both someone's subset and
//! someone else's superset).

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::mask::SearchMask;

/// A tagged bipartite-graph node. `A` and `B` are disjoint label spaces even
/// when they wrap the same underlying [`SearchMask`]. `Ord` is derived (not
/// just `Hash`) so the graph can be backed by `BTreeMap`/`BTreeSet`: the
/// matching is only unique up to Dilworth's minimum chain count, so when a
/// poset admits more than one maximum matching, iterating nodes and their
/// neighbours in a fixed order is what makes `solve` reproducible across
/// runs (see the Determinism property, `spec.md` §8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    A(SearchMask),
    B(SearchMask),
}

/// Bipartite graph over [`Node`]s, solved via Hopcroft–Karp.
///
/// Edges are added incrementally with [`add_edge`](Self::add_edge); parallel
/// edges are coalesced automatically because each node's neighbour set is a
/// `BTreeSet`, not a multiset. `BTreeMap`/`BTreeSet` (rather than the hash
/// equivalents) keep node and neighbour iteration in a fixed order, which
/// `solve` needs for a deterministic result.
#[derive(Debug, Default)]
pub struct MaxMatching {
    graph: BTreeMap<Node, BTreeSet<Node>>,
    match_of: BTreeMap<Node, Node>,
}

impl MaxMatching {
    /// Creates an empty graph.
    pub fn new() -> Self {
        MaxMatching {
            graph: BTreeMap::new(),
            match_of: BTreeMap::new(),
        }
    }

    /// Adds a directed edge `u -> v`. `v` is also registered as a graph node
    /// with (possibly) no outgoing edges of its own, so B-side nodes are
    /// visible to iteration even though this is a one-directional (A -> B)
    /// adjacency, matching the source's orientation (see `DESIGN.md`, "Open
    /// Question — partial-subset semantics").
    pub fn add_edge(&mut self, u: Node, v: Node) {
        self.graph.entry(u).or_default().insert(v);
        self.graph.entry(v).or_default();
    }

    /// The current match of `v`, if any.
    #[inline]
    pub fn mate(&self, v: Node) -> Option<Node> {
        self.match_of.get(&v).copied()
    }

    /// Computes a maximum-cardinality matching and returns the symmetric
    /// `A->B`/`B->A` mapping. Safe to call on an empty graph (returns an
    /// empty matching). After this call, no augmenting path exists.
    pub fn solve(&mut self) -> &BTreeMap<Node, Node> {
        loop {
            let layers = self.bfs_layers();
            if !layers.reaches_free_b {
                break;
            }
            let a_nodes: Vec<Node> = self
                .graph
                .keys()
                .copied()
                .filter(|n| matches!(n, Node::A(_)))
                .collect();
            for u in a_nodes {
                if self.match_of.get(&u).is_none() {
                    let mut visited = HashSet::new();
                    self.dfs_augment(u, &layers, &mut visited);
                }
            }
        }
        &self.match_of
    }

    /// One BFS phase: layers every node by distance from an unmatched
    /// A-side node, and records whether some augmenting path reaches a free
    /// (unmatched) B-side node.
    fn bfs_layers(&self) -> BfsLayers {
        let mut dist: BTreeMap<Node, u32> = BTreeMap::new();
        let mut queue = VecDeque::new();
        let mut reaches_free_b = false;

        for &u in self.graph.keys() {
            if matches!(u, Node::A(_)) && self.match_of.get(&u).is_none() {
                dist.insert(u, 0);
                queue.push_back(u);
            }
        }

        while let Some(u) = queue.pop_front() {
            let Some(neighbours) = self.graph.get(&u) else {
                continue;
            };
            for &v in neighbours {
                match self.match_of.get(&v) {
                    None => reaches_free_b = true,
                    Some(&w) => {
                        if !dist.contains_key(&w) {
                            dist.insert(w, dist[&u] + 1);
                            queue.push_back(w);
                        }
                    }
                }
            }
        }

        BfsLayers { dist, reaches_free_b }
    }

    /// DFS augmentation along the BFS layering computed for the current
    /// phase. Returns `true` and updates `match_of` iff an augmenting path
    /// starting at `u` was found.
    fn dfs_augment(&mut self, u: Node, layers: &BfsLayers, visited: &mut HashSet<Node>) -> bool {
        if !visited.insert(u) {
            return false;
        }
        let neighbours: Vec<Node> = match self.graph.get(&u) {
            Some(n) => n.iter().copied().collect(),
            None => Vec::new(),
        };
        let u_dist = layers.dist.get(&u).copied();
        for v in neighbours {
            let mate = self.match_of.get(&v).copied();
            let on_layer = match mate {
                None => true,
                Some(w) => layers.dist.get(&w).copied() == u_dist.map(|d| d + 1),
            };
            if !on_layer {
                continue;
            }
            let extended = match mate {
                None => true,
                Some(w) => self.dfs_augment(w, layers, visited),
            };
            if extended {
                self.match_of.insert(u, v);
                self.match_of.insert(v, u);
                return true;
            }
        }
        false
    }
}

/// BFS distance layering computed by one phase of Hopcroft–Karp.
struct BfsLayers {
    dist: BTreeMap<Node, u32>,
    reaches_free_b: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(m: u64) -> Node {
        Node::A(SearchMask::from_bits(m))
    }
    fn b(m: u64) -> Node {
        Node::B(SearchMask::from_bits(m))
    }

    #[test]
    fn empty_graph_solves_to_empty_matching() {
        let mut g = MaxMatching::new();
        let m = g.solve();
        assert!(m.is_empty());
    }

    #[test]
    fn single_edge_matches_both_sides() {
        let mut g = MaxMatching::new();
        g.add_edge(a(0b001), b(0b011));
        let m = g.solve().clone();
        assert_eq!(m.get(&a(0b001)), Some(&b(0b011)));
        assert_eq!(m.get(&b(0b011)), Some(&a(0b001)));
    }

    #[test]
    fn matching_is_symmetric_for_every_pair() {
        let mut g = MaxMatching::new();
        g.add_edge(a(1), b(3));
        g.add_edge(a(2), b(3));
        g.add_edge(a(2), b(6));
        let m = g.solve().clone();
        for (&u, &v) in m.iter() {
            assert_eq!(m.get(&v), Some(&u), "matching not symmetric for {:?}", u);
        }
    }

    #[test]
    fn maximum_matching_on_a_chain_uses_every_edge() {
        // a(1)->b(3), a(3)->b(7): a path poset, matching size should be 2 pairs.
        let mut g = MaxMatching::new();
        g.add_edge(a(1), b(3));
        g.add_edge(a(3), b(7));
        let m = g.solve();
        assert_eq!(m.len() / 2, 2);
    }

    #[test]
    fn parallel_edges_are_coalesced() {
        let mut g = MaxMatching::new();
        g.add_edge(a(1), b(3));
        g.add_edge(a(1), b(3));
        assert_eq!(g.graph.get(&a(1)).unwrap().len(), 1);
    }

    #[test]
    fn diamond_poset_matches_maximum_not_greedy() {
        // A-side: 1, 2 ; both have super-set 7 as well as their own direct
        // super-sets 3 and 5. A maximum matching must pick one A for 7 and
        // leave the other matched to its direct superset, total 2 pairs.
        let mut g = MaxMatching::new();
        g.add_edge(a(1), b(3));
        g.add_edge(a(1), b(7));
        g.add_edge(a(2), b(5));
        g.add_edge(a(2), b(7));
        g.add_edge(a(3), b(7));
        g.add_edge(a(5), b(7));
        let m = g.solve();
        // Only three distinct B-side targets exist (3, 5, 7), so the maximum
        // matching is bounded at 3 pairs even though there are four A nodes.
        assert_eq!(m.len() / 2, 3);
    }
}
