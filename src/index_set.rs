//! Per-relation index selection ([`IndexSet`], component C3).
//!
//! Accumulates observed search patterns for one relation and reduces them to
//! a minimum set of lexicographical column orders, either via the naive
//! one-index-per-pattern path (hash-based storage, or the
//! `SOUFFLE_USE_NAIVE_INDEX` debug escape) or via minimum chain cover over
//! the strict-subset poset, computed with [`MaxMatching`].

use std::collections::BTreeSet;

use crate::config::{naive_index_env_set, naive_warning_should_print, GlobalConfig};
use crate::error::AnalysisError;
use crate::mask::SearchMask;
use crate::matching::{MaxMatching, Node};
use crate::storage::{classify, StorageKind};

/// An order: the sequence of column indices defining an index's
/// lexicographical sort. Every entry is distinct.
pub type Order = Vec<usize>;

/// A strictly increasing (by subset) sequence of search patterns, in the
/// order chain links are followed — *not* sorted by mask value. See
/// `DESIGN.md`, "Chain representation".
pub type Chain = Vec<SearchMask>;

/// Per-relation accumulator of search patterns and the orders chosen to
/// cover them.
///
/// Lifecycle: created with [`IndexSet::new`], populated monotonically via
/// [`add_search`](Self::add_search), then frozen by a single call to
/// [`solve`](Self::solve). Any further mutation after `solve` is a
/// programmer error ([`AnalysisError::AlreadySolved`]).
#[derive(Debug)]
pub struct IndexSet {
    arity: u32,
    storage: StorageKind,
    searches: BTreeSet<SearchMask>,
    orders: Vec<Order>,
    chain_to_order: Vec<Chain>,
    solved: bool,
}

impl IndexSet {
    /// Creates an empty index set for a relation of the given arity and
    /// storage kind.
    pub fn new(arity: u32, storage: StorageKind) -> Self {
        IndexSet {
            arity,
            storage,
            searches: BTreeSet::new(),
            orders: Vec::new(),
            chain_to_order: Vec::new(),
            solved: false,
        }
    }

    /// Declared arity of the relation this index set belongs to.
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Observed search patterns, in ascending mask order (stable iteration,
    /// required for the Determinism property).
    pub fn searches(&self) -> impl Iterator<Item = SearchMask> + '_ {
        self.searches.iter().copied()
    }

    /// Chosen orders, in the order they were produced by `solve`.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The chain that produced each order, `chain_to_order()[i]` paired with
    /// `orders()[i]`.
    pub fn chain_to_order(&self) -> &[Chain] {
        &self.chain_to_order
    }

    /// Records an observed search pattern. Idempotent on duplicates (backed
    /// by a `BTreeSet`).
    ///
    /// # Errors
    /// Returns [`AnalysisError::AlreadySolved`] if called after `solve`, or
    /// [`AnalysisError::MaskExceedsArity`] if `mask` sets a bit at or beyond
    /// this relation's arity.
    pub fn add_search(&mut self, mask: SearchMask) -> Result<(), AnalysisError> {
        if self.solved {
            return Err(AnalysisError::AlreadySolved);
        }
        if !mask.fits_arity(self.arity) {
            return Err(AnalysisError::MaskExceedsArity {
                mask: mask.bits(),
                arity: self.arity,
            });
        }
        self.searches.insert(mask);
        Ok(())
    }

    /// Reduces the observed searches to a minimum set of orders.
    ///
    /// # Errors
    /// Returns [`AnalysisError::DoubleSolve`] if called more than once.
    pub fn solve(&mut self, config: &dyn GlobalConfig) -> Result<(), AnalysisError> {
        if self.solved {
            return Err(AnalysisError::DoubleSolve);
        }
        self.solved = true;

        if self.searches.is_empty() {
            return Ok(());
        }

        if classify(self.storage, config) || naive_index_env_set() {
            if naive_warning_should_print() {
                println!("WARNING: auto index selection disabled, naive indexes are utilized!!");
            }
            self.solve_naive();
        } else {
            self.solve_optimal();
        }

        self.verify_coverage();
        Ok(())
    }

    /// Naive path: one order per pattern, ascending set bits, singleton chain.
    fn solve_naive(&mut self) {
        for &mask in &self.searches {
            let order: Order = mask.columns().collect();
            self.orders.push(order);
            self.chain_to_order.push(vec![mask]);
        }
    }

    /// Optimal path: build the strict-subset bipartite graph, run
    /// Hopcroft–Karp, extract chains, construct one order per chain.
    fn solve_optimal(&mut self) {
        let mut matching = MaxMatching::new();

        // For every ordered pair (s, t) with s a strict subset of t, add an
        // edge A(s) -> B(t). This orientation is required for Dilworth's
        // reduction and must not be symmetrised (see DESIGN.md).
        let mut has_edge = false;
        for &s in &self.searches {
            for &t in &self.searches {
                if s.is_strict_subset_of(t) {
                    matching.add_edge(Node::A(s), Node::B(t));
                    has_edge = true;
                }
            }
        }

        let matched = matching.solve().clone();

        if !has_edge {
            // Anti-chain: no subset relations at all. Emit one singleton
            // chain per pattern (the original source's early-return bug is
            // deliberately not reproduced — see DESIGN.md).
            for &mask in &self.searches {
                self.chain_to_order.push(vec![mask]);
            }
        } else {
            // A pattern starts a chain iff it is unmatched on the B side,
            // i.e. nothing maps to it as a subset's superset.
            for &mask in &self.searches {
                if matched.get(&Node::B(mask)).is_none() {
                    self.chain_to_order.push(follow_chain(mask, &matched));
                }
            }
        }

        for chain in self.chain_to_order.clone() {
            self.orders.push(order_from_chain(&chain));
        }
    }

    /// Asserts the coverage invariant for every observed pattern: the first
    /// `cardinality(mask)` entries of its chosen order reconstruct exactly
    /// `mask`. A failure here is an internal bug, never an input problem.
    fn verify_coverage(&self) {
        for (chain, order) in self.chain_to_order.iter().zip(self.orders.iter()) {
            for &mask in chain {
                let len = mask.cardinality() as usize;
                assert!(
                    order.len() >= len,
                    "order too short to cover pattern {mask}"
                );
                let reconstructed = SearchMask::from_columns(order[..len].iter().copied());
                assert_eq!(
                    reconstructed, mask,
                    "incorrect lexicographical order for pattern {mask}"
                );
            }
        }
    }
}

/// Builds an order from a chain: the set bits of the first mask, then for
/// each subsequent mask the bits newly introduced relative to its
/// predecessor, each sub-run in ascending column order.
fn order_from_chain(chain: &[SearchMask]) -> Order {
    let mut order = Vec::new();
    let mut prev = chain[0];
    order.extend(prev.columns());
    for &next in &chain[1..] {
        order.extend(prev.diff(next).columns());
        prev = next;
    }
    order
}

/// Follows matching links from an A-side-unmatched-on-B mask, hopping
/// `A(current) -> B(mate)` until the next mask has no mate on the A side.
fn follow_chain(start: SearchMask, matched: &std::collections::BTreeMap<Node, Node>) -> Chain {
    let mut chain = vec![start];
    let mut current = start;
    while let Some(Node::B(next)) = matched.get(&Node::A(current)) {
        chain.push(*next);
        current = *next;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfig;

    fn mask(bits: u64) -> SearchMask {
        SearchMask::from_bits(bits)
    }

    #[test]
    fn empty_searches_is_a_no_op() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert!(set.orders().is_empty());
    }

    #[test]
    fn single_pattern_yields_single_order() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        set.add_search(mask(0b0101)).unwrap();
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert_eq!(set.orders(), &[vec![0usize, 2]]);
    }

    #[test]
    fn chain_of_three_collapses_to_one_order() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        for m in [0b0001u64, 0b0011, 0b0111] {
            set.add_search(mask(m)).unwrap();
        }
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert_eq!(set.orders().len(), 1);
        assert_eq!(set.orders()[0], vec![0, 1, 2]);
    }

    #[test]
    fn anti_chain_yields_one_order_per_pattern() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        for m in [0b0001u64, 0b0010, 0b0100] {
            set.add_search(mask(m)).unwrap();
        }
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert_eq!(set.orders().len(), 3);
        for order in set.orders() {
            assert_eq!(order.len(), 1);
        }
    }

    #[test]
    fn mixed_poset_yields_two_orders() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        for m in [0b0001u64, 0b0011, 0b0100, 0b0110] {
            set.add_search(mask(m)).unwrap();
        }
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert_eq!(set.orders().len(), 2);
    }

    #[test]
    fn add_search_after_solve_is_an_error() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        set.add_search(mask(0b0001)).unwrap();
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert!(matches!(
            set.add_search(mask(0b0010)),
            Err(AnalysisError::AlreadySolved)
        ));
    }

    #[test]
    fn solve_twice_is_an_error() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        set.add_search(mask(0b0001)).unwrap();
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert!(matches!(set.solve(&cfg), Err(AnalysisError::DoubleSolve)));
    }

    #[test]
    fn mask_beyond_arity_is_rejected() {
        let mut set = IndexSet::new(2, StorageKind::BTree);
        assert!(matches!(
            set.add_search(mask(0b0100)),
            Err(AnalysisError::MaskExceedsArity { .. })
        ));
    }

    #[test]
    fn duplicate_add_search_is_idempotent() {
        let mut set = IndexSet::new(4, StorageKind::BTree);
        set.add_search(mask(0b0011)).unwrap();
        set.add_search(mask(0b0011)).unwrap();
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert_eq!(set.orders().len(), 1);
    }

    #[test]
    fn hashset_storage_forces_naive_path() {
        let mut set = IndexSet::new(4, StorageKind::HashSet);
        for m in [0b0001u64, 0b0011, 0b0111] {
            set.add_search(mask(m)).unwrap();
        }
        let cfg = InMemoryConfig::default();
        set.solve(&cfg).unwrap();
        assert_eq!(set.orders().len(), 3);
        for (chain, _) in set.chain_to_order().iter().zip(set.orders()) {
            assert_eq!(chain.len(), 1);
        }
    }
}
