//! The top-level analysis pass (`IndexAnalysis`, component C4).
//!
//! Walks a [`Program`], dispatches every search-contributing operation to
//! its relation's [`IndexSet`], then solves each relation's set of search
//! patterns down to a minimum set of orders.

use std::collections::BTreeMap;

use crate::config::GlobalConfig;
use crate::error::AnalysisError;
use crate::index_set::IndexSet;
use crate::program::{Program, RelationDescriptor};

/// Owns one [`IndexSet`] per relation referenced by the program, and the
/// relation descriptors needed to report on them.
pub struct IndexAnalysis {
    relations: BTreeMap<String, RelationDescriptor>,
    indexes: BTreeMap<String, IndexSet>,
}

impl IndexAnalysis {
    pub fn new() -> Self {
        IndexAnalysis {
            relations: BTreeMap::new(),
            indexes: BTreeMap::new(),
        }
    }

    /// Walks `program` depth-first, accumulating every `Scan`, `Aggregate`,
    /// and `NotExists` operation's mask into the right relation's
    /// `IndexSet` (created lazily on first reference), then solves every
    /// relation's index set.
    pub fn run(&mut self, program: &Program, config: &dyn GlobalConfig) -> Result<(), AnalysisError> {
        for relation in &program.relations {
            self.relations
                .entry(relation.name.clone())
                .or_insert_with(|| relation.clone());
            self.indexes
                .entry(relation.name.clone())
                .or_insert_with(|| IndexSet::new(relation.arity, relation.storage));
        }

        for op in program.visit_depth_first() {
            let (Some(relation), Some(mask)) = (op.relation(), op.mask()) else {
                continue;
            };
            let arity = self
                .relations
                .get(relation)
                .map(|r| r.arity)
                .unwrap_or(crate::mask::SearchMask::MAX_ARITY);
            let storage = self
                .relations
                .get(relation)
                .map(|r| r.storage)
                .unwrap_or(crate::storage::StorageKind::BTree);
            let set = self
                .indexes
                .entry(relation.to_string())
                .or_insert_with(|| IndexSet::new(arity, storage));
            set.add_search(mask)?;
        }

        self.solve_all(config)
    }

    #[cfg(not(feature = "parallel"))]
    fn solve_all(&mut self, config: &dyn GlobalConfig) -> Result<(), AnalysisError> {
        for set in self.indexes.values_mut() {
            set.solve(config)?;
        }
        Ok(())
    }

    /// Solves every relation's `IndexSet` concurrently. Each worker owns its
    /// `IndexSet` exclusively (no relation is shared across tasks), so this
    /// is race-free; the one-shot naive-mode warning is still guarded by the
    /// process-wide atomic in `config`, so it still fires at most once even
    /// under concurrent solving.
    #[cfg(feature = "parallel")]
    fn solve_all(&mut self, config: &dyn GlobalConfig) -> Result<(), AnalysisError> {
        use rayon::prelude::*;

        // `GlobalConfig` is a read-only `&dyn` reference shared across
        // threads; it must be `Sync` for this to be sound, which the trait
        // bound on `run` guarantees via `dyn GlobalConfig + Sync` below.
        self.indexes
            .values_mut()
            .collect::<Vec<_>>()
            .into_par_iter()
            .try_for_each(|set| set.solve(config))
    }

    /// Observed search patterns and chosen orders for every relation,
    /// keyed by relation name in a stable (ascending) order.
    pub fn relations(&self) -> impl Iterator<Item = (&RelationDescriptor, &IndexSet)> {
        self.relations.iter().filter_map(|(name, rel)| {
            self.indexes.get(name).map(|set| (rel, set))
        })
    }
}

impl Default for IndexAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfig;
    use crate::mask::SearchMask;
    use crate::program::Operation;
    use crate::storage::StorageKind;

    fn edge_program() -> Program {
        Program::new()
            .with_relation(RelationDescriptor::new(
                "edge",
                2,
                StorageKind::BTree,
                vec!["x".into(), "y".into()],
            ))
            .with_operation(Operation::Scan {
                relation: "edge".into(),
                columns: SearchMask::from_bits(0b01),
            })
            .with_operation(Operation::NotExists {
                relation: "edge".into(),
                columns: SearchMask::from_bits(0b11),
            })
            .with_operation(Operation::Other)
    }

    #[test]
    fn run_dispatches_searches_to_the_right_relation() {
        let program = edge_program();
        let cfg = InMemoryConfig::default();
        let mut analysis = IndexAnalysis::new();
        analysis.run(&program, &cfg).unwrap();

        let (_, set) = analysis.relations().find(|(r, _)| r.name == "edge").unwrap();
        assert_eq!(set.searches().count(), 2);
        assert_eq!(set.orders().len(), 1);
    }

    #[test]
    fn run_on_empty_program_is_a_no_op() {
        let program = Program::new();
        let cfg = InMemoryConfig::default();
        let mut analysis = IndexAnalysis::new();
        analysis.run(&program, &cfg).unwrap();
        assert_eq!(analysis.relations().count(), 0);
    }

    #[test]
    fn relation_never_searched_gets_no_orders() {
        let program = Program::new().with_relation(RelationDescriptor::new(
            "unused",
            3,
            StorageKind::BTree,
            vec!["a".into(), "b".into(), "c".into()],
        ));
        let cfg = InMemoryConfig::default();
        let mut analysis = IndexAnalysis::new();
        analysis.run(&program, &cfg).unwrap();
        let (_, set) = analysis.relations().next().unwrap();
        assert!(set.orders().is_empty());
    }
}
