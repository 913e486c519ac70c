//! The intermediate program model walked by [`crate::analysis::IndexAnalysis`].
//!
//! Clause normalisation and AST-to-RAM lowering happen upstream of this
//! analysis; this module only models their output — a translation unit is a
//! bag of relations plus the operations issued against them, each operation
//! carrying the search mask it contributes.
//!
//! A closed `Operation` enum stands in for the virtual-dispatch downcasts a
//! C++ visitor would use (`dynamic_cast<const RamScan*>`, etc.) — a
//! dispatching `match` replaces a chain of `dynamic_cast`s.

use serde::{Deserialize, Serialize};

use crate::mask::SearchMask;
use crate::storage::StorageKind;

/// A relation's static description: name, arity, declared storage, and
/// column names for diagnostic printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub name: String,
    pub arity: u32,
    pub storage: StorageKind,
    pub columns: Vec<String>,
}

impl RelationDescriptor {
    pub fn new(
        name: impl Into<String>,
        arity: u32,
        storage: StorageKind,
        columns: Vec<String>,
    ) -> Self {
        let name = name.into();
        debug_assert_eq!(
            columns.len() as u32,
            arity,
            "relation {name} declares {arity} columns but {} names were given",
            columns.len()
        );
        RelationDescriptor {
            name,
            arity,
            storage,
            columns,
        }
    }

    /// The diagnostic name of column `i`. Equivalent to `RamRelation::getArg`.
    pub fn arg_name(&self, i: usize) -> &str {
        self.columns
            .get(i)
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }
}

/// The three search-contributing operation kinds, plus a catch-all for every
/// other RAM operation the walk passes through without touching.
///
/// Corresponds to `RamScan`, `RamAggregate`, and `RamNotExists` in the
/// original source; `Other` absorbs everything else the real intermediate
/// representation contains (joins, projections, control flow, ...), none of
/// which contribute search patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// A scan-by-range: the operation's `rangeQueryColumns` mask.
    Scan { relation: String, columns: SearchMask },
    /// An aggregate: the operation's `rangeQueryColumns` mask.
    Aggregate { relation: String, columns: SearchMask },
    /// An existence-negation probe: the operation's full key mask.
    NotExists { relation: String, columns: SearchMask },
    /// Any other RAM operation; ignored by the analysis.
    Other,
}

impl Operation {
    /// The relation this operation touches, if it is a search-contributing
    /// kind.
    pub fn relation(&self) -> Option<&str> {
        match self {
            Operation::Scan { relation, .. }
            | Operation::Aggregate { relation, .. }
            | Operation::NotExists { relation, .. } => Some(relation.as_str()),
            Operation::Other => None,
        }
    }

    /// The search mask this operation contributes, if it is a
    /// search-contributing kind.
    pub fn mask(&self) -> Option<SearchMask> {
        match self {
            Operation::Scan { columns, .. }
            | Operation::Aggregate { columns, .. }
            | Operation::NotExists { columns, .. } => Some(*columns),
            Operation::Other => None,
        }
    }
}

/// A compiled intermediate program: the relations it declares and the
/// operations issued against them, in depth-first program order.
///
/// Stands in for the opaque program node visitor a real compiler front end
/// would hand the analysis, without mandating a concrete tree shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    pub relations: Vec<RelationDescriptor>,
    pub operations: Vec<Operation>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn with_relation(mut self, relation: RelationDescriptor) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Depth-first walk over every operation node. The real translation unit
    /// walks a tree; this in-memory model flattens it to a `Vec` at
    /// construction time, so walking it is just linear iteration — the
    /// adaptor boundary is where tree-shaped traversal would actually live.
    pub fn visit_depth_first<'a>(&'a self) -> impl Iterator<Item = &'a Operation> {
        self.operations.iter()
    }

    pub fn relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_relation_and_mask_ignore_other() {
        assert_eq!(Operation::Other.relation(), None);
        assert_eq!(Operation::Other.mask(), None);
    }

    #[test]
    fn operation_relation_and_mask_report_for_search_kinds() {
        let op = Operation::Scan {
            relation: "edge".to_string(),
            columns: SearchMask::from_bits(0b01),
        };
        assert_eq!(op.relation(), Some("edge"));
        assert_eq!(op.mask(), Some(SearchMask::from_bits(0b01)));
    }

    #[test]
    fn program_lookup_finds_declared_relations() {
        let program = Program::new().with_relation(RelationDescriptor::new(
            "edge",
            2,
            StorageKind::BTree,
            vec!["x".into(), "y".into()],
        ));
        assert!(program.relation("edge").is_some());
        assert!(program.relation("missing").is_none());
    }
}
