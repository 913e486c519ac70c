//! An anti-chain (no pattern is a subset of another) yields one singleton
//! chain per pattern: every pattern must get its own order, not just the
//! first one encountered.

use std::collections::BTreeSet;

use ram_index_select::{
    config::InMemoryConfig, mask::SearchMask, program::{Operation, Program, RelationDescriptor},
    storage::StorageKind, IndexAnalysis,
};

fn scan(relation: &str, bits: u64) -> Operation {
    Operation::Scan {
        relation: relation.to_string(),
        columns: SearchMask::from_bits(bits),
    }
}

#[test]
fn disjoint_single_column_patterns_each_get_their_own_order() {
    let program = Program::new()
        .with_relation(RelationDescriptor::new(
            "r",
            4,
            StorageKind::BTree,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        ))
        .with_operation(scan("r", 0b0001))
        .with_operation(scan("r", 0b0010))
        .with_operation(scan("r", 0b0100));

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).unwrap();

    let (_, set) = analysis.relations().find(|(r, _)| r.name == "r").unwrap();
    assert_eq!(set.orders().len(), 3, "every pattern must survive, not just the first");
    assert_eq!(set.chain_to_order().len(), 3);
    for chain in set.chain_to_order() {
        assert_eq!(chain.len(), 1, "anti-chain orders must be singleton chains");
    }

    let covered: BTreeSet<usize> = set.orders().iter().flatten().copied().collect();
    assert_eq!(covered, BTreeSet::from([0, 1, 2]));
}
