//! A mixed poset (two disjoint chains) reduces to exactly two orders.

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
fn mixed_poset_needs_exactly_two_orders() {
    let program = Program::new()
        .with_relation(RelationDescriptor::new(
            "r",
            4,
            StorageKind::BTree,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        ))
        .with_operation(scan("r", 0b0001))
        .with_operation(scan("r", 0b0011))
        .with_operation(scan("r", 0b0100))
        .with_operation(scan("r", 0b0110));

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).unwrap();

    let (_, set) = analysis.relations().find(|(r, _)| r.name == "r").unwrap();
    assert_eq!(set.orders().len(), 2, "Dilworth minimum for this poset is 2 chains");

    // Every original pattern must be covered by some chosen order's prefix.
    for pattern in set.searches() {
        let covering = set.orders().iter().find(|order| {
            let len = pattern.cardinality() as usize;
            order.len() >= len
                && SearchMask::from_columns(order[..len].iter().copied()) == pattern
        });
        assert!(covering.is_some(), "pattern {pattern} not covered by any order");
    }
}
