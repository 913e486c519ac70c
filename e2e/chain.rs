//! A strict chain of patterns collapses to a single covering order.

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
fn three_nested_patterns_collapse_to_one_order() {
    let program = Program::new()
        .with_relation(RelationDescriptor::new(
            "r",
            4,
            StorageKind::BTree,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        ))
        .with_operation(scan("r", 0b0001))
        .with_operation(scan("r", 0b0011))
        .with_operation(scan("r", 0b0111));

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).unwrap();

    let (_, set) = analysis.relations().find(|(r, _)| r.name == "r").unwrap();
    assert_eq!(set.orders().len(), 1);
    assert_eq!(set.orders()[0], vec![0, 1, 2]);
    assert_eq!(set.chain_to_order()[0].len(), 3);
}
