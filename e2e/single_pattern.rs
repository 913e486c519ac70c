//! A single search pattern yields a single order covering it.

use ram_index_select::{
    config::InMemoryConfig, mask::SearchMask, program::{Operation, Program, RelationDescriptor},
    storage::StorageKind, IndexAnalysis,
};

#[test]
fn single_pattern_produces_one_order_covering_it() {
    let program = Program::new()
        .with_relation(RelationDescriptor::new(
            "r",
            4,
            StorageKind::BTree,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        ))
        .with_operation(Operation::Scan {
            relation: "r".into(),
            columns: SearchMask::from_bits(0b0101),
        });

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).expect("analysis should succeed");

    let (_, set) = analysis.relations().find(|(r, _)| r.name == "r").unwrap();
    assert_eq!(set.orders(), &[vec![0usize, 2]]);
    assert_eq!(set.chain_to_order().len(), 1);
    assert_eq!(set.chain_to_order()[0], vec![SearchMask::from_bits(0b0101)]);
}
