//! `SOUFFLE_USE_NAIVE_INDEX` forces the naive path even for a relation whose
//! patterns form a chain.

use ram_index_select::{
    config::{self, InMemoryConfig},
    mask::SearchMask,
    program::{Operation, Program, RelationDescriptor},
    storage::StorageKind,
    IndexAnalysis,
};

fn scan(relation: &str, bits: u64) -> Operation {
    Operation::Scan {
        relation: relation.to_string(),
        columns: SearchMask::from_bits(bits),
    }
}

#[test]
fn env_override_forces_one_index_per_pattern() {
    std::env::set_var(config::ENV_NAIVE_INDEX, "1");
    config::reset_naive_warning();

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
    assert_eq!(set.orders().len(), 3);
    assert_eq!(set.orders()[0], vec![0]);
    assert_eq!(set.orders()[1], vec![0, 1]);
    assert_eq!(set.orders()[2], vec![0, 1, 2]);
    for chain in set.chain_to_order() {
        assert_eq!(chain.len(), 1);
    }

    std::env::remove_var(config::ENV_NAIVE_INDEX);
    config::reset_naive_warning();
}
