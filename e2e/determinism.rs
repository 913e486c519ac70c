//! Determinism and idempotence: running the analysis twice on the same
//! inputs yields identical orders, and duplicate `add_search` calls never
//! change the result.

use ram_index_select::{
    config::InMemoryConfig, mask::SearchMask, program::{Operation, Program, RelationDescriptor},
    storage::StorageKind, IndexAnalysis,
};

fn program_with(patterns: &[u64]) -> Program {
    let mut program = Program::new().with_relation(RelationDescriptor::new(
        "r",
        4,
        StorageKind::BTree,
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
    ));
    for &bits in patterns {
        program = program.with_operation(Operation::Scan {
            relation: "r".into(),
            columns: SearchMask::from_bits(bits),
        });
    }
    program
}

#[test]
fn running_twice_on_the_same_program_yields_identical_orders() {
    let patterns = [0b0001u64, 0b0011, 0b0100, 0b0110, 0b1111];
    let config = InMemoryConfig::default();

    let program_a = program_with(&patterns);
    let mut analysis_a = IndexAnalysis::new();
    analysis_a.run(&program_a, &config).unwrap();
    let orders_a: Vec<_> = analysis_a
        .relations()
        .find(|(r, _)| r.name == "r")
        .unwrap()
        .1
        .orders()
        .to_vec();

    let program_b = program_with(&patterns);
    let mut analysis_b = IndexAnalysis::new();
    analysis_b.run(&program_b, &config).unwrap();
    let orders_b: Vec<_> = analysis_b
        .relations()
        .find(|(r, _)| r.name == "r")
        .unwrap()
        .1
        .orders()
        .to_vec();

    assert_eq!(orders_a, orders_b);
}

#[test]
fn duplicated_searches_do_not_change_the_result() {
    let config = InMemoryConfig::default();

    let program_once = program_with(&[0b0001, 0b0011, 0b0111]);
    let mut analysis_once = IndexAnalysis::new();
    analysis_once.run(&program_once, &config).unwrap();
    let orders_once: Vec<_> = analysis_once
        .relations()
        .find(|(r, _)| r.name == "r")
        .unwrap()
        .1
        .orders()
        .to_vec();

    // Same patterns, each issued twice (once via Scan, once via NotExists).
    let mut program_dup = Program::new().with_relation(RelationDescriptor::new(
        "r",
        4,
        StorageKind::BTree,
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
    ));
    for &bits in &[0b0001u64, 0b0011, 0b0111] {
        program_dup = program_dup
            .with_operation(Operation::Scan {
                relation: "r".into(),
                columns: SearchMask::from_bits(bits),
            })
            .with_operation(Operation::NotExists {
                relation: "r".into(),
                columns: SearchMask::from_bits(bits),
            });
    }
    let mut analysis_dup = IndexAnalysis::new();
    analysis_dup.run(&program_dup, &config).unwrap();
    let orders_dup: Vec<_> = analysis_dup
        .relations()
        .find(|(r, _)| r.name == "r")
        .unwrap()
        .1
        .orders()
        .to_vec();

    assert_eq!(orders_once, orders_dup);
}
