//! A relation with no observed searches needs no indexes at all.

use ram_index_select::{config::InMemoryConfig, program::{Program, RelationDescriptor}, report, storage::StorageKind, IndexAnalysis};

#[test]
fn relation_with_no_searches_needs_no_indexes() {
    let program = Program::new().with_relation(RelationDescriptor::new(
        "r",
        3,
        StorageKind::BTree,
        vec!["a".into(), "b".into(), "c".into()],
    ));

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).unwrap();

    let (_, set) = analysis.relations().find(|(r, _)| r.name == "r").unwrap();
    assert!(set.orders().is_empty());
    assert!(set.chain_to_order().is_empty());

    let mut buf = Vec::new();
    report::print(&analysis, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Number of Indexes: 0"));
}

#[test]
fn program_with_no_relations_produces_an_empty_report() {
    let program = Program::new();
    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).unwrap();
    assert_eq!(analysis.relations().count(), 0);
}
