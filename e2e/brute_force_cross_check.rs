//! Minimality cross-check: for small inputs (<= 8 patterns), the number of
//! orders produced must equal an independently computed brute-force minimum
//! chain cover size.

use ram_index_select::{
    config::InMemoryConfig, mask::SearchMask, program::{Operation, Program, RelationDescriptor},
    storage::StorageKind, IndexAnalysis,
};

/// Brute-force minimum chain cover: try every partition of `patterns` into
/// chains (by assigning each pattern to one of up to `patterns.len()`
/// buckets) and keep the smallest bucket count where every bucket is a
/// valid chain (totally ordered by strict subset).
fn brute_force_min_chains(patterns: &[SearchMask]) -> usize {
    let n = patterns.len();
    if n == 0 {
        return 0;
    }
    let mut best = n;
    // assignment[i] = which chain bucket pattern i belongs to (0..n)
    let mut assignment = vec![0usize; n];
    loop {
        let num_buckets = assignment.iter().copied().max().unwrap() + 1;
        if num_buckets < best && is_valid_chain_partition(patterns, &assignment, num_buckets) {
            best = num_buckets;
        }

        // Advance to the next assignment in mixed-radix counting, where
        // digit i ranges over 0..=max(assignment[..i])+1 (standard
        // set-partition enumeration, restricted set growth).
        if !advance(&mut assignment) {
            break;
        }
    }
    best
}

fn is_valid_chain_partition(patterns: &[SearchMask], assignment: &[usize], num_buckets: usize) -> bool {
    for bucket in 0..num_buckets {
        let members: Vec<SearchMask> = patterns
            .iter()
            .zip(assignment)
            .filter(|&(_, &a)| a == bucket)
            .map(|(&p, _)| p)
            .collect();
        if members.len() <= 1 {
            continue;
        }
        // Every pair in a chain must be strict-subset comparable.
        for i in 0..members.len() {
            for j in 0..members.len() {
                if i == j {
                    continue;
                }
                if !members[i].is_strict_subset_of(members[j])
                    && !members[j].is_strict_subset_of(members[i])
                {
                    return false;
                }
            }
        }
    }
    true
}

/// Restricted-growth-string increment: `assignment` always satisfies
/// `assignment[i] <= 1 + max(assignment[..i])`.
fn advance(assignment: &mut [usize]) -> bool {
    let n = assignment.len();
    for i in (0..n).rev() {
        let max_prefix = assignment[..i].iter().copied().max().map_or(0, |m| m + 1);
        if assignment[i] < max_prefix {
            assignment[i] += 1;
            for slot in assignment.iter_mut().skip(i + 1) {
                *slot = 0;
            }
            return true;
        }
    }
    false
}

fn check(patterns: &[u64]) {
    let masks: Vec<SearchMask> = patterns.iter().map(|&b| SearchMask::from_bits(b)).collect();
    let expected = brute_force_min_chains(&masks);

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

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis.run(&program, &config).unwrap();
    let (_, set) = analysis.relations().find(|(r, _)| r.name == "r").unwrap();

    assert_eq!(
        set.orders().len(),
        expected,
        "matching-based solve disagrees with brute-force minimum chain cover for {patterns:?}"
    );
}

#[test]
fn matches_brute_force_on_a_chain() {
    check(&[0b0001, 0b0011, 0b0111]);
}

#[test]
fn matches_brute_force_on_an_anti_chain() {
    check(&[0b0001, 0b0010, 0b0100]);
}

#[test]
fn matches_brute_force_on_a_mixed_poset() {
    check(&[0b0001, 0b0011, 0b0100, 0b0110]);
}

#[test]
fn matches_brute_force_on_a_denser_random_looking_set() {
    check(&[0b0001, 0b0011, 0b0101, 0b0111, 0b1111, 0b0010, 0b1010]);
}
