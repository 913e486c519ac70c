#![no_main]
use libfuzzer_sys::fuzz_target;

use ram_index_select::{config::InMemoryConfig, mask::SearchMask, storage::StorageKind, IndexSet};

const ARITY: u32 = 12;

fuzz_target!(|data: &[u8]| {
    // Derive a set of search masks from raw fuzzer bytes: each pair of bytes
    // becomes one mask, truncated to ARITY bits. Skipping an odd trailing
    // byte is fine — it just means one fewer pattern this run.
    let mut set = IndexSet::new(ARITY, StorageKind::BTree);
    for chunk in data.chunks_exact(2) {
        let raw = u16::from_le_bytes([chunk[0], chunk[1]]);
        let mask = SearchMask::from_bits((raw as u64) & ((1u64 << ARITY) - 1));
        set.add_search(mask).unwrap();
    }

    let config = InMemoryConfig::default();
    if set.solve(&config).is_err() {
        // Only possible if `solve` were called twice, which it isn't here.
        return;
    }

    // Coverage invariant: every original pattern's chosen order's first
    // `cardinality` entries reconstruct exactly that pattern.
    for (chain, order) in set.chain_to_order().iter().zip(set.orders()) {
        for &pattern in chain {
            let len = pattern.cardinality() as usize;
            assert!(order.len() >= len);
            let reconstructed = SearchMask::from_columns(order[..len].iter().copied());
            assert_eq!(reconstructed, pattern);
        }
    }
});
