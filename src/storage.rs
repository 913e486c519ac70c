//! Relation storage kinds and the naive/optimal classifier (C5).

use serde::{Deserialize, Serialize};

use crate::config::GlobalConfig;

/// A relation's declared storage implementation.
///
/// All variants except [`StorageKind::HashSet`] preserve a meaningful
/// lexicographical order over their keys and so benefit from the optimal
/// (minimum chain cover) index-selection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    BTree,
    Brie,
    RbtSet,
    EqRel,
    HashSet,
}

/// `true` iff the relation should use the naive one-index-per-pattern path:
/// either its storage is hash-based, or the global config's
/// `data-structure` key is set to `"hashset"`.
///
/// Pure function of its inputs.
pub fn classify(storage: StorageKind, config: &dyn GlobalConfig) -> bool {
    match storage {
        StorageKind::BTree | StorageKind::Brie | StorageKind::RbtSet | StorageKind::EqRel => {
            config.get("data-structure").as_deref() == Some("hashset")
        }
        StorageKind::HashSet => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfig;

    #[test]
    fn hashset_storage_is_always_naive() {
        let cfg = InMemoryConfig::default();
        assert!(classify(StorageKind::HashSet, &cfg));
    }

    #[test]
    fn ordered_storage_is_optimal_by_default() {
        let cfg = InMemoryConfig::default();
        for kind in [
            StorageKind::BTree,
            StorageKind::Brie,
            StorageKind::RbtSet,
            StorageKind::EqRel,
        ] {
            assert!(!classify(kind, &cfg));
        }
    }

    #[test]
    fn config_override_forces_naive_for_ordered_storage() {
        let mut cfg = InMemoryConfig::default();
        cfg.set("data-structure", "hashset");
        assert!(classify(StorageKind::BTree, &cfg));
    }

    #[test]
    fn config_override_with_other_value_has_no_effect() {
        let mut cfg = InMemoryConfig::default();
        cfg.set("data-structure", "btree");
        assert!(!classify(StorageKind::BTree, &cfg));
    }
}
