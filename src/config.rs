//! The opaque global configuration lookup, the `SOUFFLE_USE_NAIVE_INDEX`
//! debug escape hatch, and the process-wide one-shot naive-path warning.
//!
//! The warning flag models a file-scoped global as a crate-level atomic
//! with plain accessor functions rather than a full logging framework.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable that forces the naive indexing path for every
/// relation, regardless of declared storage.
pub const ENV_NAIVE_INDEX: &str = "SOUFFLE_USE_NAIVE_INDEX";

/// Opaque key -> string lookup standing in for the compiler's global
/// configuration store, which this analysis only ever reads from.
///
/// `Sync` so a shared `&dyn GlobalConfig` can be read concurrently by the
/// `parallel`-feature solve path.
pub trait GlobalConfig: Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// A simple in-memory `GlobalConfig`, sufficient for the CLI and for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConfig {
    entries: HashMap<String, String>,
}

impl InMemoryConfig {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl GlobalConfig for InMemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// `true` iff the `SOUFFLE_USE_NAIVE_INDEX` environment variable is present
/// and non-empty.
pub fn naive_index_env_set() -> bool {
    std::env::var(ENV_NAIVE_INDEX)
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// Process-wide "naive-mode warning already printed" flag. Set once, never
/// cleared in production; `reset_naive_warning` exists only for test
/// harnesses that need repeated runs within one process.
static NAIVE_WARNING_EMITTED: AtomicBool = AtomicBool::new(false);

/// Returns `true` exactly once per process (the first caller after process
/// start, or after the last [`reset_naive_warning`] call, wins) — used to
/// gate the one-shot diagnostic warning printed when the naive path is taken
/// because of the environment variable.
pub fn naive_warning_should_print() -> bool {
    naive_index_env_set()
        && NAIVE_WARNING_EMITTED
            .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
}

/// Resets the one-shot warning flag. Test-only: production code never calls
/// this, since the flag is meant to survive for the lifetime of the process.
#[doc(hidden)]
#[cfg(any(test, feature = "test-util"))]
pub fn reset_naive_warning() {
    NAIVE_WARNING_EMITTED.store(false, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables and the warning flag are process-global state;
    // serialize the tests that touch them so they don't race under the
    // default multi-threaded test runner.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn warning_prints_at_most_once_per_process() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(ENV_NAIVE_INDEX, "1");
        reset_naive_warning();
        assert!(naive_warning_should_print());
        assert!(!naive_warning_should_print());
        reset_naive_warning();
        std::env::remove_var(ENV_NAIVE_INDEX);
    }

    #[test]
    fn warning_never_fires_without_the_env_var() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var(ENV_NAIVE_INDEX);
        reset_naive_warning();
        assert!(!naive_warning_should_print());
    }

    #[test]
    fn in_memory_config_round_trips() {
        let mut cfg = InMemoryConfig::default();
        assert_eq!(cfg.get("data-structure"), None);
        cfg.set("data-structure", "hashset");
        assert_eq!(cfg.get("data-structure").as_deref(), Some("hashset"));
    }
}
