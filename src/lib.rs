//! Automatic index-selection analysis for a Datalog-to-relational-algebra
//! compiler's intermediate representation.
//!
//! Given a compiled intermediate program over named relations, this crate
//! observes every equality search pattern issued against each relation and
//! computes a minimum set of lexicographical column orders such that every
//! pattern is covered by some order as a prefix — so a downstream code
//! generator can build the corresponding indexed data structures.
//!
//! The reduction is minimum chain cover of a partially ordered set of
//! patterns (strict-subset order), solved via bipartite maximum matching
//! ([`matching::MaxMatching`], Hopcroft–Karp) by Dilworth's theorem. A
//! secondary naive path emits one index per pattern for hash-based storage,
//! where order is irrelevant, or when the `SOUFFLE_USE_NAIVE_INDEX`
//! environment variable forces it.
//!
//! Surface-syntax parsing, clause normalisation, code generation, and
//! runtime relation data structures are out of scope — see `DESIGN.md`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod index_set;
pub mod mask;
pub mod matching;
pub mod program;
pub mod report;
pub mod storage;

pub use analysis::IndexAnalysis;
pub use config::{GlobalConfig, InMemoryConfig};
pub use error::AnalysisError;
pub use index_set::{Chain, IndexSet, Order};
pub use mask::SearchMask;
pub use program::{Operation, Program, RelationDescriptor};
pub use storage::StorageKind;
