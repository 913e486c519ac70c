//! Command-line argument parsing for the `idxsel` binary.
//!
//! [`Args::parse_from`] (via `clap`'s derive) takes an explicit iterable, so
//! tests can drive parsing without touching `std::env::args()`.

use std::path::PathBuf;

use clap::Parser;

/// Run automatic index-selection analysis over a JSON-described intermediate
/// program and print the chosen orders.
#[derive(Debug, Parser)]
#[command(name = "idxsel", version, about)]
pub struct Args {
    /// Path to a JSON file describing the program's relations and operations.
    pub program: PathBuf,

    /// Emit the chosen orders as JSON instead of the human-readable report.
    #[arg(long)]
    pub json: bool,

    /// Suppress all output; exit 0 if every relation solved, 1 otherwise.
    #[arg(short, long)]
    pub quiet: bool,

    /// Force the naive one-index-per-pattern path for every relation,
    /// equivalent to setting `SOUFFLE_USE_NAIVE_INDEX` in the environment.
    #[arg(long)]
    pub naive: bool,
}
