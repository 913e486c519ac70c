//! Binary entry point for the `idxsel` command-line tool.
//!
//! Loads a JSON-described intermediate program, runs the index-selection
//! analysis, and prints either the textual report or the chosen orders as
//! JSON.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use ram_index_select::{cli::Args, config::InMemoryConfig, program::Program, report, IndexAnalysis};

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("idxsel: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Serialize)]
struct RelationReport<'a> {
    relation: &'a str,
    orders: &'a [Vec<usize>],
}

fn run(args: &Args) -> Result<bool> {
    let text = fs::read_to_string(&args.program)
        .with_context(|| format!("reading program file {}", args.program.display()))?;
    let program: Program = serde_json::from_str(&text)
        .with_context(|| format!("parsing program file {}", args.program.display()))?;

    if args.naive {
        // Forwards to the library's own naive-path decision; the CLI does
        // not re-implement it.
        std::env::set_var(ram_index_select::config::ENV_NAIVE_INDEX, "1");
    }

    let config = InMemoryConfig::default();
    let mut analysis = IndexAnalysis::new();
    analysis
        .run(&program, &config)
        .context("running index-selection analysis")?;

    if args.quiet {
        return Ok(true);
    }

    if args.json {
        let mut out = Vec::new();
        for (relation, set) in analysis.relations() {
            out.push(RelationReport {
                relation: &relation.name,
                orders: set.orders(),
            });
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        report::print(&analysis, &mut handle)?;
    }

    Ok(true)
}
