//! Main Entrypoint for the empath inspector
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and the command line.
//! 2. Reading a JSON document from a file or stdin.
//! 3. Printing one report per decoded item and failing if any item did not decode.

use anyhow::Context;
use clap::Parser;
use empath_inspect::{
    config::Config,
    inspect::{UnionKind, inspect},
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Decode JSON as an empath tagged union and check it re-encodes unchanged")]
struct Args {
    /// Union to decode each item as. Defaults to EMPATH_DEFAULT_KIND.
    #[arg(short, long, value_enum)]
    kind: Option<UnionKind>,

    /// Pretty-print the re-encoded JSON.
    #[arg(short, long)]
    pretty: bool,

    /// JSON file holding one object or an array of objects. Reads stdin when omitted.
    path: Option<PathBuf>,
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let kind = args.kind.unwrap_or(config.default_kind);
    let pretty = args.pretty || config.pretty;

    // --- 3. Decode and Report ---
    let input = read_input(args.path.as_deref())?;
    let document: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;

    let reports = inspect(kind, document);
    for report in &reports {
        println!("{}", report.render(pretty));
    }

    let failed = reports.iter().filter(|report| report.is_failure()).count();
    info!(?kind, items = reports.len(), failed, "Inspection finished");
    if failed > 0 {
        anyhow::bail!("{} of {} items failed to decode", failed, reports.len());
    }
    Ok(())
}
