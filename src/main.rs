//! Command-line front end for the Dojo module index.
//!
//! Stands in for the editor integration the index crates are built for:
//! it scans the given (or configured) source trees, waits for the
//! concurrent rescan to complete, and prints the lookup views.

mod config;
mod error;

use crate::config::Config;
use clap::Parser;
use dojoscout_index::ModuleIndex;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Scans directory trees of JavaScript files for `dojo.provide`
/// declarations and prints the resulting module index.
#[derive(Debug, Parser)]
#[command(name = "dojoscout", version, about)]
struct Args {
    /// Directory trees to scan; defaults to the configured search paths.
    paths: Vec<PathBuf>,
    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print (short name, fully-qualified name) pairs instead of names only.
    #[arg(long)]
    names: bool,
    /// Print only the fully-qualified candidates for one short name.
    #[arg(long, value_name = "SHORT", conflicts_with = "names")]
    resolve: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "fatal");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: Args) -> error::Result<ExitCode> {
    let paths = if args.paths.is_empty() {
        Config::load(args.config.as_deref())?.search_paths
    } else {
        args.paths
    };
    if paths.is_empty() {
        tracing::warn!("no search paths given or configured; nothing to scan");
        return Ok(ExitCode::SUCCESS);
    }

    let index = Arc::new(ModuleIndex::new());
    index.scan_all(paths).wait().await;

    if let Some(short) = args.resolve {
        let mut hits: Vec<String> = index
            .modules_by_name()
            .into_iter()
            .filter(|(name, _)| *name == short)
            .map(|(_, qualified)| qualified)
            .collect();
        if hits.is_empty() {
            tracing::warn!(%short, "no module with that short name");
            return Ok(ExitCode::FAILURE);
        }
        hits.sort();
        hits.dedup();
        for qualified in hits {
            println!("{qualified}");
        }
    } else if args.names {
        let mut pairs = index.modules_by_name();
        pairs.sort();
        for (short, qualified) in pairs {
            println!("{short}\t{qualified}");
        }
    } else {
        let mut modules = index.modules();
        modules.sort();
        modules.dedup();
        for qualified in modules {
            println!("{qualified}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
