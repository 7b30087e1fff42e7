mod commands;
mod config;
mod error;
mod fence;
mod links;
mod registry;
mod report;
mod scanner;
mod terminology;
mod types;
mod xref;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::{CheckOptions, IdsOptions};

#[derive(Parser)]
#[command(name = "speclint", about = "Consistency checker for spec document trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check cross-references, relative links, and terminology
    Check {
        /// Only check these files (for PR scope); definitions still come
        /// from the full corpus under the docs root
        #[arg(long, num_args = 0.., value_name = "FILE")]
        changed_files: Vec<String>,
        /// Root directory to scan (default: docs/)
        #[arg(long, value_name = "PATH")]
        docs_root: Option<PathBuf>,
        /// Output a machine-readable JSON report
        #[arg(long)]
        json: bool,
        /// Path to a terminology.json dictionary
        #[arg(long, value_name = "PATH")]
        terminology: Option<PathBuf>,
    },
    /// Scan GAP ids: definitions, cross-file duplicates, next available id
    Ids {
        /// Only check for duplicates, don't suggest the next id
        #[arg(long)]
        check_only: bool,
        /// Root directory to scan (default: docs/)
        #[arg(long, value_name = "PATH")]
        docs_root: Option<PathBuf>,
        /// Output a machine-readable JSON report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { changed_files, docs_root, json, terminology } => {
            commands::check(&CheckOptions { changed_files, docs_root, json, terminology })
        },
        Commands::Ids { check_only, docs_root, json } => {
            commands::ids(&IdsOptions { check_only, docs_root, json })
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}
