//! CLI commands for speclint: `check` and `ids`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::error::Error;
use crate::links;
use crate::registry;
use crate::report::{self, ConsistencyReport, IdReport, Issue};
use crate::scanner;
use crate::terminology;
use crate::types::{BrokenLink, Document, TermFinding, UndefinedReference};
use crate::xref;

/// Options for `speclint check`.
pub struct CheckOptions {
    /// Explicit target subset; empty means check the whole corpus.
    pub changed_files: Vec<String>,
    /// Scan root override.
    pub docs_root: Option<PathBuf>,
    /// Emit the machine-readable JSON report instead of human text.
    pub json: bool,
    /// Terminology dictionary override.
    pub terminology: Option<PathBuf>,
}

/// Options for `speclint ids`.
pub struct IdsOptions {
    /// Only report duplicates; suppress the next-id suggestion.
    pub check_only: bool,
    /// Scan root override.
    pub docs_root: Option<PathBuf>,
    /// Emit the machine-readable JSON report instead of human text.
    pub json: bool,
}

/// Run the consistency check: broken links, undefined references, and
/// terminology drift over the target documents, with definitions drawn
/// from the full corpus. Any finding maps to a failure exit so the command
/// can gate an automated pipeline.
///
/// # Errors
///
/// Returns `Error::NotADirectory` when the docs root is missing and no
/// changed files were given, or errors from config loading and JSON output.
pub fn check(options: &CheckOptions) -> Result<ExitCode, Error> {
    let config = Config::load(Path::new("."))?;
    let docs_root = config.docs_root(options.docs_root.as_deref());

    if !docs_root.is_dir() && options.changed_files.is_empty() {
        return Err(Error::NotADirectory { path: docs_root });
    }

    // Pass 1 scope: the full corpus under the root. When the root is
    // absent, the changed files themselves are the whole known corpus.
    let corpus = if docs_root.is_dir() {
        scanner::load_documents(&scanner::find_documents(&docs_root, &config))
    } else {
        scanner::load_documents(&scanner::find_changed(&options.changed_files))
    };
    let targets: Vec<Document> = if options.changed_files.is_empty() {
        corpus.clone()
    } else {
        scanner::load_documents(&scanner::find_changed(&options.changed_files))
    };

    let dictionary_path = config.terminology(options.terminology.as_deref(), &docs_root);
    let dictionary = terminology::load_dictionary(dictionary_path.as_deref());

    let broken = links::check_links(&targets);
    let undefined = xref::check_against(&xref::defined_ids(&corpus), &targets);
    let drift = terminology::check_terminology(&targets, &dictionary);

    let report = report::consistency_report(targets.len(), broken, undefined, drift);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_consistency_report(&report, &docs_root);
    }

    if report.summary.total > 0 {
        return Ok(ExitCode::FAILURE);
    }
    return Ok(ExitCode::SUCCESS);
}

/// Run the id allocation scan: all occurrences, definitions, cross-file
/// duplicates, and the next available id. Always exits success; duplicates
/// are informational here, `check` is the gate.
///
/// # Errors
///
/// Returns `Error::NotADirectory` when the docs root is missing, or errors
/// from config loading and JSON output.
pub fn ids(options: &IdsOptions) -> Result<ExitCode, Error> {
    let config = Config::load(Path::new("."))?;
    let docs_root = config.docs_root(options.docs_root.as_deref());

    if !docs_root.is_dir() {
        return Err(Error::NotADirectory { path: docs_root });
    }

    let docs = scanner::load_documents(&scanner::find_documents(&docs_root, &config));
    let report = report::id_report(&docs_root, registry::scan(&docs));

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_id_report(&report, &docs_root, options.check_only);
    }

    return Ok(ExitCode::SUCCESS);
}

/// Print the human-readable consistency report, one section per category.
fn print_consistency_report(report: &ConsistencyReport, docs_root: &Path) {
    println!("Checked {} files under {}", report.files_checked, docs_root.display());
    println!();

    let mut broken: Vec<&BrokenLink> = Vec::new();
    let mut undefined: Vec<&UndefinedReference> = Vec::new();
    let mut drift: Vec<&TermFinding> = Vec::new();
    for issue in &report.issues {
        match issue {
            Issue::BrokenLink(b) => broken.push(b),
            Issue::Terminology(t) => drift.push(t),
            Issue::UndefinedReference(u) => undefined.push(u),
        }
    }

    if !broken.is_empty() {
        println!("Broken links ({}):", broken.len());
        for issue in &broken {
            println!(
                "  {}:{}  [{}]({})",
                issue.file.display(),
                issue.line,
                issue.link_text,
                issue.target
            );
        }
        println!();
    }

    if !undefined.is_empty() {
        println!("Undefined GAP references ({}):", undefined.len());
        for issue in &undefined {
            println!("  {}:{}  {}", issue.file.display(), issue.line, issue.gap_id);
        }
        println!();
    }

    if !drift.is_empty() {
        println!("Terminology issues ({}):", drift.len());
        for issue in &drift {
            println!(
                "  {}:{}  '{}' -> '{}'",
                issue.file.display(),
                issue.line,
                issue.found,
                issue.canonical
            );
        }
        println!();
    }

    if report.summary.total == 0 {
        println!("No issues found.");
    } else {
        println!("Total: {} issues", report.summary.total);
    }
    return;
}

/// Print the human-readable allocation report.
fn print_id_report(report: &IdReport, docs_root: &Path, check_only: bool) {
    println!("Scanned: {}", docs_root.display());
    println!("Found {} unique GAP IDs", report.all_ids.len());
    println!();

    if !report.definitions.is_empty() {
        println!("Defined GAP IDs:");
        for (id, occurrences) in &report.definitions {
            for occurrence in occurrences {
                println!("  {id}  {}:{}", occurrence.file.display(), occurrence.line);
            }
        }
        println!();
    }

    if !report.duplicates.is_empty() {
        println!("INFO: Cross-file definitions (review if intentional):");
        for (id, occurrences) in &report.duplicates {
            let mut files: Vec<String> = occurrences
                .iter()
                .map(|o| o.file.display().to_string())
                .collect();
            files.sort();
            files.dedup();
            println!("  {id} in: {}", files.join(", "));
        }
        println!();
    }

    if !check_only {
        println!("Next available ID: {}", report.next_id);
    }
    return;
}
