//! Terminology drift auditing against a canonical/variant dictionary.
//!
//! The line-exclusion heuristic is deliberately conservative: fenced lines
//! and whole lines that start with a backtick are excluded, but inline code
//! spans inside an otherwise-prose line are not. Over-reporting is reviewed
//! by a human; silent suppression would hide real drift.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::fence::FenceTracker;
use crate::types::{Document, TermFinding, line_number, line_snippet};

/// One dictionary entry: the canonical spelling plus the variant spellings
/// to flag.
#[derive(Debug, Clone, Deserialize)]
pub struct TermEntry {
    /// Preferred spelling suggested in findings.
    #[serde(default)]
    pub canonical: String,
    /// Non-canonical spellings to search for.
    #[serde(default)]
    pub variants: Vec<String>,
}

/// Flag every whole-word, case-insensitive variant match on a non-excluded
/// line. A line may contribute multiple findings across different variants.
/// Findings are ordered by document scan order, then line, then dictionary
/// order.
pub fn check_terminology(docs: &[Document], dictionary: &[TermEntry]) -> Vec<TermFinding> {
    let matchers = compile_variants(dictionary);
    if matchers.is_empty() {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for doc in docs {
        let mut fence = FenceTracker::new();
        for (index, line) in doc.lines.iter().enumerate() {
            if !fence.is_prose(line) {
                continue;
            }
            // Whole-line inline code heuristic: leading backtick only.
            if line.trim_start().starts_with('`') {
                continue;
            }
            for matcher in &matchers {
                if matcher.pattern.is_match(line) {
                    issues.push(TermFinding {
                        canonical: matcher.canonical.clone(),
                        file: doc.path.clone(),
                        found: matcher.variant.clone(),
                        line: line_number(index),
                        text: line_snippet(line),
                    });
                }
            }
        }
    }
    issues
}

/// Load a dictionary from a JSON file, structurally
/// `[{"canonical": "...", "variants": ["..."]}]`. Missing, unreadable, or
/// malformed dictionaries degrade to an empty one; terminology checking is
/// optional and never fatal.
pub fn load_dictionary(path: Option<&Path>) -> Vec<TermEntry> {
    let Some(path) = path else {
        return Vec::new();
    };
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// A compiled whole-word, case-insensitive matcher for one variant.
struct VariantMatcher {
    /// Canonical spelling carried into findings.
    canonical: String,
    /// Compiled `(?i)\b...\b` pattern for the variant.
    pattern: Regex,
    /// The variant spelling as written in the dictionary.
    variant: String,
}

/// Compile every variant pattern once up front, skipping any that fail to
/// compile after escaping (regex size limits on pathological input).
fn compile_variants(dictionary: &[TermEntry]) -> Vec<VariantMatcher> {
    let mut matchers = Vec::new();
    for entry in dictionary {
        for variant in &entry.variants {
            let source = format!(r"(?i)\b{}\b", regex::escape(variant));
            let Ok(pattern) = Regex::new(&source) else {
                continue;
            };
            matchers.push(VariantMatcher {
                canonical: entry.canonical.clone(),
                pattern,
                variant: variant.clone(),
            });
        }
    }
    matchers
}
