//! Relative markdown link extraction and existence checking.
//!
//! Only same-repository document links are checkable; external URLs,
//! mailto links, same-document anchors, and non-document files are out of
//! scope, not errors.

use std::path::{Component, Path, PathBuf};

use regex::Regex;

use crate::fence::FenceTracker;
use crate::types::{BrokenLink, Document, line_number};

/// Relative document target: a path ending in `.md`, optional anchor.
const DOC_TARGET: &str = r"^(.+\.md)(#.*)?$";
/// Inline link syntax `[text](target)`.
const LINK_PATTERN: &str = r"\[([^\]]*)\]\(([^)]+)\)";

/// Extract links from prose lines of all documents, resolve checkable
/// targets against each source document's directory, and report every
/// target that does not exist on disk.
///
/// # Panics
///
/// Panics if a hardcoded link regex is invalid (compile-time invariant).
pub fn check_links(docs: &[Document]) -> Vec<BrokenLink> {
    let link = Regex::new(LINK_PATTERN).expect("valid regex");
    let doc_target = Regex::new(DOC_TARGET).expect("valid regex");

    let mut issues = Vec::new();
    for doc in docs {
        let source_dir = doc.path.parent().unwrap_or_else(|| Path::new(""));
        let mut fence = FenceTracker::new();
        for (index, line) in doc.lines.iter().enumerate() {
            if !fence.is_prose(line) {
                continue;
            }
            for capture in link.captures_iter(line) {
                let link_text = capture.get(1).map_or("", |m| m.as_str());
                let raw_target = capture.get(2).map_or("", |m| m.as_str());
                let Some(target) = checkable_target(raw_target, &doc_target) else {
                    continue;
                };

                let resolved = resolve_target(source_dir, target);
                if !resolved.exists() {
                    issues.push(BrokenLink {
                        file: doc.path.clone(),
                        line: line_number(index),
                        link_text: link_text.to_string(),
                        resolved,
                        target: target.to_string(),
                    });
                }
            }
        }
    }
    issues
}

/// Return the path portion of a checkable relative document target, with
/// any in-document anchor stripped. `None` for targets outside the link
/// checker's scope.
fn checkable_target<'a>(raw: &'a str, doc_target: &Regex) -> Option<&'a str> {
    if raw.starts_with("http://")
        || raw.starts_with("https://")
        || raw.starts_with("mailto:")
        || raw.starts_with('#')
    {
        return None;
    }
    doc_target.captures(raw)?.get(1).map(|m| m.as_str())
}

/// Collapse `.` and `..` components in a path without touching the
/// filesystem. Preserves leading `..` when there is nothing left to pop.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                let can_pop = matches!(
                    components.last(),
                    Some(c) if !matches!(c, Component::ParentDir)
                );
                if can_pop {
                    components.pop();
                } else {
                    components.push(component);
                }
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}

/// Join a target against the source document's directory, normalize
/// lexically, and absolutize for diagnostics.
fn resolve_target(source_dir: &Path, target: &str) -> PathBuf {
    let normalized = normalize_path(&source_dir.join(target));
    std::path::absolute(&normalized).unwrap_or(normalized)
}
