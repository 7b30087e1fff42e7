//! Identifier registry: scans prose lines for GAP ids, separates
//! definitions from plain mentions, detects cross-file duplicates, and
//! computes the next free id.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use regex::Regex;

use crate::fence::FenceTracker;
use crate::types::{Document, GapId, Occurrence, line_number, line_snippet};

/// Identifier pattern: `GAP-` followed by three or more digits, word-bounded.
const GAP_PATTERN: &str = r"\bGAP-(\d{3,})\b";
/// Heading whose first token after the marker is an id (`## GAP-001: ...`).
/// Incidental mentions like `# Related Work on GAP-999` are not definitions.
const HEADING_DEFINITION: &str = r"^#+\s+\*?\*?GAP-\d{3,}";
/// Table row whose first cell starts with an id (`| GAP-001 | ... |`).
const TABLE_DEFINITION: &str = r"^\|\s*\*?\*?GAP-\d{3,}";

/// Occurrences grouped by identifier, ordered by id.
pub type IdIndex = BTreeMap<GapId, Vec<Occurrence>>;

/// Filter an index down to definition occurrences. Classification is a pure
/// function of the stored trimmed line text against the table-row and
/// heading patterns; every match on a definition-shaped line counts.
///
/// # Panics
///
/// Panics if a hardcoded definition regex is invalid (compile-time invariant).
pub fn definitions(index: &IdIndex) -> IdIndex {
    let heading = Regex::new(HEADING_DEFINITION).expect("valid regex");
    let table = Regex::new(TABLE_DEFINITION).expect("valid regex");

    let mut defined = IdIndex::new();
    for (id, occurrences) in index {
        for occurrence in occurrences {
            if table.is_match(&occurrence.text) || heading.is_match(&occurrence.text) {
                defined.entry(*id).or_default().push(occurrence.clone());
            }
        }
    }
    defined
}

/// Every identifier occurrence on prose lines of the given documents, in
/// document-then-line scan order. All matches on one line are recorded as
/// separate occurrences.
///
/// # Panics
///
/// Panics if the hardcoded identifier regex is invalid (compile-time invariant).
pub fn document_occurrences(docs: &[Document]) -> Vec<(GapId, Occurrence)> {
    let pattern = Regex::new(GAP_PATTERN).expect("valid regex");
    let mut found = Vec::new();

    for doc in docs {
        let mut fence = FenceTracker::new();
        for (index, line) in doc.lines.iter().enumerate() {
            if !fence.is_prose(line) {
                continue;
            }
            for capture in pattern.captures_iter(line) {
                let Some(digits) = capture.get(1) else { continue };
                // Ids wider than u64 are noise, not identifiers.
                let Ok(number) = digits.as_str().parse::<u64>() else {
                    continue;
                };
                found.push((
                    GapId(number),
                    Occurrence {
                        file: doc.path.clone(),
                        line: line_number(index),
                        text: line_snippet(line),
                    },
                ));
            }
        }
    }
    found
}

/// Identifiers whose definition occurrences span two or more distinct
/// documents. Multiple definitions within one document are summary+detail,
/// not duplicates.
pub fn duplicates(defined: &IdIndex) -> IdIndex {
    defined
        .iter()
        .filter(|(_, occurrences)| {
            let files: BTreeSet<&PathBuf> = occurrences.iter().map(|o| &o.file).collect();
            files.len() > 1
        })
        .map(|(id, occurrences)| (*id, occurrences.clone()))
        .collect()
}

/// Highest defined identifier, or `None` when nothing is defined.
pub fn max_id(defined: &IdIndex) -> Option<GapId> {
    defined.keys().max().copied()
}

/// Next unused identifier: `max(defined) + 1`, computed from definitions
/// only. Raw mentions never extend allocation. `GAP-001` when nothing is
/// defined yet.
pub fn next_id(defined: &IdIndex) -> GapId {
    GapId(max_id(defined).map_or(0, |id| id.0).saturating_add(1))
}

/// Scan all documents and build the id-to-occurrences index.
pub fn scan(docs: &[Document]) -> IdIndex {
    let mut index = IdIndex::new();
    for (id, occurrence) in document_occurrences(docs) {
        index.entry(id).or_default().push(occurrence);
    }
    index
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn doc(path: &str, content: &str) -> Document {
        Document::new(PathBuf::from(path), content)
    }

    #[test]
    fn scan_records_every_match_on_a_line() {
        let docs = vec![doc("a.md", "GAP-001 supersedes GAP-002 and GAP-001")];
        let index = scan(&docs);
        assert_eq!(index.get(&GapId(1)).map(Vec::len), Some(2));
        assert_eq!(index.get(&GapId(2)).map(Vec::len), Some(1));
    }

    #[test]
    fn fenced_ids_are_invisible() {
        let docs = vec![doc("a.md", "```\n| GAP-999 | fenced |\n```\nprose")];
        assert!(scan(&docs).is_empty());
    }

    #[test]
    fn two_digit_ids_are_not_identifiers() {
        let docs = vec![doc("a.md", "GAP-99 is too short, GAP-100 is fine")];
        let index = scan(&docs);
        assert_eq!(index.len(), 1);
        assert!(index.contains_key(&GapId(100)));
    }

    #[test]
    fn table_rows_and_headings_are_definitions() {
        let docs = vec![doc(
            "a.md",
            "| GAP-001 | a gap |\n## GAP-002: details\n| **GAP-003** | bold |\nSee GAP-004.\n# Related Work on GAP-005",
        )];
        let defined = definitions(&scan(&docs));
        assert!(defined.contains_key(&GapId(1)));
        assert!(defined.contains_key(&GapId(2)));
        assert!(defined.contains_key(&GapId(3)));
        // Plain mention and trailing heading mention are references.
        assert!(!defined.contains_key(&GapId(4)));
        assert!(!defined.contains_key(&GapId(5)));
    }

    #[test]
    fn same_file_definitions_are_not_duplicates() {
        let docs = vec![doc("a.md", "| GAP-001 | summary |\n## GAP-001: detail")];
        let defined = definitions(&scan(&docs));
        assert_eq!(defined.get(&GapId(1)).map(Vec::len), Some(2));
        assert!(duplicates(&defined).is_empty());
    }

    #[test]
    fn cross_file_definitions_are_duplicates() {
        let docs = vec![
            doc("a.md", "| GAP-001 | first |"),
            doc("b.md", "| GAP-001 | second |"),
        ];
        let dup = duplicates(&definitions(&scan(&docs)));
        assert_eq!(dup.len(), 1);
        assert!(dup.contains_key(&GapId(1)));
    }

    #[test]
    fn next_id_ignores_plain_mentions() {
        let docs = vec![doc("a.md", "| GAP-003 | defined |\nmentions GAP-900")];
        let defined = definitions(&scan(&docs));
        assert_eq!(max_id(&defined), Some(GapId(3)));
        assert_eq!(next_id(&defined), GapId(4));
    }

    #[test]
    fn next_id_of_empty_corpus_is_one() {
        let defined = IdIndex::new();
        assert_eq!(max_id(&defined), None);
        assert_eq!(next_id(&defined), GapId(1));
    }
}
