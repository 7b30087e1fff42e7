//! Two-pass identifier reference checking.
//!
//! Pass 1 collects the definition set from the whole corpus; pass 2
//! validates references in a target subset against it. The two passes have
//! different scopes, so they stay separate: a changed-files check must
//! still see definitions from documents it is not checking.

use std::collections::BTreeSet;

use crate::registry;
use crate::types::{Document, GapId, UndefinedReference};

/// Pass 2: report every identifier occurrence in `targets` whose id is not
/// in the precomputed definition set. The set may be reused across calls
/// within one invocation.
pub fn check_against(defined: &BTreeSet<GapId>, targets: &[Document]) -> Vec<UndefinedReference> {
    let mut issues = Vec::new();
    for (id, occurrence) in registry::document_occurrences(targets) {
        if !defined.contains(&id) {
            issues.push(UndefinedReference {
                file: occurrence.file,
                gap_id: id,
                line: occurrence.line,
                text: occurrence.text,
            });
        }
    }
    issues
}

/// Run both passes: definitions from `corpus`, reference validation over
/// `targets`.
pub fn check_references(corpus: &[Document], targets: &[Document]) -> Vec<UndefinedReference> {
    check_against(&defined_ids(corpus), targets)
}

/// Pass 1: the set of ids with at least one definition anywhere in the
/// corpus.
pub fn defined_ids(corpus: &[Document]) -> BTreeSet<GapId> {
    registry::definitions(&registry::scan(corpus))
        .keys()
        .copied()
        .collect()
}
