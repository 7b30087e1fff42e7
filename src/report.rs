//! Report assembly: merges the checkers' findings into one ordered issue
//! list plus a summary, and builds the identifier allocation report.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::registry::{self, IdIndex};
use crate::types::{BrokenLink, GapId, Occurrence, TermFinding, UndefinedReference};

/// The merged consistency report returned to callers and serialized for
/// `--json`. Building it twice over an unchanged corpus yields identical
/// output; ordering is applied here for presentation only.
#[derive(Debug, Serialize)]
pub struct ConsistencyReport {
    /// Number of documents successfully read and checked.
    pub files_checked: usize,
    /// All findings. Categories are concatenated in fixed order (links,
    /// then references, then terminology); within a category, document
    /// scan order then line number.
    pub issues: Vec<Issue>,
    /// Per-category counts.
    pub summary: Summary,
}

/// The identifier allocation report for `speclint ids`.
#[derive(Debug, Serialize)]
pub struct IdReport {
    /// Every occurrence, keyed by formatted id.
    pub all_ids: BTreeMap<GapId, Vec<Occurrence>>,
    /// Definition occurrences only.
    pub definitions: BTreeMap<GapId, Vec<Occurrence>>,
    /// Ids whose definitions span two or more documents.
    pub duplicates: BTreeMap<GapId, Vec<Occurrence>>,
    /// Highest defined id, when any definition exists.
    pub max_id: Option<GapId>,
    /// Next unused id, computed from definitions only.
    pub next_id: GapId,
}

/// One finding, tagged by category for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    /// A relative link whose target does not exist.
    BrokenLink(BrokenLink),
    /// A non-canonical terminology variant on a prose line.
    Terminology(TermFinding),
    /// A reference to an id with no definition in the corpus.
    UndefinedReference(UndefinedReference),
}

/// Per-category finding counts.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// Number of broken relative links.
    pub broken_links: usize,
    /// Number of terminology findings.
    pub terminology: usize,
    /// Total findings across all categories.
    pub total: usize,
    /// Number of undefined identifier references.
    pub undefined_references: usize,
}

/// Merge the three checkers' findings. Each input is expected in document
/// scan order, which the checkers produce naturally.
pub fn consistency_report(
    files_checked: usize,
    links: Vec<BrokenLink>,
    references: Vec<UndefinedReference>,
    terminology: Vec<TermFinding>,
) -> ConsistencyReport {
    let summary = Summary {
        broken_links: links.len(),
        terminology: terminology.len(),
        total: links
            .len()
            .saturating_add(references.len())
            .saturating_add(terminology.len()),
        undefined_references: references.len(),
    };

    let mut issues = Vec::with_capacity(summary.total);
    issues.extend(links.into_iter().map(Issue::BrokenLink));
    issues.extend(references.into_iter().map(Issue::UndefinedReference));
    issues.extend(terminology.into_iter().map(Issue::Terminology));

    return ConsistencyReport {
        files_checked,
        issues,
        summary,
    };
}

/// Build the allocation report from a full-corpus index. Occurrence paths
/// are reported relative to the scan root.
pub fn id_report(root: &Path, index: IdIndex) -> IdReport {
    let all_ids = relativize(root, index);
    let definitions = registry::definitions(&all_ids);
    let duplicates = registry::duplicates(&definitions);
    let max_id = registry::max_id(&definitions);
    let next_id = registry::next_id(&definitions);

    return IdReport {
        all_ids,
        definitions,
        duplicates,
        max_id,
        next_id,
    };
}

/// Strip the scan root prefix from every occurrence path.
fn relativize(root: &Path, index: IdIndex) -> IdIndex {
    return index
        .into_iter()
        .map(|(id, occurrences)| {
            let rebased = occurrences
                .into_iter()
                .map(|mut occurrence| {
                    if let Ok(rel) = occurrence.file.strip_prefix(root) {
                        occurrence.file = rel.to_path_buf();
                    }
                    occurrence
                })
                .collect();
            (id, rebased)
        })
        .collect();
}
