/// Core domain types for speclint documents, occurrences, and findings.
use std::path::PathBuf;

use serde::Serialize;

/// Maximum characters of line text carried in an occurrence or finding.
const SNIPPET_CHARS: usize = 120;

/// A relative markdown link whose target does not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Markdown file containing the link.
    pub file: PathBuf,
    /// One-based line number of the link.
    pub line: u32,
    /// Display text between the square brackets.
    pub link_text: String,
    /// Absolute path the target resolved to, for diagnostics.
    pub resolved: PathBuf,
    /// Raw link target as written, without any anchor.
    pub target: String,
}

/// A document to scan: its path plus its ordered lines.
/// Immutable once loaded; the engine only borrows it.
#[derive(Debug, Clone)]
pub struct Document {
    /// Ordered lines, index 0 holding line 1.
    pub lines: Vec<String>,
    /// Path the document was loaded from.
    pub path: PathBuf,
}

impl Document {
    /// Split file content into a document's line list.
    pub fn new(path: PathBuf, content: &str) -> Self {
        return Self {
            lines: content.lines().map(String::from).collect(),
            path,
        };
    }
}

/// A numeric GAP identifier — displayed and serialized as the fixed-width
/// zero-padded token (`GAP-001`). Newtype prevents mixing with line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GapId(
    /// The numeric portion of the identifier.
    pub u64,
);

impl std::fmt::Display for GapId {
    /// Format as the zero-padded `GAP-NNN` token.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "GAP-{:03}", self.0);
    }
}

impl Serialize for GapId {
    /// Serialize as the display token so JSON map keys read `GAP-001`.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.collect_str(self);
    }
}

/// One match of the identifier pattern on a prose line. The identifier
/// itself is carried as the map key in the registry index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Document containing the match.
    pub file: PathBuf,
    /// One-based line number of the match.
    pub line: u32,
    /// Trimmed line text, truncated to the snippet limit.
    pub text: String,
}

/// A terminology drift finding: a non-canonical variant on a prose line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermFinding {
    /// Canonical spelling to suggest instead.
    pub canonical: String,
    /// Document containing the variant.
    pub file: PathBuf,
    /// The variant spelling that matched.
    pub found: String,
    /// One-based line number of the match.
    pub line: u32,
    /// Trimmed line text, truncated to the snippet limit.
    pub text: String,
}

/// An identifier occurrence whose id has no definition anywhere in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndefinedReference {
    /// Document containing the reference.
    pub file: PathBuf,
    /// The referenced identifier.
    pub gap_id: GapId,
    /// One-based line number of the reference.
    pub line: u32,
    /// Trimmed line text, truncated to the snippet limit.
    pub text: String,
}

/// Convert a zero-based line index into a one-based line number.
pub fn line_number(index: usize) -> u32 {
    return u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
}

/// Trim a line and truncate it to the snippet limit on a char boundary.
pub fn line_snippet(line: &str) -> String {
    return line.trim().chars().take(SNIPPET_CHARS).collect();
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn gap_id_display_zero_pads_to_three_digits() {
        assert_eq!(GapId(7).to_string(), "GAP-007");
        assert_eq!(GapId(42).to_string(), "GAP-042");
        assert_eq!(GapId(1234).to_string(), "GAP-1234");
    }

    #[test]
    fn snippet_trims_and_truncates_by_chars() {
        let long = format!("  {}  ", "x".repeat(200));
        assert_eq!(line_snippet(&long).chars().count(), 120);

        // Multi-byte chars must not be split.
        let accents = "é".repeat(200);
        assert_eq!(line_snippet(&accents).chars().count(), 120);
    }
}
