//! Fenced code block tracking per CommonMark fence rules.
//!
//! Example text inside fences must never surface in any report, so every
//! checker routes its lines through a [`FenceTracker`] before matching.

/// Per-document fence state machine. Tracks a single opener token; nested
/// fences of the same kind are not distinguishable without a full block
/// parser, so only one level is tracked.
#[derive(Debug, Default)]
pub struct FenceTracker {
    /// Opening delimiter (char, run length) of the currently open fence.
    opener: Option<(char, usize)>,
}

impl FenceTracker {
    /// Fresh tracker with no fence open. State must not carry across
    /// documents; create one tracker per document scan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line, updating fence state. Delimiter lines are never
    /// prose; all other lines are prose iff no fence is currently open.
    pub fn is_prose(&mut self, line: &str) -> bool {
        if let Some(token) = fence_token(line) {
            match self.opener {
                None => self.opener = Some(token),
                Some((ch, len)) => {
                    // A closing fence must use the same character and be at
                    // least as long as the opener. Anything else is inert
                    // fenced content, not a new delimiter.
                    if token.0 == ch && token.1 >= len {
                        self.opener = None;
                    }
                },
            }
            return false;
        }
        self.opener.is_none()
    }
}

/// Extract the fence token (char, run length) if the trimmed line starts
/// with three or more identical backticks or tildes.
fn fence_token(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim();
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run = trimmed.chars().take_while(|&c| c == first).count();
    if run >= 3 { Some((first, run)) } else { None }
}
