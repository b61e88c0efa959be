//! Drop orphan `end` terminators.

use super::dialect::{DiagramKind, starts_with_word};

/// Sequence-diagram keywords whose blocks are also closed by `end`.
const SEQUENCE_BLOCKS: &[&str] = &["loop", "alt", "opt", "par", "critical", "break", "rect", "box"];

/// Remove `end` lines that have no open block before them.
///
/// `subgraph` always opens a block; in sequence diagrams the control-flow
/// keywords do too. Unclosed openers are left as they are.
#[must_use]
pub fn balance_block_ends(lines: Vec<String>, dialect: Option<DiagramKind>) -> Vec<String> {
    let sequence = dialect == Some(DiagramKind::Sequence);
    let mut depth: usize = 0;
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        let trimmed = line.trim();
        if trimmed == "end" {
            if depth == 0 {
                continue;
            }
            depth -= 1;
        } else if opens_block(trimmed, sequence) {
            depth += 1;
        }
        out.push(line);
    }
    out
}

fn opens_block(trimmed: &str, sequence: bool) -> bool {
    starts_with_word(trimmed, "subgraph")
        || (sequence && SEQUENCE_BLOCKS.iter().any(|kw| starts_with_word(trimmed, kw)))
}

#[cfg(test)]
#[path = "balance_test.rs"]
mod tests;
