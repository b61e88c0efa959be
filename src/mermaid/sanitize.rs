//! The sanitize pipeline: raw model output in, renderable Mermaid out.

use super::balance::balance_block_ends;
use super::class_diagram::rebuild_class_blocks;
use super::dialect::DiagramKind;
use super::extract::strip_fences;
use super::labels::normalize_labels;
use super::lines::{align_to_directive, compact_lines};
use super::unicode::normalize_unicode;

/// Best-effort repair of Mermaid source so the renderer can parse it.
///
/// Total over all inputs. Returns an empty string when nothing usable is
/// left, in which case the caller substitutes
/// [`create_fallback_diagram`](super::create_fallback_diagram).
#[must_use]
pub fn sanitize_diagram(code: &str) -> String {
    if code.trim().is_empty() {
        return String::new();
    }

    let normalized = normalize_unicode(code);
    let mut source = strip_fences(normalized.trim());

    let dialect = DiagramKind::detect(&source);
    if dialect == Some(DiagramKind::Class) {
        source = rebuild_class_blocks(&source);
    }

    let labeled = normalize_labels(&source, dialect);
    let lines = align_to_directive(compact_lines(&labeled));
    let lines = balance_block_ends(lines, dialect);

    lines.join("\n").trim().to_owned()
}
