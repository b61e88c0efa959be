use super::*;

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_owned()).collect()
}

// =============================================================================
// compact_lines
// =============================================================================

#[test]
fn interior_runs_collapse_but_indentation_stays() {
    assert_eq!(compact_lines("    A[x]   -->    B  "), owned(&["    A[x] --> B"]));
}

#[test]
fn single_interior_whitespace_is_kept() {
    assert_eq!(compact_lines("A\t--> B"), owned(&["A\t--> B"]));
}

#[test]
fn blank_lines_are_dropped() {
    assert_eq!(compact_lines("graph TD\n\n   \nA --> B\n"), owned(&["graph TD", "A --> B"]));
}

#[test]
fn empty_input_yields_no_lines() {
    assert!(compact_lines("").is_empty());
}

// =============================================================================
// align_to_directive
// =============================================================================

#[test]
fn preamble_before_directive_is_dropped() {
    let lines = owned(&["Here is your diagram:", "graph TD", "A-->B"]);
    assert_eq!(align_to_directive(lines), owned(&["graph TD", "A-->B"]));
}

#[test]
fn indented_directive_is_recognized() {
    let lines = owned(&["Sure", "  sequenceDiagram", "A->>B: hi"]);
    assert_eq!(align_to_directive(lines), owned(&["  sequenceDiagram", "A->>B: hi"]));
}

#[test]
fn no_directive_passes_through() {
    let lines = owned(&["A-->B", "B-->C"]);
    assert_eq!(align_to_directive(lines.clone()), lines);
}

#[test]
fn keyword_prefix_without_boundary_is_not_a_directive() {
    let lines = owned(&["graphql --> api", "flowchart LR", "a --> b"]);
    assert_eq!(align_to_directive(lines), owned(&["flowchart LR", "a --> b"]));
}
