use super::*;

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_owned()).collect()
}

#[test]
fn orphan_end_is_dropped() {
    let lines = owned(&["graph TD", "A-->B", "end"]);
    assert_eq!(balance_block_ends(lines, Some(DiagramKind::Graph)), owned(&["graph TD", "A-->B"]));
}

#[test]
fn matched_subgraphs_are_kept() {
    let lines = owned(&[
        "graph TD",
        "subgraph Cloud",
        "    subgraph VNet [Virtual Network]",
        "        A-->B",
        "    end",
        "end",
    ]);
    assert_eq!(balance_block_ends(lines.clone(), Some(DiagramKind::Graph)), lines);
}

#[test]
fn extra_end_after_balanced_block_is_dropped() {
    let lines = owned(&["graph TD", "subgraph S", "A", "end", "end", "B"]);
    assert_eq!(
        balance_block_ends(lines, Some(DiagramKind::Flowchart)),
        owned(&["graph TD", "subgraph S", "A", "end", "B"])
    );
}

#[test]
fn unclosed_subgraph_is_not_completed() {
    let lines = owned(&["graph TD", "subgraph S", "A-->B"]);
    assert_eq!(balance_block_ends(lines.clone(), Some(DiagramKind::Graph)), lines);
}

#[test]
fn subgraph_prefix_without_boundary_does_not_open() {
    let lines = owned(&["graph TD", "subgraphs --> A", "end"]);
    assert_eq!(
        balance_block_ends(lines, Some(DiagramKind::Graph)),
        owned(&["graph TD", "subgraphs --> A"])
    );
}

#[test]
fn sequence_blocks_keep_their_ends() {
    let lines = owned(&["sequenceDiagram", "loop Every minute", "A->>B: ping", "end", "end"]);
    assert_eq!(
        balance_block_ends(lines, Some(DiagramKind::Sequence)),
        owned(&["sequenceDiagram", "loop Every minute", "A->>B: ping", "end"])
    );
}

#[test]
fn sequence_keywords_do_not_open_in_flowcharts() {
    let lines = owned(&["graph TD", "loop Retry", "end"]);
    assert_eq!(balance_block_ends(lines, Some(DiagramKind::Graph)), owned(&["graph TD", "loop Retry"]));
}

#[test]
fn running_balance_never_goes_negative() {
    let lines = owned(&["end", "subgraph A", "end", "end", "subgraph B", "end", "end"]);
    let out = balance_block_ends(lines, None);
    let mut depth: i32 = 0;
    for line in &out {
        match line.trim() {
            "end" => depth -= 1,
            l if l.starts_with("subgraph") => depth += 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(out, owned(&["subgraph A", "end", "subgraph B", "end"]));
}
