//! Line compaction and directive alignment.

use super::dialect::DiagramKind;

/// Collapse interior whitespace runs, drop trailing whitespace and blank lines.
///
/// Leading indentation is preserved; only runs of two or more whitespace
/// characters between non-whitespace characters become a single space.
#[must_use]
pub fn compact_lines(code: &str) -> Vec<String> {
    code.split('\n')
        .map(compact_line)
        .filter(|line| !line.is_empty())
        .collect()
}

fn compact_line(line: &str) -> String {
    let line = line.trim_end();
    let body = line.trim_start();
    let mut out = String::with_capacity(line.len());
    out.push_str(&line[..line.len() - body.len()]);

    let mut run = String::new();
    for c in body.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        match run.chars().count() {
            0 => {}
            1 => out.push_str(&run),
            _ => out.push(' '),
        }
        run.clear();
        out.push(c);
    }
    out
}

/// Drop every line before the first diagram directive.
///
/// Lines pass through untouched when no directive is present.
#[must_use]
pub fn align_to_directive(lines: Vec<String>) -> Vec<String> {
    match lines
        .iter()
        .position(|line| DiagramKind::from_directive_line(line).is_some())
    {
        Some(start) => lines.into_iter().skip(start).collect(),
        None => lines,
    }
}

#[cfg(test)]
#[path = "lines_test.rs"]
mod tests;
