//! Class-diagram block reconstruction.
//!
//! DESIGN
//! ======
//! Model output for `classDiagram` often has braces in the wrong place, prose
//! inside class bodies, or blocks that never close. The lines are folded
//! through a two-state machine ([`ClassBlock`]). A block is only written out
//! when it is flushed: on `}`, on the next `class` line, or at end of input.
//! So every emitted block is well formed.
//!
//! Other brace scopes (`namespace Shapes {`) pass through. Their depth is
//! counted so their closers survive while a `}` that closes nothing is
//! dropped.

use super::dialect::starts_with_word;

const STATEMENT_INDENT: &str = "    ";
const MEMBER_INDENT: &str = "        ";

/// Class-block state threaded through the line fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassBlock {
    Outside,
    Open { name: String, members: Vec<String> },
}

/// Rebuild class blocks and normalize statement indentation.
#[must_use]
pub fn rebuild_class_blocks(code: &str) -> String {
    let mut rebuild = Rebuild::default();
    let last = code
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(ClassBlock::Outside, |state, line| rebuild.step(state, line));
    flush(last, &mut rebuild.out);
    rebuild.out.join("\n")
}

#[derive(Default)]
struct Rebuild {
    out: Vec<String>,
    /// Open non-class brace scopes, e.g. `namespace X {`.
    scopes: usize,
}

impl Rebuild {
    /// Advance the state machine by one trimmed, non-empty line.
    fn step(&mut self, state: ClassBlock, line: &str) -> ClassBlock {
        if starts_with_word(line, "classDiagram") {
            self.out.push(line.to_owned());
            return state;
        }

        if line.starts_with("%%") || is_relationship(line) {
            self.out.push(format!("{STATEMENT_INDENT}{line}"));
            return state;
        }

        if let Some(rest) = strip_class_keyword(line) {
            flush(state, &mut self.out);
            return match parse_declaration(rest) {
                Declaration::BlockOpen(name) => ClassBlock::Open { name: name.to_owned(), members: Vec::new() },
                Declaration::Bare(name) => {
                    self.out.push(format!("{STATEMENT_INDENT}class {name}"));
                    ClassBlock::Outside
                }
                Declaration::Other => {
                    self.statement(line);
                    ClassBlock::Outside
                }
            };
        }

        match state {
            ClassBlock::Open { name, mut members } => {
                if line == "}" {
                    flush(ClassBlock::Open { name, members }, &mut self.out);
                    return ClassBlock::Outside;
                }
                if is_member(line) {
                    members.push(line.to_owned());
                }
                ClassBlock::Open { name, members }
            }
            ClassBlock::Outside => {
                if line != "}" {
                    self.statement(line);
                } else if self.scopes > 0 {
                    self.scopes -= 1;
                    self.statement(line);
                }
                ClassBlock::Outside
            }
        }
    }

    /// Emit a top-level statement, tracking any brace scope it opens.
    fn statement(&mut self, line: &str) {
        if line.ends_with('{') {
            self.scopes += 1;
        }
        self.out.push(format!("{STATEMENT_INDENT}{line}"));
    }
}

/// Emit the buffered block, if any.
fn flush(state: ClassBlock, out: &mut Vec<String>) {
    let ClassBlock::Open { name, members } = state else {
        return;
    };
    if members.is_empty() {
        out.push(format!("{STATEMENT_INDENT}class {name}"));
        return;
    }
    out.push(format!("{STATEMENT_INDENT}class {name} {{"));
    out.extend(members.into_iter().map(|m| format!("{MEMBER_INDENT}{m}")));
    out.push(format!("{STATEMENT_INDENT}}}"));
}

// =============================================================================
// LINE CLASSIFICATION
// =============================================================================

enum Declaration<'a> {
    /// `class Name {`
    BlockOpen(&'a str),
    /// `class Name`
    Bare(&'a str),
    /// Anything else after `class`, e.g. a one-line block or a styled class.
    Other,
}

/// Strip a leading `class` keyword. `classDef` and `classDiagram` do not match.
fn strip_class_keyword(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("class")?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

fn parse_declaration(rest: &str) -> Declaration<'_> {
    if let Some(name) = rest.strip_suffix('{') {
        let name = name.trim();
        if is_class_name(name) {
            return Declaration::BlockOpen(name);
        }
        return Declaration::Other;
    }
    if is_class_name(rest) {
        return Declaration::Bare(rest);
    }
    Declaration::Other
}

fn is_class_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c == '{' || c == '}')
}

/// Inheritance, composition, aggregation, association, dependency or link.
///
/// Every relation arrow has a `--` or `..` shaft. It must have an operand on
/// its left, and that operand must not hold a `:` or `(`, so members such as
/// `+range: 1..10` stay members.
fn is_relationship(line: &str) -> bool {
    let shaft = [line.find("--"), line.find("..")].into_iter().flatten().min();
    let Some(shaft) = shaft else {
        return false;
    };
    let left = line[..shaft].trim_end_matches(['<', '|', '*', 'o', ' ']);
    let right = line[shaft + 2..].trim_start_matches(['-', '.', '>', '|', '*', 'o', ' ']);
    !left.trim().is_empty() && !right.is_empty() && !left.contains([':', '('])
}

/// Attribute (`name: string`) or method (`bar()`, `+find(id) User`).
fn is_member(line: &str) -> bool {
    line.contains(':') || ends_with_call_signature(line)
}

fn ends_with_call_signature(line: &str) -> bool {
    let Some(close) = line.rfind(')') else {
        return false;
    };
    let Some(open) = line[..close].find('(') else {
        return false;
    };
    if open == 0 {
        return false;
    }
    let suffix = line[close + 1..].trim_start_matches(|c: char| c == '$' || c == '*').trim();
    !suffix.contains(char::is_whitespace)
}

#[cfg(test)]
#[path = "class_diagram_test.rs"]
mod tests;
