//! Bracket-aware label normalization.
//!
//! DESIGN
//! ======
//! Models like to wrap long node labels across lines:
//!
//! ```text
//! FrontendApp[fa:fa-window-maximize Azure App Service
//! (Frontend)]
//! ```
//!
//! Mermaid rejects the newline. Each delimiter kind gets its own left-to-right
//! fold with a local depth counter (or in-quote flag for `"`). While inside a
//! span, whitespace runs collapse to one space and `&` becomes `and`.
//!
//! A span is only rewritten once its closer is seen. Text from an opener that
//! never closes is emitted verbatim, so one stray `[` cannot glue the rest of
//! the diagram onto a single line.

use super::dialect::DiagramKind;

/// Delimiter kinds, in the order their passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Square,
    Paren,
    Curly,
    Quote,
}

impl Delimiter {
    #[must_use]
    pub fn open(self) -> char {
        match self {
            Self::Square => '[',
            Self::Paren => '(',
            Self::Curly => '{',
            Self::Quote => '"',
        }
    }

    #[must_use]
    pub fn close(self) -> char {
        match self {
            Self::Square => ']',
            Self::Paren => ')',
            Self::Curly => '}',
            Self::Quote => '"',
        }
    }
}

/// Run all label passes over `code`.
///
/// Curly braces are structural in class diagrams, so that pass is skipped
/// when `dialect` is [`DiagramKind::Class`].
#[must_use]
pub fn normalize_labels(code: &str, dialect: Option<DiagramKind>) -> String {
    let mut out = collapse_spans(code, Delimiter::Square);
    out = collapse_spans(&out, Delimiter::Paren);
    if dialect != Some(DiagramKind::Class) {
        out = collapse_spans(&out, Delimiter::Curly);
    }
    out = collapse_spans(&out, Delimiter::Quote);
    out.split('\n')
        .map(replace_edge_label_ampersands)
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// SPAN FOLD
// =============================================================================

/// Accumulator for the span currently being scanned.
#[derive(Default)]
struct Span {
    /// Nesting depth; for quotes this is 0 or 1.
    depth: usize,
    /// Previous character inside a quote was a backslash.
    escaped: bool,
    /// Whitespace seen since the last pushed character.
    pending_space: bool,
    /// Verbatim text since the opener, used if the span never closes.
    raw: String,
    /// Normalized text since the opener.
    clean: String,
}

impl Span {
    fn begin(&mut self, opener: char) {
        self.depth = 1;
        self.raw.push(opener);
        self.clean.push(opener);
    }

    fn is_open(&self) -> bool {
        self.depth > 0
    }

    fn flush_space(&mut self) {
        if self.pending_space {
            self.clean.push(' ');
            self.pending_space = false;
        }
    }

    fn push(&mut self, c: char) {
        self.flush_space();
        self.clean.push(c);
    }

    fn push_ampersand(&mut self, next: Option<char>) {
        self.flush_space();
        push_and(&mut self.clean, next);
    }

    /// Hand back the finished span and reset for the next one.
    fn finish(&mut self) -> String {
        let clean = std::mem::take(&mut self.clean);
        *self = Self::default();
        clean
    }
}

/// One label pass: collapse whitespace inside every closed `delimiter` span.
#[must_use]
pub fn collapse_spans(input: &str, delimiter: Delimiter) -> String {
    let mut out = String::with_capacity(input.len());
    let mut span = Span::default();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !span.is_open() {
            if c == delimiter.open() {
                span.begin(c);
            } else {
                // Unmatched closers land here too; depth stays at zero.
                out.push(c);
            }
            continue;
        }

        span.raw.push(c);
        if c.is_whitespace() {
            // Only a directly adjacent `\"` is an escaped quote.
            span.escaped = false;
            span.pending_space = true;
            continue;
        }
        if span.escaped {
            span.escaped = false;
            span.push(c);
            continue;
        }

        match c {
            '\\' if delimiter == Delimiter::Quote => {
                span.escaped = true;
                span.push(c);
            }
            '&' => span.push_ampersand(chars.peek().copied()),
            c if c == delimiter.close() => {
                span.push(c);
                span.depth -= 1;
                if !span.is_open() {
                    out.push_str(&span.finish());
                }
            }
            c if c == delimiter.open() => {
                span.push(c);
                span.depth += 1;
            }
            c => span.push(c),
        }
    }

    if span.is_open() {
        out.push_str(&span.raw);
    }
    out
}

// =============================================================================
// AMPERSANDS
// =============================================================================

/// Append `and` in place of `&`, padding against glued alphanumerics so
/// `R&D` reads `R and D`.
fn push_and(out: &mut String, next: Option<char>) {
    if out.chars().next_back().is_some_and(char::is_alphanumeric) {
        out.push(' ');
    }
    out.push_str("and");
    if next.is_some_and(char::is_alphanumeric) {
        out.push(' ');
    }
}

/// Replace `&` inside `-->|edge label|` pipe spans of a single line.
///
/// A pipe only opens a label when it directly follows an arrow, so `&` used
/// for node chaining (`A & B --> C`) is left alone.
#[must_use]
pub fn replace_edge_label_ampersands(line: &str) -> String {
    if !line.contains('&') {
        return line.to_owned();
    }

    let mut out = String::with_capacity(line.len() + 8);
    let mut rest = line;
    while let Some(idx) = rest.find('|') {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);
        out.push('|');
        let after = &tail[1..];

        let follows_arrow = out[..out.len() - 1]
            .trim_end()
            .ends_with(|c: char| matches!(c, '>' | '-' | '=' | '.'));
        match after.find('|') {
            Some(close) if follows_arrow => {
                let mut label_chars = after[..close].chars().peekable();
                while let Some(c) = label_chars.next() {
                    if c == '&' {
                        push_and(&mut out, label_chars.peek().copied());
                    } else {
                        out.push(c);
                    }
                }
                out.push('|');
                rest = &after[close + 1..];
            }
            _ => rest = after,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod tests;
