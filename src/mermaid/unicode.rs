//! Normalize codepoints that Mermaid's lexer chokes on.

/// Replace exotic separators and spaces, delete invisible characters and
/// fold `\r\n` / `\r` line endings to `\n`.
#[must_use]
pub fn normalize_unicode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            // LINE SEPARATOR, PARAGRAPH SEPARATOR, NEXT LINE
            '\u{2028}' | '\u{2029}' | '\u{0085}' => out.push('\n'),
            // NO-BREAK SPACE, NARROW NO-BREAK SPACE, FIGURE SPACE
            '\u{00A0}' | '\u{202F}' | '\u{2007}' => out.push(' '),
            // zero-width space / non-joiner / joiner, word joiner, BOM
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "unicode_test.rs"]
mod tests;
