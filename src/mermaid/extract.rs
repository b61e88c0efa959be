//! Pull diagram code out of free-form model output.

const FENCE: &str = "```";
const LANGUAGE_HINT: &str = "mermaid";

/// Extract Mermaid code from a model response.
///
/// Prefers a fence tagged `mermaid` (case-insensitive), then an untagged
/// fence, then falls back to the trimmed input. Unterminated fences are not
/// treated as blocks; [`strip_fences`] cleans those up during sanitizing.
#[must_use]
pub fn extract_diagram_code(text: &str) -> String {
    if let Some(code) = find_fenced_block(text, |tag| tag.eq_ignore_ascii_case(LANGUAGE_HINT)) {
        return code.trim().to_owned();
    }
    if let Some(code) = find_fenced_block(text, str::is_empty) {
        return code.trim().to_owned();
    }
    text.trim().to_owned()
}

/// Find the body of the first fenced block whose info string satisfies `accept`.
fn find_fenced_block(text: &str, accept: impl Fn(&str) -> bool) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(FENCE) {
        let header_start = search_from + offset + FENCE.len();
        search_from = header_start;

        let header_len = text[header_start..].find('\n')?;
        let tag = text[header_start..header_start + header_len].trim();
        if !accept(tag) {
            continue;
        }

        let body_start = header_start + header_len + 1;
        let body = &text[body_start..];
        if body.starts_with(FENCE) {
            return Some("");
        }
        if let Some(end) = body.find("\n```") {
            return Some(&body[..end]);
        }
    }
    None
}

/// Remove a leftover opening fence line and trailing fence from `code`.
///
/// Expects already-trimmed input. The opening line is dropped whatever its
/// language tag; the closing fence only when it is the last line.
#[must_use]
pub fn strip_fences(code: &str) -> String {
    let Some(after_fence) = code.strip_prefix(FENCE) else {
        return code.to_owned();
    };
    let body = after_fence.split_once('\n').map_or("", |(_, rest)| rest);
    let body = body.trim_end();
    let body = match body.rsplit_once('\n') {
        Some((head, last)) if last.trim() == FENCE => head,
        None if body.trim() == FENCE => "",
        _ => body.strip_suffix(FENCE).unwrap_or(body),
    };
    body.trim().to_owned()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
