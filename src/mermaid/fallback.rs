//! Minimal always-valid diagram used when generation yields nothing usable.

/// Characters of the description echoed into the trailing comment.
pub const FALLBACK_DESCRIPTION_CHARS: usize = 80;

const FALLBACK_TOPOLOGY: &str = "graph TD
    A[Start] --> B{Process}
    B -->|Analyze| C[Components]
    C --> D[Interactions]
    D --> E[Output]
";

/// Build the fallback flowchart for `description`.
///
/// The topology is fixed; only the trailing `%%` comment varies. Whitespace in
/// the echoed text is collapsed so it cannot spill out of the comment line.
#[must_use]
pub fn create_fallback_diagram(description: &str) -> String {
    let head: String = description.chars().take(FALLBACK_DESCRIPTION_CHARS).collect();
    let echoed = head.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{FALLBACK_TOPOLOGY}    %% Input: {echoed}...\n")
}

#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;
