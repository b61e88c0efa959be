//! Directive keywords and dialect sniffing.

/// Diagram dialect declared by the first directive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    /// `graph TD` / `graph LR`
    Graph,
    /// `flowchart TD` etc.
    Flowchart,
    Sequence,
    Class,
    /// `stateDiagram`
    State,
    /// `stateDiagram-v2`
    StateV2,
}

/// Every dialect, longest keyword first so `stateDiagram-v2` wins over its
/// `stateDiagram` prefix.
const BY_KEYWORD_LENGTH: [DiagramKind; 6] = [
    DiagramKind::StateV2,
    DiagramKind::Sequence,
    DiagramKind::Class,
    DiagramKind::State,
    DiagramKind::Flowchart,
    DiagramKind::Graph,
];

impl DiagramKind {
    /// The directive keyword that declares this dialect.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequenceDiagram",
            Self::Class => "classDiagram",
            Self::State => "stateDiagram",
            Self::StateV2 => "stateDiagram-v2",
        }
    }

    /// Parse a directive line such as `graph TD` or `  classDiagram`.
    ///
    /// The keyword must be followed by end of line or a non-identifier
    /// character, so `graphql --> api` is not a directive.
    #[must_use]
    pub fn from_directive_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        BY_KEYWORD_LENGTH
            .into_iter()
            .find(|kind| starts_with_word(trimmed, kind.keyword()))
    }

    /// Sniff the dialect from the first directive line anywhere in `source`.
    #[must_use]
    pub fn detect(source: &str) -> Option<Self> {
        source.lines().find_map(Self::from_directive_line)
    }
}

/// True when `line` starts with `word` followed by a word boundary.
pub(crate) fn starts_with_word(line: &str, word: &str) -> bool {
    let Some(rest) = line.strip_prefix(word) else {
        return false;
    };
    rest.chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
