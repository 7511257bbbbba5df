use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte offset range `[start..end]` into the analyzed source text,
/// end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

/// 1-based line/column pair. Columns count characters within the line,
/// not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Editor span between two positions: anchor inclusive, head exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.anchor, self.head)
    }
}

/// One decoded line of a CST dump.
///
/// Borrows from the dump text; nothing here owns an allocation.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record<'a> {
    /// Length of the leading whitespace run, in characters.
    pub indent: usize,
    /// First whitespace-delimited token; empty on plain text lines.
    pub name: &'a str,
    /// Text between the name and the range token.
    pub rest: &'a str,
    /// The whole line after its indentation.
    pub content: &'a str,
    /// Decoded trailing `[start..end]` token, when well formed.
    pub range: Option<SourceRange>,
}

impl Record<'_> {
    /// Whether the line carries an activatable node.
    pub fn is_node(&self) -> bool {
        !self.name.is_empty() && self.range.is_some()
    }
}

/// What a parser binding hands back for one source text.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Analysis {
    /// CST dump, one node per non-blank line.
    pub tree: String,
    /// Shown verbatim; empty means clean.
    pub diagnostics: String,
}
