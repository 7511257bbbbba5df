//! Turns decoded dump records into display rows.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::format::{Record, SourceRange};

/// One visual row of the tree outline.
///
/// `Text` rows are inert. `Node` rows carry the offset range that drives an
/// editor selection when the row is activated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutlineRow {
    Text {
        indent: usize,
        text: String,
    },
    Node {
        indent: usize,
        label: String,
        detail: String,
        range: SourceRange,
    },
}

impl OutlineRow {
    /// Leading whitespace of the dump line, reproduced verbatim.
    pub fn indent(&self) -> usize {
        match self {
            OutlineRow::Text { indent, .. } | OutlineRow::Node { indent, .. } => *indent,
        }
    }

    /// Activatable label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            OutlineRow::Node { label, .. } => Some(label),
            OutlineRow::Text { .. } => None,
        }
    }

    /// Offset range behind an activatable row.
    pub fn range(&self) -> Option<SourceRange> {
        match self {
            OutlineRow::Node { range, .. } => Some(*range),
            OutlineRow::Text { .. } => None,
        }
    }
}

impl From<Record<'_>> for OutlineRow {
    fn from(record: Record<'_>) -> Self {
        match record.range {
            Some(range) if !record.name.is_empty() => OutlineRow::Node {
                indent: record.indent,
                label: record.name.to_string(),
                detail: record.rest.to_string(),
                range,
            },
            _ => OutlineRow::Text {
                indent: record.indent,
                text: record.content.to_string(),
            },
        }
    }
}

impl fmt::Display for OutlineRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineRow::Text { indent, text } => {
                write!(f, "{:width$}{}", "", text, width = *indent)
            }
            OutlineRow::Node {
                indent,
                label,
                detail,
                range,
            } => {
                write!(f, "{:width$}{}", "", label, width = *indent)?;
                if !detail.is_empty() {
                    write!(f, " {detail}")?;
                }
                write!(f, " {range}")
            }
        }
    }
}

/// Convert a record stream into display rows, preserving order and indent.
pub fn render<'a>(records: impl IntoIterator<Item = Record<'a>>) -> Vec<OutlineRow> {
    records.into_iter().map(OutlineRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::records;

    #[test]
    fn nodes_and_text_are_distinguished() {
        let dump = "Module [0..10]\n  note: folded\n  Stmt x=1 [2..8]\n";
        let rows = render(records(dump));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label(), Some("Module"));
        assert_eq!(rows[1].label(), None);
        assert_eq!(rows[2].label(), Some("Stmt"));
        assert_eq!(rows[2].range(), Some(SourceRange { start: 2, end: 8 }));
    }

    #[test]
    fn display_reproduces_the_indent() {
        let dump = "A [0..1]\n   B b=2 [1..2]\n inert line\n";
        let rows = render(records(dump));
        let printed: Vec<String> = rows.iter().map(ToString::to_string).collect();
        assert_eq!(printed, ["A [0..1]", "   B b=2 [1..2]", " inert line"]);

        for (row, line) in rows.iter().zip(&printed) {
            let leading = line.chars().take_while(|ch| *ch == ' ').count();
            assert_eq!(leading, row.indent());
        }
    }

    #[test]
    fn depth_jumps_pass_through() {
        let dump = "A [0..1]\n      B [0..1]\n  C [0..1]\n";
        let rows = render(records(dump));
        let indents: Vec<_> = rows.iter().map(OutlineRow::indent).collect();
        assert_eq!(indents, [0, 6, 2]);
    }

    #[test]
    fn empty_dump_renders_no_rows() {
        assert!(render(records("")).is_empty());
    }

    #[test]
    fn malformed_range_renders_the_raw_line() {
        let rows = render(records("Broken [8..2]\n"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].range(), None);
        assert_eq!(rows[0].to_string(), "Broken [8..2]");
    }
}
