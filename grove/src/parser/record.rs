use crate::format::{Record, SourceRange};

use super::range::range;

/// Decode one non-blank dump line.
///
/// The indent is the leading whitespace run and the name is the first
/// whitespace-delimited token; the range comes from the last token.
/// A line missing any of those still decodes, as a plain text record.
pub fn record(line: &str) -> Record<'_> {
    let content = line.trim_start();
    let indent = line[..line.len() - content.len()].chars().count();

    let Some((name, rest)) = content.split_once(char::is_whitespace) else {
        return Record {
            indent,
            name: "",
            rest: "",
            content,
            range: None,
        };
    };

    match split_range_token(rest) {
        Some((detail, range)) => Record {
            indent,
            name,
            rest: detail,
            content,
            range: Some(range),
        },
        None => Record {
            indent,
            name,
            rest,
            content,
            range: None,
        },
    }
}

/// Split the trailing `[start..end]` token off `rest`, if it parses.
fn split_range_token(rest: &str) -> Option<(&str, SourceRange)> {
    let trimmed = rest.trim_end();
    let (detail, token) = match trimmed
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
    {
        Some((position, ws)) => (
            trimmed[..position].trim_end(),
            &trimmed[position + ws.len_utf8()..],
        ),
        None => ("", trimmed),
    };
    let (_, range) = range(token).ok()?;
    Some((detail, range))
}
