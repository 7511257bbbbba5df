//! Maps byte offset ranges back to 1-based line/column positions.
//!
//! Offsets count UTF-8 bytes of the source text; emitted columns count
//! characters within their line. Parser bindings must report offsets in the
//! same byte unit, otherwise selections drift on non-ASCII input.

use crate::format::{Position, Selection};

/// Resolve the `start..end` byte offsets into an editor selection.
///
/// The scan never fails. Offsets past the end of text clamp to it, and the
/// end of text maps to one column past the final character. An offset landing
/// inside a multi-byte character resolves to that character's position.
/// `\r` counts as an ordinary character of its line.
pub fn locate(text: &str, start: usize, end: usize) -> Selection {
    let start = start.min(text.len());
    let end = end.min(text.len()).max(start);

    let mut line = 1;
    let mut column = 1;
    let mut anchor = None;
    let mut head = None;

    for (offset, ch) in text.char_indices() {
        let next = offset + ch.len_utf8();
        if anchor.is_none() && start < next {
            anchor = Some(Position::new(line, column));
        }
        if head.is_none() && end < next {
            head = Some(Position::new(line, column));
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    let end_of_text = Position::new(line, column);
    Selection {
        anchor: anchor.unwrap_or(end_of_text),
        head: head.unwrap_or(end_of_text),
    }
}
