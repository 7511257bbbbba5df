mod range;
mod record;

use nom::IResult;
use nom_language::error::VerboseError;

use crate::format::Record;

use self::record::record;

pub type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Stream the node records of a CST dump, one per non-blank line.
///
/// The iterator is lazy and restartable: nothing beyond the current line is
/// inspected and no parent/child graph is built. Lines that fail to decode
/// still come through, downgraded to plain text records.
pub fn records(dump: &str) -> Records<'_> {
    Records {
        lines: dump.lines(),
    }
}

/// Iterator returned by [`records`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .find(|line| !line.trim().is_empty())
            .map(record)
    }
}
