use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res, verify};
use nom::error::context;
use nom::sequence::{delimited, separated_pair};
use nom::Parser;

use crate::format::SourceRange;
use crate::parser::ParseResult;

/// Parse a whole `[start..end]` offset token, requiring `start <= end`.
///
/// The token must be consumed entirely; trailing garbage is a parse error,
/// not a shorter match.
pub fn range(input: &str) -> ParseResult<&str, SourceRange> {
    let (input, (start, end)) = context(
        "range",
        all_consuming(verify(
            delimited(
                tag("["),
                separated_pair(integer, tag(".."), integer),
                tag("]"),
            ),
            |&(start, end)| start <= end,
        )),
    )
    .parse(input)?;

    Ok((input, SourceRange { start, end }))
}

fn integer(input: &str) -> ParseResult<&str, usize> {
    context("integer", map_res(digit1, str::parse)).parse(input)
}

#[cfg(test)]
mod tests {
    use nom::error::ErrorKind;
    use nom::Err;
    use nom_language::error::{VerboseError, VerboseErrorKind};

    use super::*;

    #[test]
    fn well_formed_tokens() {
        assert_eq!(range("[0..0]"), Ok(("", SourceRange { start: 0, end: 0 })));
        assert_eq!(range("[2..8]"), Ok(("", SourceRange { start: 2, end: 8 })));
        assert_eq!(
            range("[120..4096]"),
            Ok((
                "",
                SourceRange {
                    start: 120,
                    end: 4096,
                }
            ))
        );
    }

    #[test]
    fn missing_brackets() {
        assert_eq!(
            range("2..4"),
            Err(Err::Error(VerboseError {
                errors: vec![
                    ("2..4", VerboseErrorKind::Nom(ErrorKind::Tag)),
                    ("2..4", VerboseErrorKind::Context("range")),
                ],
            }))
        );
        assert!(range("[2..4").is_err());
        assert!(range("2..4]").is_err());
        assert!(range("(2..4)").is_err());
    }

    #[test]
    fn reversed_offsets_are_rejected() {
        assert_eq!(
            range("[4..2]"),
            Err(Err::Error(VerboseError {
                errors: vec![
                    ("[4..2]", VerboseErrorKind::Nom(ErrorKind::Verify)),
                    ("[4..2]", VerboseErrorKind::Context("range")),
                ],
            }))
        );
    }

    #[test]
    fn malformed_numbers() {
        assert!(range("[a..4]").is_err());
        assert!(range("[4..]").is_err());
        assert!(range("[..4]").is_err());
        assert!(range("[-1..4]").is_err());
        assert!(range("[ 2..8]").is_err());
        assert!(range("[2..8 ]").is_err());
        // u64::MAX + 1 overflows the offset type
        assert!(range("[18446744073709551616..18446744073709551617]").is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(range("[2..8]x").is_err());
        assert!(range("[2..8][3..4]").is_err());
    }
}
