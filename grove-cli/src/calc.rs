//! Built-in demonstration binding: a line-oriented arithmetic grammar that
//! speaks the dump protocol, so the playground works out of the box without
//! any external parser.

use anyhow::Result;
use nom::branch::alt;
use nom::character::complete::{
    char, digit1, line_ending, multispace1, not_line_ending, one_of, space0,
};
use nom::combinator::{cut, eof, map_res};
use nom::error::context;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};
use nom_language::error::{VerboseError, VerboseErrorKind};
use nom_locate::LocatedSpan;

use grove::format::Analysis;
use grove::session::Language;

type Span<'a> = LocatedSpan<&'a str>;
type CalcResult<'a, T> = IResult<Span<'a>, T, VerboseError<Span<'a>>>;

/// Seeded with deliberate mistakes so the diagnostics pane has something
/// to show on first load.
const DEFAULT_SOURCE: &str = "1 + 2 * (3 - 4)\n(5 + 6 / 7\n8 */ 9\n";

const SOURCE_URL: &str = "builtin:calc";

pub fn language() -> Language {
    Language::new("calc", DEFAULT_SOURCE, SOURCE_URL, analyze)
}

/// Run the calculator grammar over `source` and emit the dump protocol.
///
/// Recovery is per line: a line that fails to parse becomes an `Error` node
/// covering its text plus one diagnostics entry, and later lines still parse.
pub fn analyze(source: &str) -> Result<Analysis> {
    let mut statements = Vec::new();
    let mut diagnostics = String::new();

    let mut remaining = Span::new(source);
    while !remaining.fragment().is_empty() {
        if let Ok((rest, _)) = multispace1::<Span, VerboseError<Span>>(remaining) {
            remaining = rest;
            continue;
        }
        match statement(remaining) {
            Ok((rest, node)) => {
                statements.push(node);
                remaining = rest;
            }
            Err(nom::Err::Error(error)) | Err(nom::Err::Failure(error)) => {
                diagnostics.push_str(&describe(&error));
                diagnostics.push('\n');
                let start = remaining.location_offset();
                let Ok((rest, _)) = not_line_ending::<Span, VerboseError<Span>>(remaining) else {
                    break;
                };
                statements.push(Node::error(start, rest.location_offset()));
                remaining = rest;
            }
            Err(nom::Err::Incomplete(_)) => break,
        }
    }

    let mut tree = String::new();
    write_node(&Node::root(statements, source.len()), 0, &mut tree);

    Ok(Analysis { tree, diagnostics })
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    label: &'static str,
    detail: String,
    start: usize,
    end: usize,
    children: Vec<Node>,
}

impl Node {
    fn root(children: Vec<Node>, len: usize) -> Self {
        Node {
            label: "Root",
            detail: String::new(),
            start: 0,
            end: len,
            children,
        }
    }

    fn literal(value: i64, start: usize, end: usize) -> Self {
        Node {
            label: "Literal",
            detail: value.to_string(),
            start,
            end,
            children: Vec::new(),
        }
    }

    fn unary(op: char, operand: Node, start: usize) -> Self {
        Node {
            label: "UnaryExpr",
            detail: format!("op={op}"),
            start,
            end: operand.end,
            children: vec![operand],
        }
    }

    fn binary(left: Node, op: char, right: Node) -> Self {
        Node {
            label: "BinaryExpr",
            detail: format!("op={op}"),
            start: left.start,
            end: right.end,
            children: vec![left, right],
        }
    }

    fn paren(inner: Node, start: usize, end: usize) -> Self {
        Node {
            label: "ParenExpr",
            detail: String::new(),
            start,
            end,
            children: vec![inner],
        }
    }

    fn error(start: usize, end: usize) -> Self {
        Node {
            label: "Error",
            detail: String::new(),
            start,
            end,
            children: Vec::new(),
        }
    }
}

fn write_node(node: &Node, depth: usize, output: &mut String) {
    for _ in 0..depth * 2 {
        output.push(' ');
    }
    output.push_str(node.label);
    if !node.detail.is_empty() {
        output.push(' ');
        output.push_str(&node.detail);
    }
    output.push_str(&format!(" [{}..{}]\n", node.start, node.end));
    for child in &node.children {
        write_node(child, depth + 1, output);
    }
}

fn describe(error: &VerboseError<Span<'_>>) -> String {
    let (line, column) = error
        .errors
        .first()
        .map(|(span, _)| (span.location_line() as usize, span.get_utf8_column()))
        .unwrap_or((1, 1));
    let expected = error.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Char(ch) => Some(format!("'{ch}'")),
        VerboseErrorKind::Context(name) => Some((*name).to_string()),
        VerboseErrorKind::Nom(_) => None,
    });
    match expected {
        Some(expected) => format!("syntax error at {line}:{column}: expected {expected}"),
        None => format!("syntax error at {line}:{column}"),
    }
}

/// statement := expr terminated by end of line
fn statement(input: Span) -> CalcResult<Node> {
    terminated(
        delimited(space0, expr, space0),
        context("end of line", alt((line_ending, eof))),
    )
    .parse(input)
}

/// expr := term (("+" | "-") term)*
fn expr(input: Span) -> CalcResult<Node> {
    let (input, first) = term(input)?;
    fold_many0(
        pair(delimited(space0, one_of("+-"), space0), term),
        move || first.clone(),
        |left, (op, right)| Node::binary(left, op, right),
    )
    .parse(input)
}

/// term := factor (("*" | "/") factor)*
fn term(input: Span) -> CalcResult<Node> {
    let (input, first) = factor(input)?;
    fold_many0(
        pair(delimited(space0, one_of("*/"), space0), factor),
        move || first.clone(),
        |left, (op, right)| Node::binary(left, op, right),
    )
    .parse(input)
}

fn factor(input: Span) -> CalcResult<Node> {
    context("expression", alt((unary, primary))).parse(input)
}

fn primary(input: Span) -> CalcResult<Node> {
    alt((number, paren)).parse(input)
}

fn unary(input: Span) -> CalcResult<Node> {
    let start = input.location_offset();
    let (input, op) = terminated(one_of("+-"), space0).parse(input)?;
    let (input, operand) = factor(input)?;
    Ok((input, Node::unary(op, operand, start)))
}

fn number(input: Span) -> CalcResult<Node> {
    let start = input.location_offset();
    let (input, value) = context(
        "number",
        map_res(digit1, |digits: Span| digits.fragment().parse::<i64>()),
    )
    .parse(input)?;
    Ok((input, Node::literal(value, start, input.location_offset())))
}

fn paren(input: Span) -> CalcResult<Node> {
    let start = input.location_offset();
    let (input, inner) = delimited(
        pair(char('('), space0),
        expr,
        preceded(space0, cut(char(')'))),
    )
    .parse(input)?;
    Ok((input, Node::paren(inner, start, input.location_offset())))
}
