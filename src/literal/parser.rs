use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while},
    character::complete::{char, digit1, multispace1, not_line_ending, one_of, satisfy},
    combinator::{all_consuming, cut, map, map_opt, map_res, opt, recognize, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{many0, many0_count, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::term::{Atom, Term};

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Lists, tuples and maps nest at most this deep.
pub const MAX_NESTING: usize = 32;

/// A complete term, surrounding whitespace allowed.
pub fn parse_term_complete(input: &str) -> ParserResult<Term> {
    all_consuming(terminated(parse_term, ws))(input)
}

/// A bracket-less keyword sequence: `otp_app: :my_app, warn: false`.
pub fn parse_bare_keyword_complete<'a>(input: &'a str) -> ParserResult<'a, Term> {
    all_consuming(terminated(
        map(
            terminated(
                separated_list1(comma, |i: &'a str| parse_keyword_pair(i, 0)),
                opt(comma),
            ),
            Term::List,
        ),
        ws,
    ))(input)
}

/// Returns true if the input opens with a keyword key (`name:`).
pub fn starts_with_keyword_key(input: &str) -> bool {
    preceded(ws, parse_keyword_key)(input).is_ok()
}

#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_term(input: &str) -> ParserResult<Term> {
    parse_nested(input, 0)
}

/// A term inside `depth` enclosing containers.
fn parse_nested<'a>(input: &'a str, depth: usize) -> ParserResult<'a, Term> {
    preceded(
        ws,
        alt((
            |i: &'a str| parse_map(i, depth),
            |i: &'a str| parse_list(i, depth),
            |i: &'a str| parse_tuple(i, depth),
            map(parse_string, Term::Str),
            parse_atom,
            parse_alias,
            parse_integer,
            parse_word,
        )),
    )(input)
}

/// Depth for the contents of a container just opened.
fn descend(input: &str, depth: usize) -> ParserResult<usize> {
    if depth >= MAX_NESTING {
        return Err(nom::Err::Failure(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("nesting too deep"))],
        }));
    }
    Ok((input, depth + 1))
}

/// Whitespace, newlines and `#` comments.
fn ws(input: &str) -> ParserResult<()> {
    value(
        (),
        many0_count(alt((
            multispace1,
            recognize(pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn comma(input: &str) -> ParserResult<char> {
    preceded(ws, char(','))(input)
}

fn closing<'a>(delimiter: char) -> impl FnMut(&'a str) -> ParserResult<'a, char> {
    move |input| preceded(terminated(ws, opt(comma)), preceded(ws, char(delimiter)))(input)
}

fn identifier(input: &str) -> ParserResult<&str> {
    recognize(tuple((
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        opt(one_of("?!")),
    )))(input)
}

fn parse_keyword_key(input: &str) -> ParserResult<Atom> {
    context(
        "keyword key",
        terminated(
            alt((map(identifier, Atom::from), map(parse_string, Atom::from))),
            char(':'),
        ),
    )(input)
}

/// `key: value`. Once the key is read, a bad value is a hard failure.
fn parse_keyword_pair<'a>(input: &'a str, depth: usize) -> ParserResult<'a, Term> {
    map(
        pair(
            preceded(ws, parse_keyword_key),
            cut(|i: &'a str| parse_nested(i, depth)),
        ),
        |(key, value)| Term::pair(key, value),
    )(input)
}

fn parse_list_item<'a>(input: &'a str, depth: usize) -> ParserResult<'a, Term> {
    alt((
        |i: &'a str| parse_keyword_pair(i, depth),
        |i: &'a str| parse_nested(i, depth),
    ))(input)
}

fn parse_list<'a>(input: &'a str, depth: usize) -> ParserResult<'a, Term> {
    let (input, _) = char('[')(input)?;
    let (input, depth) = descend(input, depth)?;
    context(
        "list",
        cut(map(
            terminated(
                separated_list0(comma, move |i: &'a str| parse_list_item(i, depth)),
                closing(']'),
            ),
            Term::List,
        )),
    )(input)
}

fn parse_tuple<'a>(input: &'a str, depth: usize) -> ParserResult<'a, Term> {
    let (input, _) = char('{')(input)?;
    let (input, depth) = descend(input, depth)?;
    context(
        "tuple",
        cut(map(
            terminated(
                separated_list0(comma, move |i: &'a str| parse_nested(i, depth)),
                closing('}'),
            ),
            Term::Tuple,
        )),
    )(input)
}

fn parse_map_entry<'a>(input: &'a str, depth: usize) -> ParserResult<'a, (Term, Term)> {
    alt((
        pair(
            map(preceded(ws, parse_keyword_key), Term::Atom),
            cut(|i: &'a str| parse_nested(i, depth)),
        ),
        separated_pair(
            |i: &'a str| parse_nested(i, depth),
            preceded(ws, tag("=>")),
            cut(|i: &'a str| parse_nested(i, depth)),
        ),
    ))(input)
}

fn parse_map<'a>(input: &'a str, depth: usize) -> ParserResult<'a, Term> {
    let (input, _) = tag("%{")(input)?;
    let (input, depth) = descend(input, depth)?;
    context(
        "map",
        cut(map(
            terminated(
                separated_list0(comma, move |i: &'a str| parse_map_entry(i, depth)),
                closing('}'),
            ),
            Term::Map,
        )),
    )(input)
}

fn parse_escape(input: &str) -> ParserResult<&str> {
    preceded(
        char('\\'),
        alt((
            value("\\", char('\\')),
            value("\"", char('"')),
            value("\n", char('n')),
            value("\t", char('t')),
        )),
    )(input)
}

fn parse_string(input: &str) -> ParserResult<String> {
    context(
        "string",
        map(
            delimited(
                char('"'),
                many0(alt((take_till1(|c: char| c == '"' || c == '\\'), parse_escape))),
                char('"'),
            ),
            |parts| parts.concat(),
        ),
    )(input)
}

fn parse_atom(input: &str) -> ParserResult<Term> {
    context(
        "atom",
        map(
            preceded(
                char(':'),
                alt((map(identifier, Atom::from), map(parse_string, Atom::from))),
            ),
            Term::Atom,
        ),
    )(input)
}

fn parse_alias(input: &str) -> ParserResult<Term> {
    context(
        "alias",
        map(
            recognize(separated_list1(
                char('.'),
                pair(
                    satisfy(|c| c.is_ascii_uppercase()),
                    take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
                ),
            )),
            Term::atom,
        ),
    )(input)
}

fn parse_integer(input: &str) -> ParserResult<Term> {
    context(
        "integer",
        map_res(
            recognize(tuple((
                opt(char('-')),
                digit1,
                many0_count(pair(char('_'), digit1)),
            ))),
            |digits: &str| digits.replace('_', "").parse::<i64>().map(Term::Int),
        ),
    )(input)
}

/// `nil`, `true` and `false`.
fn parse_word(input: &str) -> ParserResult<Term> {
    context(
        "literal",
        map_opt(identifier, |word| match word {
            "nil" => Some(Term::Nil),
            "true" => Some(Term::Bool(true)),
            "false" => Some(Term::Bool(false)),
            _ => None,
        }),
    )(input)
}
