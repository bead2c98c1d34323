use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{map_res, recognize},
    error::context,
    sequence::tuple,
};

use super::token::{ParserResult, Token};

// Number literals are unsigned at the token level; negation is an
// expression-level concern so that `a-1` lexes as three tokens.

#[tracing::instrument(level = "debug", skip(input))]
fn parse_float_literal(input: &str) -> ParserResult<Token> {
    context(
        "float literal",
        map_res(recognize(tuple((digit1, char('.'), digit1))), |s: &str| {
            s.parse::<f64>().map(Token::Number)
        }),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_integer_literal(input: &str) -> ParserResult<Token> {
    context(
        "integer literal",
        map_res(digit1, |s: &str| s.parse::<f64>().map(Token::Number)),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_number(input: &str) -> ParserResult<Token> {
    context("number literal", alt((parse_float_literal, parse_integer_literal)))(input)
}
