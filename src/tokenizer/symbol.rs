//! Operators and delimiters of the formula language.
//!
//! Symbols are matched with nom `tag` parsers; every symbol here is a single
//! character, so no longest-match ordering is needed.

use strum_macros::{AsRefStr, Display, EnumString};

use nom::{branch::alt, bytes::complete::tag, combinator::value, error::context};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq, EnumString, Display, AsRefStr)]
pub enum Operator {
    /// Addition operator (`+`)
    #[strum(serialize = "+")]
    Plus,
    /// Subtraction and negation operator (`-`)
    #[strum(serialize = "-")]
    Minus,
    /// Multiplication operator (`*`)
    #[strum(serialize = "*")]
    Multiply,
    /// Division operator (`/`)
    #[strum(serialize = "/")]
    Divide,
    /// Member access operator (`.`), used in qualified field references
    #[strum(serialize = ".")]
    Dot,
}

#[derive(Debug, Clone, PartialEq, EnumString, Display, AsRefStr)]
pub enum Delimiter {
    /// Opening parenthesis (`(`) for grouping
    #[strum(serialize = "(")]
    OpenParen,
    /// Closing parenthesis (`)`) for grouping
    #[strum(serialize = ")")]
    CloseParen,
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_operator(input: &str) -> ParserResult<Token> {
    context(
        "operator",
        alt((
            value(Token::Operator(Operator::Plus), tag("+")),
            value(Token::Operator(Operator::Minus), tag("-")),
            value(Token::Operator(Operator::Multiply), tag("*")),
            value(Token::Operator(Operator::Divide), tag("/")),
            value(Token::Operator(Operator::Dot), tag(".")),
        )),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        alt((
            value(Token::Delimiter(Delimiter::OpenParen), tag("(")),
            value(Token::Delimiter(Delimiter::CloseParen), tag(")")),
        )),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operator_round_trip() {
        for symbol in ["+", "-", "*", "/", "."] {
            let (rest, token) = parse_operator(symbol).unwrap();
            assert_eq!(rest, "");
            match token {
                Token::Operator(op) => assert_eq!(op.to_string(), symbol),
                other => panic!("expected operator, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_delimiters() {
        let (_, open) = parse_delimiter("(").unwrap();
        let (_, close) = parse_delimiter(")").unwrap();
        assert_eq!(open, Token::Delimiter(Delimiter::OpenParen));
        assert_eq!(close, Token::Delimiter(Delimiter::CloseParen));
    }
}
