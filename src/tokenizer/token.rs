use core::fmt;

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    combinator::recognize,
    error::{context, VerboseError},
    sequence::pair,
    IResult,
};
use thiserror::Error;

use super::{
    literal::parse_number,
    symbol::{parse_delimiter, parse_operator, Delimiter, Operator},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    Number(f64),
    Operator(Operator),
    Delimiter(Delimiter),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Delimiter(d) => write!(f, "{}", d),
        }
    }
}

/// Byte range of a token in the formula source, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    current_position: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
        }
    }

    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn tokenize(&mut self, input: &str) -> Result<Vec<TokenSpan>, TokenizerError> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            let trimmed = remaining.trim_start();
            self.current_position += remaining.len() - trimmed.len();
            remaining = trimmed;
            if remaining.is_empty() {
                break;
            }

            let start = self.current_position;
            let result = alt((
                parse_number,
                parse_operator,
                parse_delimiter,
                parse_identifier,
            ))(remaining);

            match result {
                Ok((new_remaining, token)) => {
                    let consumed = remaining.len() - new_remaining.len();
                    self.current_position += consumed;
                    tokens.push(TokenSpan {
                        token,
                        span: Span {
                            start,
                            end: self.current_position,
                        },
                    });
                    remaining = new_remaining;
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let span = Span {
                        start: self.current_position,
                        end: self.current_position + 1,
                    };
                    let error = match e {
                        nom::Err::Incomplete(needed) => TokenizerError::ParseError {
                            message: format!("incomplete input, {:?}", needed),
                            found,
                            span,
                        },
                        nom::Err::Error(e) | nom::Err::Failure(e) => TokenizerError::ParseError {
                            message: nom::error::convert_error(remaining, e),
                            found,
                            span,
                        },
                    };
                    tracing::debug!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_identifier(input: &str) -> ParserResult<Token> {
    let (input, id) = context(
        "identifier",
        recognize(pair(
            take_while1(|c: char| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
    )(input)?;

    Ok((input, Token::Identifier(id.to_string())))
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("tokenize error: {message} at {span}, found {found:?}")]
    ParseError {
        message: String,
        found: String,
        span: Span,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens_of(input: &str) -> Vec<Token> {
        Tokenizer::new()
            .tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_arithmetic_expression() {
        assert_eq!(
            tokens_of("2 + 3 * 4"),
            vec![
                Token::Number(2.0),
                Token::Operator(Operator::Plus),
                Token::Number(3.0),
                Token::Operator(Operator::Multiply),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_qualified_reference() {
        assert_eq!(
            tokens_of("Material.gauge"),
            vec![
                Token::Identifier("Material".to_string()),
                Token::Operator(Operator::Dot),
                Token::Identifier("gauge".to_string()),
            ]
        );
    }

    #[test]
    fn test_float_versus_dot() {
        // The dot inside a number literal must not split into a Dot token.
        assert_eq!(
            tokens_of("2.5 * width"),
            vec![
                Token::Number(2.5),
                Token::Operator(Operator::Multiply),
                Token::Identifier("width".to_string()),
            ]
        );
    }

    #[test]
    fn test_subtraction_without_spaces() {
        assert_eq!(
            tokens_of("qty-1"),
            vec![
                Token::Identifier("qty".to_string()),
                Token::Operator(Operator::Minus),
                Token::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_discarded() {
        assert_eq!(tokens_of("  ( a )  "), tokens_of("(a)"));
    }

    #[test]
    fn test_spans_track_source_positions() {
        let spans = Tokenizer::new().tokenize("ab + cd").unwrap();
        assert_eq!(spans[0].span, Span { start: 0, end: 2 });
        assert_eq!(spans[1].span, Span { start: 3, end: 4 });
        assert_eq!(spans[2].span, Span { start: 5, end: 7 });
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let result = Tokenizer::new().tokenize("a % b");
        assert!(matches!(
            result,
            Err(TokenizerError::ParseError { .. })
        ));
    }
}
