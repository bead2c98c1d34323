use thiserror::Error;

/// A parser over a token slice. Parsers are position-passing: they receive
/// the full input and a cursor, and return the new cursor with the value.
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("fail: {0}")]
    Fail(String),
    #[error("unexpected end of input")]
    Eof,
    #[error("no alternative matched")]
    NoAlternative,
    #[error("{message}: {inner}")]
    WithContext {
        message: String,
        inner: Box<ParseError>,
    },
}
