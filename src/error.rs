use thiserror::Error;

use crate::eval::EvalError;
use crate::parser::{FormulaError, ParseError};
use crate::tokenizer::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    // formula pipeline
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizerError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
    // evaluation
    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),
    // configuration deserialization
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
