//! # Formula Tokenizer
//!
//! Lexer for the formula language stored in template configurations.
//! The language is a closed arithmetic DSL: number literals, the four
//! binary operators, parentheses, and field references written as a bare
//! identifier or as a dotted `Entity.field` pair.
//!
//! Whitespace is insignificant and is discarded during tokenization.
//!
//! ## Module Structure
//!
//! * [`token`]: Token type, the [`Tokenizer`] driver, and error types
//! * [`literal`]: Number literal parsing
//! * [`symbol`]: Operators and delimiters

pub mod literal;
pub mod symbol;
pub mod token;

pub use symbol::{Delimiter, Operator};
pub use token::{Token, TokenSpan, Tokenizer, TokenizerError};
